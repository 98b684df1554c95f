use super::WebhookUploader;
use crate::upload::{Phase, UploadStatus};
use crate::utils::file_size::FileSizeUtils;
use eframe::egui::{self, Color32, RichText, Stroke};

const ACCENT: Color32 = Color32::from_rgb(37, 99, 235);
const SUCCESS: Color32 = Color32::from_rgb(22, 163, 74);
const FAILURE: Color32 = Color32::from_rgb(220, 38, 38);
const WARNING: Color32 = Color32::from_rgb(217, 119, 6);

struct TroubleshootingStep {
    title: &'static str,
    description: String,
    expected: String,
    solution: String,
}

impl WebhookUploader {
    pub fn render(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(20.0);
                ui.vertical_centered(|ui| {
                    ui.heading("Upload Your Files");
                    ui.add_space(5.0);
                    ui.label(
                        RichText::new(
                            "Drag and drop your CSV, TXT, or PDF files below, or click to browse and select files",
                        )
                        .color(ui.visuals().text_color().gamma_multiply(0.7)),
                    );
                });

                ui.add_space(20.0);
                self.render_drop_zone(ui);
                self.render_notices(ui);

                if !self.state.selection.is_empty() {
                    ui.add_space(20.0);
                    self.render_selected_files(ui);
                }

                let status = self.state.status();
                if status.phase != Phase::Idle {
                    ui.add_space(20.0);
                    self.render_status(ui, &status);
                }

                ui.add_space(20.0);
                self.render_troubleshooting(ui);
                ui.add_space(20.0);
            });
        });
    }

    fn render_drop_zone(&mut self, ui: &mut egui::Ui) {
        let uploading = self.state.is_uploading();
        let (stroke_color, title) = if self.state.drag_active {
            (ACCENT, "Drop files here")
        } else {
            (ui.visuals().widgets.inactive.bg_stroke.color, "Upload your files")
        };

        egui::Frame::none()
            .stroke(Stroke::new(2.0, stroke_color))
            .rounding(12.0)
            .inner_margin(24.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(title).size(18.0).strong());
                    ui.add_space(6.0);
                    ui.label("Drag and drop files here, or click to browse");
                    ui.add_space(10.0);
                    ui.add_enabled_ui(!uploading, |ui| {
                        if ui.button("📁 Browse Files").clicked() {
                            self.browse_files();
                        }
                    });
                    ui.add_space(6.0);
                    ui.label(
                        RichText::new("CSV · TXT · PDF  |  Maximum file size: 10MB")
                            .small()
                            .color(ui.visuals().text_color().gamma_multiply(0.6)),
                    );
                });
            });
    }

    fn render_notices(&mut self, ui: &mut egui::Ui) {
        if let Some(notice) = &self.state.rejection_notice {
            let mut dismissed = false;
            ui.add_space(10.0);
            egui::Frame::none()
                .stroke(Stroke::new(1.0, WARNING))
                .rounding(8.0)
                .inner_margin(12.0)
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.colored_label(WARNING, notice.to_string());
                    if ui.small_button("Dismiss").clicked() {
                        dismissed = true;
                    }
                });
            if dismissed {
                self.state.rejection_notice = None;
            }
        }

        if let Some(error) = &self.state.error_message {
            ui.add_space(5.0);
            ui.colored_label(FAILURE, error.as_str());
        }
    }

    fn render_selected_files(&mut self, ui: &mut egui::Ui) {
        let uploading = self.state.is_uploading();
        let mut remove = None;

        ui.label(RichText::new("Selected Files").size(16.0).strong());
        ui.add_space(6.0);
        for (index, file) in self.state.selection.pending().iter().enumerate() {
            ui.group(|ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label(file_icon(&file.extension()));
                    ui.vertical(|ui| {
                        ui.label(RichText::new(&file.name).strong());
                        ui.label(
                            RichText::new(FileSizeUtils::format_size(file.size_bytes))
                                .small()
                                .color(ui.visuals().text_color().gamma_multiply(0.6)),
                        );
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.add_enabled(!uploading, egui::Button::new("✖")).clicked() {
                            remove = Some(index);
                        }
                    });
                });
            });
        }

        if let Some(index) = remove {
            self.state.selection.remove_at(index);
        }

        ui.add_space(10.0);
        ui.vertical_centered(|ui| {
            let button = egui::Button::new(self.state.submit_label()).min_size(egui::vec2(200.0, 40.0));
            if ui.add_enabled(self.state.can_submit(), button).clicked() {
                self.start_upload();
            }
        });
    }

    fn render_status(&self, ui: &mut egui::Ui, status: &UploadStatus) {
        let (color, icon) = match status.phase {
            Phase::Uploading => (ACCENT, "⏳"),
            Phase::Success => (SUCCESS, "✅"),
            Phase::Error => (FAILURE, "❌"),
            Phase::Idle => (ui.visuals().text_color(), ""),
        };

        egui::Frame::none()
            .stroke(Stroke::new(2.0, color))
            .rounding(12.0)
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label(RichText::new(icon).size(18.0));
                    ui.vertical(|ui| {
                        ui.label(RichText::new(status.headline()).strong());
                        if status.phase == Phase::Uploading {
                            ui.label(format!("{}% complete", status.progress.round()));
                        }
                    });
                });

                match status.phase {
                    Phase::Uploading => {
                        ui.add_space(8.0);
                        let progress_bar = egui::ProgressBar::new(self.state.get_progress_fraction())
                            .animate(true)
                            .fill(color);
                        ui.add(progress_bar);
                    }
                    Phase::Success => {
                        ui.add_space(8.0);
                        ui.colored_label(
                            SUCCESS,
                            "Your files have been successfully processed by the n8n workflow.\nCheck your n8n instance for the results.",
                        );
                    }
                    Phase::Error => {
                        if let Some(detail) = status.error_detail() {
                            ui.add_space(8.0);
                            egui::Frame::none()
                                .fill(ui.visuals().extreme_bg_color)
                                .rounding(8.0)
                                .inner_margin(12.0)
                                .show(ui, |ui| {
                                    ui.set_width(ui.available_width());
                                    ui.colored_label(FAILURE, detail);
                                });
                        }
                    }
                    Phase::Idle => {}
                }
            });
    }

    fn render_troubleshooting(&self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new(
            RichText::new("⚠ Troubleshooting Connection Issues").color(WARNING),
        )
        .default_open(false)
        .show(ui, |ui| {
            ui.label("If you're seeing connection errors, follow these steps to set up n8n properly:");
            ui.add_space(8.0);

            for step in self.troubleshooting_steps() {
                ui.group(|ui| {
                    ui.set_width(ui.available_width());
                    ui.label(RichText::new(step.title).strong());
                    ui.label(step.description);
                    ui.colored_label(SUCCESS, format!("✔ {}", step.expected));
                    ui.label(RichText::new(step.solution).monospace().color(ACCENT));
                });
                ui.add_space(6.0);
            }

            ui.label(RichText::new("Quick Test").strong());
            ui.label("Once n8n is running with CORS enabled, test your webhook:");
            if ui.link("Open webhook URL ↗").clicked() {
                if let Err(e) = open::that(self.endpoint.as_str()) {
                    tracing::warn!("Failed to open link: {}", e);
                }
            }
        });
    }

    fn troubleshooting_steps(&self) -> Vec<TroubleshootingStep> {
        let origin = self.endpoint.origin().ascii_serialization();
        let path = self.endpoint.path().trim_start_matches('/');

        vec![
            TroubleshootingStep {
                title: "1. Check if n8n is running",
                description: format!("Open your browser and go to {}", origin),
                expected: "You should see the n8n interface".to_string(),
                solution: "If not working, start n8n with: npm install n8n -g && n8n".to_string(),
            },
            TroubleshootingStep {
                title: "2. Create the webhook in n8n",
                description: "Create a new workflow with a Webhook node".to_string(),
                expected: format!("Set the webhook path to '{}' and method to 'POST'", path),
                solution: format!("The webhook URL should be: {}", self.endpoint),
            },
            TroubleshootingStep {
                title: "3. Configure CORS in n8n",
                description: "n8n needs to allow cross-origin requests".to_string(),
                expected: "Restart n8n with CORS enabled".to_string(),
                solution: "Run: n8n start --cors-origin=\"*\" or set N8N_CORS_ORIGIN=*".to_string(),
            },
            TroubleshootingStep {
                title: "4. Test the webhook directly",
                description: "Test if the webhook responds to requests".to_string(),
                expected: "The webhook should accept POST requests".to_string(),
                solution: format!("Use curl or Postman to test: curl -X POST {}", self.endpoint),
            },
        ]
    }
}

fn file_icon(extension: &str) -> &'static str {
    match extension {
        "csv" => "🗄",
        "txt" => "📝",
        _ => "📄",
    }
}
