mod state;
mod ui;

use crate::upload::{guess_mime_type, CandidateFile, FileContent, Phase, UploadOrchestrator};
use eframe::{egui, App};
pub use state::UploaderState;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::Mutex;
use tracing::{info, warn};
use url::Url;

pub struct WebhookUploader {
    endpoint: Url,
    state: UploaderState,
    orchestrator: Arc<Mutex<UploadOrchestrator>>,
    runtime: Handle,
}

impl WebhookUploader {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        orchestrator: UploadOrchestrator,
        endpoint: Url,
        runtime: Handle,
    ) -> Self {
        info!("Initializing webhook uploader for {}", endpoint);
        let state = UploaderState::new(orchestrator.subscribe());
        Self {
            endpoint,
            state,
            orchestrator: Arc::new(Mutex::new(orchestrator)),
            runtime,
        }
    }

    pub fn add_paths(&mut self, paths: Vec<PathBuf>) {
        let mut candidates = Vec::with_capacity(paths.len());
        for path in paths {
            match CandidateFile::from_path(&path) {
                Ok(file) => candidates.push(file),
                Err(e) => {
                    warn!("Could not open {}: {}", path.display(), e);
                    self.state.error_message =
                        Some(format!("Could not open {}: {}", path.display(), e));
                }
            }
        }
        self.state.add_candidates(candidates);
    }

    pub fn browse_files(&mut self) {
        if let Some(paths) = rfd::FileDialog::new()
            .add_filter("CSV, TXT or PDF", &["csv", "txt", "pdf"])
            .pick_files()
        {
            self.add_paths(paths);
        }
    }

    pub fn start_upload(&mut self) {
        let Some(files) = self.state.take_for_submit() else {
            return;
        };
        info!("Submitting {} file(s)", files.len());
        self.state.rejection_notice = None;
        self.state.error_message = None;

        let orchestrator = Arc::clone(&self.orchestrator);
        self.runtime.spawn(async move {
            let mut orchestrator = orchestrator.lock().await;
            if let Err(e) = orchestrator.submit(files).await {
                warn!("Submission ended with {:?} failure", e.kind());
            }
        });
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let (hovering, dropped) =
            ctx.input(|i| (!i.raw.hovered_files.is_empty(), i.raw.dropped_files.clone()));

        let uploading = self.state.is_uploading();
        self.state.drag_active = hovering && !uploading;
        if dropped.is_empty() || uploading {
            return;
        }

        let mut candidates = Vec::with_capacity(dropped.len());
        for file in dropped {
            if let Some(path) = &file.path {
                match CandidateFile::from_path(path) {
                    Ok(candidate) => candidates.push(candidate),
                    Err(e) => warn!("Could not open dropped file {}: {}", path.display(), e),
                }
            } else if let Some(bytes) = file.bytes {
                candidates.push(CandidateFile {
                    mime_type: guess_mime_type(Path::new(&file.name)),
                    size_bytes: bytes.len() as u64,
                    name: file.name,
                    content: FileContent::Memory(bytes),
                });
            }
        }
        self.state.add_candidates(candidates);
    }
}

impl App for WebhookUploader {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);
        self.render(ctx);

        if self.state.status_receiver.borrow().phase != Phase::Idle {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
