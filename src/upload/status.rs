//! The upload status record and its transitions.
//!
//! Transitions are pure: `UploadStatus::apply` takes an event and returns the
//! next record. Scheduling of the delayed resets lives in the orchestrator.

use super::error::{FailureKind, GENERIC_FAILURE_HELP};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Uploading,
    Success,
    Error,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Success | Phase::Error)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UploadStatus {
    pub phase: Phase,
    pub message: String,
    pub progress: f32,
    /// Set only in the `Error` phase.
    pub failure: Option<FailureKind>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatusEvent {
    Started,
    FileUploading { index: usize, total: usize, name: String },
    FileProcessing { index: usize, total: usize, name: String },
    Completed { total: usize },
    Failed { kind: FailureKind, message: String },
    Reset,
}

impl UploadStatus {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn apply(&self, event: StatusEvent) -> UploadStatus {
        match event {
            StatusEvent::Started => Self::uploading("Preparing upload...".to_string(), 0.0),
            StatusEvent::FileUploading { index, total, name } => Self::uploading(
                format!("Uploading {}...", name),
                index as f32 / total as f32 * 50.0,
            ),
            StatusEvent::FileProcessing { index, total, name } => Self::uploading(
                format!("Processing {}...", name),
                (index as f32 + 0.5) / total as f32 * 100.0,
            ),
            StatusEvent::Completed { total } => UploadStatus {
                phase: Phase::Success,
                message: format!(
                    "Successfully uploaded and processed {} file{}!",
                    total,
                    if total > 1 { "s" } else { "" }
                ),
                progress: 100.0,
                failure: None,
            },
            StatusEvent::Failed { kind, message } => UploadStatus {
                phase: Phase::Error,
                message,
                progress: 0.0,
                failure: Some(kind),
            },
            StatusEvent::Reset => Self::idle(),
        }
    }

    fn uploading(message: String, progress: f32) -> Self {
        UploadStatus {
            phase: Phase::Uploading,
            message,
            progress,
            failure: None,
        }
    }

    /// Text for the status panel. A connectivity diagnostic is cut to its
    /// first line because the detail box repeats it in full.
    pub fn headline(&self) -> &str {
        match self.failure {
            Some(FailureKind::Connectivity) => self.message.lines().next().unwrap_or_default(),
            _ => self.message.as_str(),
        }
    }

    /// Detail text for the error box: connectivity diagnostics verbatim,
    /// everything else gets the generic help.
    pub fn error_detail(&self) -> Option<&str> {
        match self.failure? {
            FailureKind::Connectivity => Some(self.message.as_str()),
            FailureKind::Transfer | FailureKind::Request | FailureKind::FileRead => {
                Some(GENERIC_FAILURE_HELP)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_follows_file_position() {
        let status = UploadStatus::idle();
        let uploading = status.apply(StatusEvent::FileUploading {
            index: 1,
            total: 4,
            name: "b.csv".into(),
        });
        assert_eq!(uploading.message, "Uploading b.csv...");
        assert_eq!(uploading.progress, 12.5);

        let processing = uploading.apply(StatusEvent::FileProcessing {
            index: 1,
            total: 4,
            name: "b.csv".into(),
        });
        assert_eq!(processing.message, "Processing b.csv...");
        assert_eq!(processing.progress, 37.5);
    }

    #[test]
    fn completion_message_is_pluralized() {
        let one = UploadStatus::idle().apply(StatusEvent::Completed { total: 1 });
        assert_eq!(one.message, "Successfully uploaded and processed 1 file!");
        assert_eq!(one.progress, 100.0);

        let many = UploadStatus::idle().apply(StatusEvent::Completed { total: 3 });
        assert_eq!(many.message, "Successfully uploaded and processed 3 files!");
    }

    #[test]
    fn reset_restores_idle_invariants() {
        let failed = UploadStatus::idle().apply(StatusEvent::Failed {
            kind: FailureKind::Transfer,
            message: "Upload failed (500)".into(),
        });
        assert_eq!(failed.error_detail(), Some(GENERIC_FAILURE_HELP));

        let idle = failed.apply(StatusEvent::Reset);
        assert_eq!(idle.phase, Phase::Idle);
        assert_eq!(idle.message, "");
        assert_eq!(idle.progress, 0.0);
        assert_eq!(idle.failure, None);
    }

    #[test]
    fn connectivity_detail_is_passed_through() {
        let failed = UploadStatus::idle().apply(StatusEvent::Failed {
            kind: FailureKind::Connectivity,
            message: "Cannot connect".into(),
        });
        assert_eq!(failed.error_detail(), Some("Cannot connect"));
    }

    #[test]
    fn headline_keeps_transfer_response_body() {
        let transfer = UploadStatus::idle().apply(StatusEvent::Failed {
            kind: FailureKind::Transfer,
            message: "Upload failed (500): Internal Server Error\nResponse: workflow crashed".into(),
        });
        assert_eq!(transfer.headline(), transfer.message);
        assert!(transfer.headline().contains("Response: workflow crashed"));

        let connectivity = UploadStatus::idle().apply(StatusEvent::Failed {
            kind: FailureKind::Connectivity,
            message: "Cannot connect to n8n webhook. Please ensure:\n\n1. n8n is running".into(),
        });
        assert_eq!(connectivity.headline(), "Cannot connect to n8n webhook. Please ensure:");
    }
}
