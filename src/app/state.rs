use crate::upload::{CandidateFile, Phase, RejectionNotice, SelectionManager, UploadStatus};
use tokio::sync::watch;

pub struct UploaderState {
    pub selection: SelectionManager,
    pub status_receiver: watch::Receiver<UploadStatus>,
    pub rejection_notice: Option<RejectionNotice>,
    pub error_message: Option<String>,
    pub drag_active: bool,
}

impl UploaderState {
    pub fn new(status_receiver: watch::Receiver<UploadStatus>) -> Self {
        Self {
            selection: SelectionManager::new(),
            status_receiver,
            rejection_notice: None,
            error_message: None,
            drag_active: false,
        }
    }

    pub fn status(&self) -> UploadStatus {
        self.status_receiver.borrow().clone()
    }

    pub fn is_uploading(&self) -> bool {
        self.status_receiver.borrow().phase == Phase::Uploading
    }

    pub fn can_submit(&self) -> bool {
        self.selection.can_submit(self.status_receiver.borrow().phase)
    }

    /// Validates and queues a batch; a new notice replaces the previous one.
    pub fn add_candidates(&mut self, files: Vec<CandidateFile>) {
        if files.is_empty() {
            return;
        }
        if let Some(notice) = self.selection.add_files(files) {
            self.rejection_notice = Some(notice);
        }
    }

    pub fn take_for_submit(&mut self) -> Option<Vec<CandidateFile>> {
        let phase = self.status_receiver.borrow().phase;
        self.selection.take_for_submit(phase)
    }

    pub fn get_progress_fraction(&self) -> f32 {
        (self.status_receiver.borrow().progress / 100.0).clamp(0.0, 1.0)
    }

    pub fn submit_label(&self) -> String {
        if self.is_uploading() {
            return "Uploading...".to_string();
        }
        let count = self.selection.len();
        format!("Upload {} File{}", count, if count > 1 { "s" } else { "" })
    }
}
