//! Sequential upload of a submitted batch.
//!
//! Files are sent one at a time in list order. The first failure aborts the
//! rest of the batch. After a terminal phase the status falls back to idle on
//! a timer; any newer submit cancels that timer first.

use super::error::UploadError;
use super::status::{StatusEvent, UploadStatus};
use super::transport::{TransferRequest, Transport};
use super::types::{CandidateFile, UploadedFile};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTiming {
    /// Pause after each processed file.
    pub settle_delay: Duration,
    pub success_reset: Duration,
    pub error_reset: Duration,
}

impl Default for UploadTiming {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(1000),
            success_reset: Duration::from_millis(5000),
            error_reset: Duration::from_millis(10000),
        }
    }
}

pub struct UploadOrchestrator {
    transport: Arc<dyn Transport>,
    endpoint: Url,
    timing: UploadTiming,
    status: Arc<watch::Sender<UploadStatus>>,
    pending_reset: Option<JoinHandle<()>>,
}

impl UploadOrchestrator {
    pub fn new(transport: Arc<dyn Transport>, endpoint: Url, timing: UploadTiming) -> Self {
        let (status, _) = watch::channel(UploadStatus::idle());
        Self {
            transport,
            endpoint,
            timing,
            status: Arc::new(status),
            pending_reset: None,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<UploadStatus> {
        self.status.subscribe()
    }

    pub fn status(&self) -> UploadStatus {
        self.status.borrow().clone()
    }

    /// Uploads `files` in order. Callers gate this on the current phase not
    /// being `Uploading`.
    pub async fn submit(
        &mut self,
        files: Vec<CandidateFile>,
    ) -> Result<Vec<UploadedFile>, UploadError> {
        if files.is_empty() {
            warn!("Ignoring submit with no files");
            return Ok(Vec::new());
        }

        self.cancel_pending_reset();

        let total = files.len();
        info!("Starting upload of {} file(s) to {}", total, self.endpoint);
        self.transition(StatusEvent::Started);

        match self.upload_all(files).await {
            Ok(uploaded) => {
                info!("Uploaded {} file(s)", uploaded.len());
                self.transition(StatusEvent::Completed { total });
                self.schedule_reset(self.timing.success_reset);
                Ok(uploaded)
            }
            Err(e) => {
                error!("Upload error: {}", e);
                self.transition(StatusEvent::Failed {
                    kind: e.kind(),
                    message: e.to_string(),
                });
                self.schedule_reset(self.timing.error_reset);
                Err(e)
            }
        }
    }

    async fn upload_all(&self, files: Vec<CandidateFile>) -> Result<Vec<UploadedFile>, UploadError> {
        let total = files.len();
        let mut uploaded = Vec::with_capacity(total);

        for (index, file) in files.into_iter().enumerate() {
            uploaded.push(self.upload_file(index, total, file).await?);
            tokio::time::sleep(self.timing.settle_delay).await;
        }

        Ok(uploaded)
    }

    async fn upload_file(
        &self,
        index: usize,
        total: usize,
        file: CandidateFile,
    ) -> Result<UploadedFile, UploadError> {
        let bytes = file
            .content
            .read()
            .await
            .map_err(|source| UploadError::FileRead {
                name: file.name.clone(),
                source,
            })?;

        let name = file.name;
        let request = TransferRequest {
            file_name: name.clone(),
            file_type: file.mime_type,
            file_size: file.size_bytes,
            bytes,
        };

        self.transition(StatusEvent::FileUploading {
            index,
            total,
            name: name.clone(),
        });
        info!("Uploading {} ({}/{})", name, index + 1, total);

        let response = self.transport.send(request).await.map_err(|e| {
            warn!("Request to {} failed: {}", self.endpoint, e);
            UploadError::from_transport(e, &self.endpoint)
        })?;

        if !response.is_success() {
            return Err(UploadError::Transfer {
                status: response.status.as_u16(),
                status_text: response.status_text().to_string(),
                body: response.text().unwrap_or_else(|| "Unknown error".to_string()),
            });
        }

        self.transition(StatusEvent::FileProcessing {
            index,
            total,
            name: name.clone(),
        });

        let result = match response.json() {
            Ok(value) => {
                debug!("Upload result for {}: {}", name, value);
                Some(value)
            }
            Err(e) => {
                debug!("Upload of {} completed, response was not JSON: {}", name, e);
                None
            }
        };

        Ok(UploadedFile { name, result })
    }

    fn transition(&self, event: StatusEvent) {
        self.status.send_modify(|status| {
            let next = status.apply(event);
            *status = next;
        });
    }

    fn schedule_reset(&mut self, delay: Duration) {
        let status = Arc::clone(&self.status);
        self.pending_reset = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            status.send_if_modified(|current| {
                if !current.phase.is_terminal() {
                    return false;
                }
                *current = current.apply(StatusEvent::Reset);
                true
            });
        }));
    }

    fn cancel_pending_reset(&mut self) {
        if let Some(handle) = self.pending_reset.take() {
            if !handle.is_finished() {
                debug!("Cancelling pending status reset");
            }
            handle.abort();
        }
    }
}
