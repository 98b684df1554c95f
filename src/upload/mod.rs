mod error;
mod orchestrator;
mod selection;
mod status;
mod transport;
mod types;
mod validation;

pub use error::{
    connectivity_diagnostic, FailureKind, TransportError, UploadError, GENERIC_FAILURE_HELP,
};
pub use orchestrator::{UploadOrchestrator, UploadTiming};
pub use selection::{RejectionNotice, SelectionManager};
pub use status::{Phase, StatusEvent, UploadStatus};
pub use transport::{HttpTransport, TransferRequest, TransferResponse, Transport};
pub use types::{guess_mime_type, CandidateFile, FileContent, UploadedFile};
pub use validation::{validate, Rejection, Verdict, ACCEPTED_EXTENSIONS, MAX_FILE_SIZE};
