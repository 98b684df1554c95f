use thiserror::Error;
use url::Url;

/// Shown for every failure that is not a connectivity problem.
pub const GENERIC_FAILURE_HELP: &str = "Please check that your n8n instance is running and the webhook URL is correct.\nIf the problem persists, try uploading smaller files or contact support.";

/// Raised by a transport that got no response from the endpoint.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The endpoint could not be reached at all.
    #[error("Failed to connect: {reason}")]
    Unreachable { reason: String },
    /// Timeouts, request build errors and other failures after connecting.
    #[error("Failed to send request: {reason}")]
    Request { reason: String },
}

/// Discriminant of a fatal upload failure, fixed where the failure happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Connectivity,
    Transfer,
    Request,
    FileRead,
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("{diagnostic}")]
    Connectivity { diagnostic: String },

    #[error("Upload failed ({status}): {status_text}\nResponse: {body}")]
    Transfer {
        status: u16,
        status_text: String,
        body: String,
    },

    #[error("Upload failed: {reason}")]
    Request { reason: String },

    #[error("Failed to read {name}: {source}")]
    FileRead {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

impl UploadError {
    pub fn connectivity(endpoint: &Url) -> Self {
        UploadError::Connectivity {
            diagnostic: connectivity_diagnostic(endpoint),
        }
    }

    /// Only an unreachable endpoint gets the connectivity diagnostic; any
    /// other transport failure keeps its own message.
    pub fn from_transport(error: TransportError, endpoint: &Url) -> Self {
        match error {
            TransportError::Unreachable { .. } => UploadError::connectivity(endpoint),
            TransportError::Request { reason } => UploadError::Request { reason },
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            UploadError::Connectivity { .. } => FailureKind::Connectivity,
            UploadError::Transfer { .. } => FailureKind::Transfer,
            UploadError::Request { .. } => FailureKind::Request,
            UploadError::FileRead { .. } => FailureKind::FileRead,
        }
    }
}

/// Remediation text for an unreachable webhook, filled in from the configured URL.
pub fn connectivity_diagnostic(endpoint: &Url) -> String {
    let host = endpoint.host_str().unwrap_or("localhost");
    let address = match endpoint.port_or_known_default() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    };

    format!(
        "Cannot connect to n8n webhook. Please ensure:\n\n\
         1. n8n is running on {}\n\
         2. The webhook endpoint \"{}\" exists\n\
         3. CORS is properly configured in n8n\n\n\
         To fix CORS, restart n8n with:\n\
         n8n start --cors-origin=\"*\"\n\n\
         Or set environment variable:\n\
         N8N_CORS_ORIGIN=*",
        address,
        endpoint.path()
    )
}
