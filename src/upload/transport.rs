use super::error::TransportError;
use async_trait::async_trait;
use mime_guess::Mime;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// One file and its accompanying form fields.
#[derive(Debug, Clone)]
pub struct TransferRequest {
    pub file_name: String,
    pub file_type: String,
    pub file_size: u64,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct TransferResponse {
    pub status: StatusCode,
    /// `Err` when the body could not be read.
    pub body: Result<Vec<u8>, String>,
}

impl TransferResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn status_text(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or("")
    }

    pub fn text(&self) -> Option<String> {
        self.body
            .as_ref()
            .ok()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn json(&self) -> Result<serde_json::Value, String> {
        let bytes = self.body.as_ref().map_err(Clone::clone)?;
        serde_json::from_slice(bytes).map_err(|e| e.to_string())
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: TransferRequest) -> Result<TransferResponse, TransportError>;
}

/// POSTs each file as multipart form data to the configured webhook.
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpTransport {
    pub fn new(endpoint: Url, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint,
        })
    }

    fn build_form(request: TransferRequest) -> Result<Form, reqwest::Error> {
        let part = Part::bytes(request.bytes).file_name(request.file_name.clone());
        let part = if request.file_type.parse::<Mime>().is_ok() {
            part.mime_str(&request.file_type)?
        } else {
            debug!("Sending {} without a MIME type", request.file_name);
            part
        };

        Ok(Form::new()
            .part("file", part)
            .text("fileName", request.file_name)
            .text("fileType", request.file_type)
            .text("fileSize", request.file_size.to_string()))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: TransferRequest) -> Result<TransferResponse, TransportError> {
        let form = Self::build_form(request).map_err(classify_error)?;

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(classify_error)?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| e.to_string());

        Ok(TransferResponse { status, body })
    }
}

/// Connect failures mean the endpoint was never reached; everything else,
/// timeouts included, happened with a reachable server or before sending.
fn classify_error(error: reqwest::Error) -> TransportError {
    let reason = error.to_string();
    if error.is_connect() {
        TransportError::Unreachable { reason }
    } else {
        TransportError::Request { reason }
    }
}
