#![allow(dead_code)]

use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use webhook_uploader::upload::{
    CandidateFile, TransferRequest, TransferResponse, Transport, TransportError,
    UploadOrchestrator, UploadTiming,
};

pub const ENDPOINT: &str = "http://localhost:5678/webhook-test/upload";

#[derive(Debug, Clone)]
pub enum Reply {
    Status(u16, &'static str),
    UnreadableBody(u16),
    Unreachable,
    RequestFailed(&'static str),
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub request: TransferRequest,
    pub at: tokio::time::Instant,
}

/// Answers requests from a script; once the script runs out every request gets `200 {}`.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedTransport {
    pub fn new(replies: Vec<Reply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_names(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .map(|c| c.request.file_name)
            .collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: TransferRequest) -> Result<TransferResponse, TransportError> {
        // Let status observers run, as a real network call would.
        tokio::task::yield_now().await;
        self.calls.lock().unwrap().push(RecordedCall {
            request,
            at: tokio::time::Instant::now(),
        });

        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Reply::Status(200, "{}"));

        match reply {
            Reply::Status(code, body) => Ok(TransferResponse {
                status: StatusCode::from_u16(code).unwrap(),
                body: Ok(body.as_bytes().to_vec()),
            }),
            Reply::UnreadableBody(code) => Ok(TransferResponse {
                status: StatusCode::from_u16(code).unwrap(),
                body: Err("body stream closed".to_string()),
            }),
            Reply::Unreachable => Err(TransportError::Unreachable {
                reason: "error trying to connect: Connection refused".to_string(),
            }),
            Reply::RequestFailed(reason) => Err(TransportError::Request {
                reason: reason.to_string(),
            }),
        }
    }
}

pub fn orchestrator(transport: Arc<ScriptedTransport>) -> UploadOrchestrator {
    UploadOrchestrator::new(
        transport,
        url::Url::parse(ENDPOINT).unwrap(),
        UploadTiming::default(),
    )
}

pub fn csv(name: &str) -> CandidateFile {
    CandidateFile::from_bytes(name, "text/csv", b"id,value\n1,2\n".to_vec())
}
