//! Client-side checks applied to every file before it is queued.
//!
//! Only metadata is inspected: the extension of the name and the reported size.

use super::types::CandidateFile;
use thiserror::Error;

pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["csv", "txt", "pdf"];
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("File type not supported. Please upload CSV, TXT, or PDF files only.")]
    UnsupportedType,
    #[error("File size too large. Maximum size is 10MB.")]
    TooLarge,
    #[error("File is empty.")]
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected(Rejection),
}

/// First failing rule wins: type, then size, then emptiness.
pub fn validate(file: &CandidateFile) -> Verdict {
    if !ACCEPTED_EXTENSIONS.contains(&file.extension().as_str()) {
        return Verdict::Rejected(Rejection::UnsupportedType);
    }
    if file.size_bytes > MAX_FILE_SIZE {
        return Verdict::Rejected(Rejection::TooLarge);
    }
    if file.size_bytes == 0 {
        return Verdict::Rejected(Rejection::Empty);
    }
    Verdict::Accepted
}
