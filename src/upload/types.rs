use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Bytes of a selected file. Files picked from disk are only read when they
/// are about to be transferred.
#[derive(Debug, Clone)]
pub enum FileContent {
    Memory(Arc<[u8]>),
    Disk(PathBuf),
}

impl FileContent {
    pub async fn read(&self) -> io::Result<Vec<u8>> {
        match self {
            FileContent::Memory(bytes) => Ok(bytes.to_vec()),
            FileContent::Disk(path) => tokio::fs::read(path).await,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CandidateFile {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub content: FileContent,
}

impl CandidateFile {
    pub fn from_bytes(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes: bytes.len() as u64,
            content: FileContent::Memory(bytes.into()),
        }
    }

    /// Builds a candidate from file metadata. The content stays on disk.
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Invalid filename"))?;

        Ok(Self {
            mime_type: guess_mime_type(path),
            name,
            size_bytes: metadata.len(),
            content: FileContent::Disk(path.to_path_buf()),
        })
    }

    /// Lowercased text after the last `.`; a name without a dot is its own extension.
    pub fn extension(&self) -> String {
        self.name
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_lowercase()
    }
}

pub fn guess_mime_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or_default()
        .to_string()
}

/// A file the endpoint accepted.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub result: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn extension_is_lowercased_suffix() {
        let file = CandidateFile::from_bytes("Report.Final.CSV", "text/csv", vec![1]);
        assert_eq!(file.extension(), "csv");

        let file = CandidateFile::from_bytes("README", "", vec![1]);
        assert_eq!(file.extension(), "readme");
    }

    #[tokio::test]
    async fn disk_content_is_read_on_demand() {
        let mut tmp = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        tmp.write_all(b"hello").unwrap();

        let file = CandidateFile::from_path(tmp.path()).unwrap();
        assert_eq!(file.size_bytes, 5);
        assert_eq!(file.mime_type, "text/plain");
        assert_eq!(file.content.read().await.unwrap(), b"hello");
    }
}
