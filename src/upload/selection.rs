use super::status::Phase;
use super::types::CandidateFile;
use super::validation::{validate, Rejection, Verdict};
use std::fmt;
use tracing::{info, warn};

/// Files from one batch that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectionNotice {
    pub rejected: Vec<(String, Rejection)>,
}

impl fmt::Display for RejectionNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Some files were rejected:")?;
        for (name, reason) in &self.rejected {
            write!(f, "\n{}: {}", name, reason)?;
        }
        Ok(())
    }
}

/// Pending, not yet submitted files in insertion order.
#[derive(Debug, Default)]
pub struct SelectionManager {
    pending: Vec<CandidateFile>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues every accepted file. Rejections never block the rest of the batch.
    pub fn add_files<I>(&mut self, batch: I) -> Option<RejectionNotice>
    where
        I: IntoIterator<Item = CandidateFile>,
    {
        let mut rejected = Vec::new();
        for file in batch {
            match validate(&file) {
                Verdict::Accepted => {
                    info!("Queued {} ({} bytes)", file.name, file.size_bytes);
                    self.pending.push(file);
                }
                Verdict::Rejected(reason) => {
                    warn!("Rejected {}: {}", file.name, reason);
                    rejected.push((file.name, reason));
                }
            }
        }

        if rejected.is_empty() {
            None
        } else {
            Some(RejectionNotice { rejected })
        }
    }

    pub fn remove_at(&mut self, index: usize) {
        if index < self.pending.len() {
            self.pending.remove(index);
        }
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn pending(&self) -> &[CandidateFile] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn can_submit(&self, phase: Phase) -> bool {
        !self.pending.is_empty() && phase != Phase::Uploading
    }

    /// Hands the whole pending list over for upload, leaving the selection empty.
    pub fn take_for_submit(&mut self, phase: Phase) -> Option<Vec<CandidateFile>> {
        if !self.can_submit(phase) {
            return None;
        }
        Some(std::mem::take(&mut self.pending))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, size: usize) -> CandidateFile {
        CandidateFile::from_bytes(name, "text/plain", vec![b'x'; size])
    }

    #[test]
    fn mixed_batch_keeps_valid_files_and_reports_invalid_ones() {
        let mut selection = SelectionManager::new();
        let notice = selection
            .add_files(vec![file("a.csv", 3), file("b.exe", 3), file("c.txt", 3)])
            .expect("one file should be rejected");

        let names: Vec<_> = selection.pending().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["a.csv", "c.txt"]);
        assert_eq!(notice.rejected, vec![("b.exe".to_string(), Rejection::UnsupportedType)]);

        let text = notice.to_string();
        assert!(text.starts_with("Some files were rejected:"));
        assert!(text.contains("b.exe: File type not supported"));
    }

    #[test]
    fn duplicates_are_kept_in_order() {
        let mut selection = SelectionManager::new();
        assert!(selection.add_files(vec![file("a.csv", 1)]).is_none());
        assert!(selection.add_files(vec![file("a.csv", 2)]).is_none());
        assert_eq!(selection.len(), 2);
        assert_eq!(selection.pending()[1].size_bytes, 2);
    }

    #[test]
    fn remove_out_of_range_is_noop() {
        let mut selection = SelectionManager::new();
        selection.add_files(vec![file("a.csv", 1), file("b.csv", 1)]);
        selection.remove_at(5);
        assert_eq!(selection.len(), 2);
        selection.remove_at(0);
        assert_eq!(selection.pending()[0].name, "b.csv");
    }

    #[test]
    fn clear_empties_the_selection() {
        let mut selection = SelectionManager::new();
        selection.add_files(vec![file("a.csv", 1), file("b.txt", 1)]);
        assert!(selection.can_submit(Phase::Idle));

        selection.clear();
        assert!(selection.is_empty());
        assert!(!selection.can_submit(Phase::Idle));

        selection.clear();
        assert_eq!(selection.len(), 0);
    }

    #[test]
    fn submit_gated_on_phase_and_emptiness() {
        let mut selection = SelectionManager::new();
        assert!(selection.take_for_submit(Phase::Idle).is_none());

        selection.add_files(vec![file("a.csv", 1)]);
        assert!(selection.take_for_submit(Phase::Uploading).is_none());
        assert_eq!(selection.len(), 1);

        let files = selection.take_for_submit(Phase::Error).unwrap();
        assert_eq!(files.len(), 1);
        assert!(selection.is_empty());
    }
}
