mod common;

use common::{csv, orchestrator, ScriptedTransport};
use webhook_uploader::upload::{CandidateFile, Phase, Rejection, SelectionManager};

#[tokio::test(start_paused = true)]
async fn only_accepted_files_reach_the_endpoint() {
    let mut selection = SelectionManager::new();
    let notice = selection
        .add_files(vec![
            csv("first.csv"),
            CandidateFile::from_bytes("empty.txt", "text/plain", Vec::new()),
            csv("second.csv"),
        ])
        .unwrap();
    assert_eq!(notice.rejected, vec![("empty.txt".to_string(), Rejection::Empty)]);
    assert!(notice.to_string().contains("empty.txt: File is empty."));

    let transport = ScriptedTransport::new(vec![]);
    let mut orchestrator = orchestrator(transport.clone());

    let files = selection.take_for_submit(orchestrator.status().phase).unwrap();
    assert!(selection.is_empty());
    assert!(!selection.can_submit(Phase::Idle));

    orchestrator.submit(files).await.unwrap();
    assert_eq!(transport.call_names(), ["first.csv", "second.csv"]);
}
