use super::*;
use crate::kernel::services::ports::Match;
use std::fs;
use std::path::Path;
use std::sync::mpsc;
use tempfile::tempdir;

fn default_rules() -> Arc<IgnoreRules> {
    Arc::new(IgnoreRules::new(["node_modules", ".git"], [".png"]))
}

fn run(request: SearchRequest, options: WorkerOptions) -> (WorkerState, Vec<GlobalSearchMessage>) {
    let (tx, rx) = mpsc::sync_channel(1024);
    let worker = SearchWorker::new(request, default_rules(), options, CancelToken::new(7), tx);
    assert_eq!(worker.state(), WorkerState::Idle);
    let state = worker.run();
    (state, rx.try_iter().collect())
}

fn matches_of(messages: &[GlobalSearchMessage]) -> Vec<&Match> {
    messages
        .iter()
        .filter_map(|m| match m {
            GlobalSearchMessage::Match { item, .. } => Some(item),
            _ => None,
        })
        .collect()
}

fn write_tree(root: &Path) {
    fs::create_dir_all(root.join("src")).unwrap();
    fs::create_dir_all(root.join("node_modules/dep")).unwrap();
    fs::write(root.join("src/a.txt"), "hello world\nsay hello hello\n").unwrap();
    fs::write(root.join("src/b.txt"), "nothing here\n").unwrap();
    fs::write(root.join("node_modules/dep/c.txt"), "hello\n").unwrap();
    fs::write(root.join("logo.png"), "hello\n").unwrap();
}

#[test]
fn test_literal_search_counts_every_occurrence() {
    let dir = tempdir().unwrap();
    write_tree(dir.path());

    let (state, messages) = run(
        SearchRequest::new(dir.path(), "hello").case_sensitive(true),
        WorkerOptions::default(),
    );

    assert_eq!(state, WorkerState::Completed);
    let matches = matches_of(&messages);
    assert_eq!(matches.len(), 3);
    assert!(matches.iter().all(|m| m.file_path.ends_with("src/a.txt")));
    let positions: Vec<_> = matches
        .iter()
        .map(|m| (m.line_number, m.match_start))
        .collect();
    assert_eq!(positions, vec![(1, 0), (2, 4), (2, 10)]);

    assert_eq!(
        messages.last(),
        Some(&GlobalSearchMessage::Summary {
            generation: 7,
            summary: SearchSummary {
                files_scanned: 2,
                matches_found: 3,
            },
        })
    );
    assert!(messages.iter().all(|m| m.generation() == 7));
}

#[test]
fn test_invalid_regex_aborts_before_scanning() {
    let dir = tempdir().unwrap();
    write_tree(dir.path());

    let (state, messages) = run(
        SearchRequest::new(dir.path(), "(hello").use_regex(true),
        WorkerOptions::default(),
    );

    assert_eq!(state, WorkerState::Errored);
    assert!(state.is_terminal());
    assert_eq!(messages.len(), 1);
    match &messages[0] {
        GlobalSearchMessage::Error { generation, error } => {
            assert_eq!(*generation, 7);
            assert_eq!(
                error.kind(),
                crate::kernel::services::ports::SearchErrorKind::InvalidPattern
            );
        }
        other => panic!("unexpected message: {other:?}"),
    }
}

#[test]
fn test_invalid_regex_never_touches_missing_root() {
    let dir = tempdir().unwrap();
    let (state, messages) = run(
        SearchRequest::new(dir.path().join("does-not-exist"), "a)").use_regex(true),
        WorkerOptions::default(),
    );
    assert_eq!(state, WorkerState::Errored);
    assert_eq!(messages.len(), 1);
}

#[test]
fn test_ignored_root_completes_empty() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("node_modules");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("a.txt"), "hello\n").unwrap();

    let (state, messages) = run(SearchRequest::new(&root, "hello"), WorkerOptions::default());

    assert_eq!(state, WorkerState::Completed);
    assert_eq!(
        messages,
        vec![GlobalSearchMessage::Summary {
            generation: 7,
            summary: SearchSummary::default(),
        }]
    );
}

#[test]
fn test_empty_term_completes_immediately() {
    let dir = tempdir().unwrap();
    write_tree(dir.path());

    let (state, messages) = run(SearchRequest::new(dir.path(), ""), WorkerOptions::default());
    assert_eq!(state, WorkerState::Completed);
    assert_eq!(messages.len(), 1);
    assert!(matches!(
        messages[0],
        GlobalSearchMessage::Summary { summary, .. } if summary == SearchSummary::default()
    ));
}

#[test]
fn test_binary_files_are_not_counted() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("text.txt"), "hello world").unwrap();
    fs::write(dir.path().join("blob.dat"), b"hello\x00world").unwrap();

    let (_, messages) = run(SearchRequest::new(dir.path(), "hello"), WorkerOptions::default());
    assert_eq!(matches_of(&messages).len(), 1);
    assert!(matches!(
        messages.last(),
        Some(GlobalSearchMessage::Summary { summary, .. }) if summary.files_scanned == 1
    ));
}

#[test]
fn test_whole_word_and_case_insensitive() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("words.txt"), "concatenate cat category\nCAT\n").unwrap();

    let (_, messages) = run(
        SearchRequest::new(dir.path(), "cat").whole_word(true),
        WorkerOptions::default(),
    );
    let matches = matches_of(&messages);
    let found: Vec<_> = matches
        .iter()
        .map(|m| (m.line_number, m.match_start, m.match_end))
        .collect();
    assert_eq!(found, vec![(1, 12, 15), (2, 0, 3)]);
}

#[test]
fn test_cancelled_before_run_emits_cancelled() {
    let dir = tempdir().unwrap();
    write_tree(dir.path());

    let (tx, rx) = mpsc::sync_channel(1024);
    let token = CancelToken::new(3);
    token.cancel();
    let worker = SearchWorker::new(
        SearchRequest::new(dir.path(), "hello"),
        default_rules(),
        WorkerOptions::default(),
        token,
        tx,
    );

    assert_eq!(worker.run(), WorkerState::Cancelled);
    let messages: Vec<_> = rx.try_iter().collect();
    assert_eq!(messages, vec![GlobalSearchMessage::Cancelled { generation: 3 }]);
}

#[test]
fn test_dropped_receiver_stops_worker() {
    let dir = tempdir().unwrap();
    write_tree(dir.path());

    let (tx, rx) = mpsc::sync_channel(1024);
    drop(rx);
    let worker = SearchWorker::new(
        SearchRequest::new(dir.path(), "hello"),
        default_rules(),
        WorkerOptions::default(),
        CancelToken::new(1),
        tx,
    );
    assert_eq!(worker.run(), WorkerState::Cancelled);
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_reported_when_enabled() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let locked = dir.path().join("locked.txt");
    fs::write(&locked, "hello\n").unwrap();
    fs::write(dir.path().join("open.txt"), "hello\n").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // root 用户可以读取任何文件，此时无法构造读取失败
    if fs::read(&locked).is_ok() {
        return;
    }

    let options = WorkerOptions {
        report_unreadable_files: true,
        ..WorkerOptions::default()
    };
    let (state, messages) = run(SearchRequest::new(dir.path(), "hello"), options);
    assert_eq!(state, WorkerState::Completed);

    let file_errors: Vec<_> = messages
        .iter()
        .filter(|m| matches!(m, GlobalSearchMessage::FileError { .. }))
        .collect();
    assert_eq!(file_errors.len(), 1);
    assert!(matches!(
        messages.last(),
        Some(GlobalSearchMessage::Summary { summary, .. })
            if summary.files_scanned == 1 && summary.matches_found == 1
    ));
}
