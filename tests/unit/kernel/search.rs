use super::*;

fn m(path: &str, line_number: usize) -> Match {
    Match {
        file_path: PathBuf::from(path),
        line_number,
        line_text: "text".to_string(),
        match_start: 0,
        match_end: 4,
    }
}

#[test]
fn test_request_trims_and_rejects_empty() {
    let mut state = SearchState::default();
    state.set_query("   ");
    assert!(state.request(Path::new("/w")).is_none());

    state.set_query("  needle ");
    state.toggle_case_sensitive();
    state.toggle_whole_word();
    let request = state.request(Path::new("/w")).unwrap();
    assert_eq!(request.term, "needle");
    assert!(request.case_sensitive);
    assert!(request.whole_word);
    assert!(!request.use_regex);
    assert_eq!(request.root_path, PathBuf::from("/w"));
}

#[test]
fn test_groups_matches_by_file() {
    let mut state = SearchState::default();
    state.begin_search(1);

    assert!(state.apply_message(GlobalSearchMessage::Match { generation: 1, item: m("a", 1) }));
    assert!(state.apply_message(GlobalSearchMessage::Match { generation: 1, item: m("b", 3) }));
    assert!(state.apply_message(GlobalSearchMessage::Match { generation: 1, item: m("a", 5) }));

    assert_eq!(state.file_count(), 2);
    assert_eq!(state.total_matches, 3);
    assert_eq!(state.files[0].matches.len(), 2);
    assert_eq!(state.location(0, 1), Some((Path::new("a"), 5)));
    assert_eq!(state.location(1, 0), Some((Path::new("b"), 3)));
    assert_eq!(state.location(2, 0), None);
}

#[test]
fn test_drops_other_generations() {
    let mut state = SearchState::default();
    state.begin_search(2);

    assert!(!state.apply_message(GlobalSearchMessage::Match { generation: 1, item: m("a", 1) }));
    assert!(!state.apply_message(GlobalSearchMessage::Summary {
        generation: 1,
        summary: SearchSummary::default(),
    }));
    assert!(state.searching);
    assert_eq!(state.total_matches, 0);
}

#[test]
fn test_terminal_events() {
    let mut state = SearchState::default();
    state.begin_search(1);
    let summary = SearchSummary {
        files_scanned: 4,
        matches_found: 0,
    };
    assert!(state.apply_message(GlobalSearchMessage::Summary { generation: 1, summary }));
    assert!(!state.searching);
    assert_eq!(state.summary(), Some(summary));

    // 终止之后的事件不再改变状态
    assert!(!state.apply_message(GlobalSearchMessage::Match { generation: 1, item: m("a", 1) }));

    state.begin_search(2);
    assert!(state.apply_message(GlobalSearchMessage::Error {
        generation: 2,
        error: SearchError::InvalidPattern("unclosed group".to_string()),
    }));
    assert_eq!(state.outcome, Some(SearchOutcome::Failed));
    assert_eq!(
        state.last_error.as_deref(),
        Some("Invalid pattern: unclosed group")
    );

    state.begin_search(3);
    assert!(state.last_error.is_none());
    assert!(state.apply_message(GlobalSearchMessage::Cancelled { generation: 3 }));
    assert_eq!(state.outcome, Some(SearchOutcome::Cancelled));
    assert_eq!(state.summary(), None);
}
