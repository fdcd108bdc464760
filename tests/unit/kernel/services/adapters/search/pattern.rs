use super::*;

fn spans(pattern: &CompiledPattern, line: &str) -> Vec<(usize, usize)> {
    pattern
        .find_spans(line)
        .into_iter()
        .map(|s| (s.start, s.end))
        .collect()
}

#[test]
fn test_case_insensitive_keeps_original_spans() {
    let pattern = CompiledPattern::compile("Foo", false, false, false).unwrap();
    assert_eq!(
        spans(&pattern, "foo FOO Foo"),
        vec![(0, 3), (4, 7), (8, 11)]
    );
}

#[test]
fn test_case_sensitive() {
    let pattern = CompiledPattern::compile("Foo", true, false, false).unwrap();
    assert_eq!(spans(&pattern, "foo FOO Foo"), vec![(8, 11)]);
}

#[test]
fn test_whole_word() {
    let pattern = CompiledPattern::compile("cat", true, true, false).unwrap();
    assert_eq!(spans(&pattern, "concatenate cat category"), vec![(12, 15)]);
}

#[test]
fn test_literal_escapes_metacharacters() {
    let pattern = CompiledPattern::compile("a.b(", true, false, false).unwrap();
    assert_eq!(spans(&pattern, "axb( a.b("), vec![(5, 9)]);
}

#[test]
fn test_whole_word_wraps_alternation() {
    let pattern = CompiledPattern::compile("cat|dog", true, true, true).unwrap();
    assert_eq!(spans(&pattern, "dogma dog cat"), vec![(6, 9), (10, 13)]);
}

#[test]
fn test_spans_are_char_offsets() {
    let pattern = CompiledPattern::compile("世界", true, false, false).unwrap();
    assert_eq!(spans(&pattern, "你好世界 hi 世界"), vec![(2, 4), (8, 10)]);
}

#[test]
fn test_non_overlapping() {
    let pattern = CompiledPattern::compile("aa", true, false, false).unwrap();
    assert_eq!(spans(&pattern, "aaaaa"), vec![(0, 2), (2, 4)]);
}

#[test]
fn test_empty_matches_are_skipped() {
    let pattern = CompiledPattern::compile("x*", true, false, true).unwrap();
    assert_eq!(spans(&pattern, "abxxc"), vec![(2, 4)]);
}

#[test]
fn test_invalid_regex() {
    let err = CompiledPattern::compile("(unclosed", true, false, true).unwrap_err();
    match err {
        SearchError::InvalidPattern(msg) => assert!(msg.contains("unclosed group")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_unbalanced_paren_is_fine_as_literal() {
    let pattern = CompiledPattern::compile("(unclosed", true, false, false).unwrap();
    assert_eq!(spans(&pattern, "f(unclosed"), vec![(1, 10)]);
}
