//! End-to-end tokenization scenarios.
//!
//! These tests drive the full pipeline (segmentation, cache, affix
//! peeling, infix split, specials) through a small illustrative rule set:
//! no prefix pattern, a `.`/`,` suffix, a `-` infix, and two specials.

use chunklex::{LanguageData, Tokenizer};

fn scenario_tokenizer() -> Tokenizer {
    let data = LanguageData {
        rules: vec![
            (
                "ain't".to_string(),
                vec!["are".to_string(), "not".to_string()],
            ),
            ("U.S.".to_string(), vec!["U.S.".to_string()]),
        ],
        prefix: None,
        suffix: Some(r"[\.,]".to_string()),
        infix: Some("-".to_string()),
        lexemes: Vec::new(),
    };
    Tokenizer::new(data).unwrap()
}

fn surfaces(tokenizer: &mut Tokenizer, text: &str) -> Vec<String> {
    let tokens = tokenizer.tokenize(text);
    tokens
        .surfaces(tokenizer.lexicon())
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[test]
fn test_empty_input_yields_no_tokens() {
    let mut tokenizer = scenario_tokenizer();
    assert!(tokenizer.tokenize("").is_empty());
}

#[test]
fn test_single_word() {
    let mut tokenizer = scenario_tokenizer();
    assert_eq!(surfaces(&mut tokenizer, "hello"), ["hello"]);
}

#[test]
fn test_sentence_with_suffix_punctuation() {
    let mut tokenizer = scenario_tokenizer();
    assert_eq!(
        surfaces(&mut tokenizer, "hello, world."),
        ["hello", ",", "world", "."]
    );
}

#[test]
fn test_special_case_expansion() {
    let mut tokenizer = scenario_tokenizer();
    assert_eq!(surfaces(&mut tokenizer, "ain't"), ["are", "not"]);
}

#[test]
fn test_special_case_blocks_suffix_peeling() {
    // Without the special, the suffix rule would peel both dots off
    // "U.S.". The preseeded expansion takes priority.
    let mut tokenizer = scenario_tokenizer();
    assert_eq!(surfaces(&mut tokenizer, "U.S."), ["U.S."]);
}

#[test]
fn test_single_infix_split_per_residual() {
    let mut tokenizer = scenario_tokenizer();
    assert_eq!(
        surfaces(&mut tokenizer, "state-of-the-art."),
        ["state", "-", "of-the-art", "."]
    );
}

#[test]
fn test_offsets_are_monotonic() {
    let mut tokenizer = scenario_tokenizer();
    for text in [
        "hello, world.",
        "ain't it state-of-the-art.",
        "  spaced   out  ",
        "U.S. of A",
    ] {
        let tokens = tokenizer.tokenize(text);
        let offsets: Vec<usize> = tokens.iter().map(|t| t.offset).collect();
        assert!(
            offsets.windows(2).all(|w| w[0] <= w[1]),
            "offsets not monotonic for {text:?}: {offsets:?}"
        );
    }
}

#[test]
fn test_text_reconstruction() {
    // Exact for every input whose tokenization does not pass through a
    // surface-rewriting special.
    let mut tokenizer = scenario_tokenizer();
    for text in [
        "hello, world.",
        "state-of-the-art.",
        "a  b",
        "tabs\tand\nnewlines",
        "  leading and trailing  ",
        "   ",
    ] {
        let tokens = tokenizer.tokenize(text);
        assert_eq!(tokens.text_with_ws(tokenizer.lexicon()), text, "{text:?}");
    }
}

#[test]
fn test_tokenization_is_idempotent() {
    let mut tokenizer = scenario_tokenizer();
    let text = "hello, world. ain't state-of-the-art.";

    let first: Vec<_> = tokenizer
        .tokenize(text)
        .iter()
        .map(|t| (t.lexeme, t.offset, t.space_after))
        .collect();
    let lexemes_after_first = tokenizer.lexicon().len();
    let cache_after_first = tokenizer.cache_len();

    let second: Vec<_> = tokenizer
        .tokenize(text)
        .iter()
        .map(|t| (t.lexeme, t.offset, t.space_after))
        .collect();

    assert_eq!(first, second);
    assert_eq!(tokenizer.lexicon().len(), lexemes_after_first);
    assert_eq!(tokenizer.cache_len(), cache_after_first);
}

#[test]
fn test_lexemes_shared_across_inputs() {
    let mut tokenizer = scenario_tokenizer();
    let a = tokenizer.tokenize("hello world");
    let b = tokenizer.tokenize("world hello");
    let a_ids: Vec<_> = a.iter().map(|t| t.lexeme).collect();
    let b_ids: Vec<_> = b.iter().map(|t| t.lexeme).collect();
    assert_eq!(a_ids[0], b_ids[1]);
    assert_eq!(a_ids[1], b_ids[0]);
}

#[test]
fn test_whitespace_chunks_become_tokens() {
    let mut tokenizer = scenario_tokenizer();
    // Two spaces: one is consumed at the transition, one survives as a
    // whitespace chunk.
    assert_eq!(surfaces(&mut tokenizer, "a  b"), ["a", " ", "b"]);
    assert_eq!(surfaces(&mut tokenizer, "a\t\tb"), ["a", "\t\t", "b"]);
}

#[test]
fn test_special_inside_larger_sentence() {
    let mut tokenizer = scenario_tokenizer();
    assert_eq!(
        surfaces(&mut tokenizer, "it ain't over."),
        ["it", "are", "not", "over", "."]
    );
}

#[test]
fn test_suffix_peeling_exposes_special() {
    // "ain't," peels the comma, then the remainder hits the special
    // table from inside the peeling loop.
    let mut tokenizer = scenario_tokenizer();
    assert_eq!(surfaces(&mut tokenizer, "ain't,"), ["are", "not", ","]);
}
