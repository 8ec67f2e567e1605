//! Ready-to-use rule sets.
//!
//! Each preset returns an owned [`LanguageData`] that the generic
//! constructor accepts, so the crate is usable without an external data
//! directory. The patterns here are deliberately small; a real deployment
//! loads its rules from per-language data files.

use super::rules::LanguageData;

/// Punctuation-and-contractions rules for English text.
///
/// Opening punctuation peels from the front, closing punctuation and
/// sentence-final marks from the back, and hyphens, dashes, and slashes
/// split inside a chunk. The specials split common contractions on their
/// clitic boundary and keep frequent abbreviations intact.
pub fn english() -> LanguageData {
    let specials: &[(&str, &[&str])] = &[
        ("ain't", &["ai", "n't"]),
        ("aren't", &["are", "n't"]),
        ("can't", &["ca", "n't"]),
        ("couldn't", &["could", "n't"]),
        ("don't", &["do", "n't"]),
        ("doesn't", &["does", "n't"]),
        ("didn't", &["did", "n't"]),
        ("isn't", &["is", "n't"]),
        ("won't", &["wo", "n't"]),
        ("wouldn't", &["would", "n't"]),
        ("it's", &["it", "'s"]),
        ("I'm", &["I", "'m"]),
        ("I'll", &["I", "'ll"]),
        ("I've", &["I", "'ve"]),
        ("you're", &["you", "'re"]),
        ("we've", &["we", "'ve"]),
        ("let's", &["let", "'s"]),
        ("U.S.", &["U.S."]),
        ("U.K.", &["U.K."]),
        ("e.g.", &["e.g."]),
        ("i.e.", &["i.e."]),
        ("etc.", &["etc."]),
        ("Mr.", &["Mr."]),
        ("Mrs.", &["Mrs."]),
        ("Dr.", &["Dr."]),
    ];

    LanguageData {
        rules: specials
            .iter()
            .map(|(chunk, parts)| {
                (
                    chunk.to_string(),
                    parts.iter().map(|p| p.to_string()).collect(),
                )
            })
            .collect(),
        prefix: Some(r#"[\(\[\{<"'¿¡«]"#.to_string()),
        suffix: Some(r#"[\)\]\}>"'%,\.;:!\?»]"#.to_string()),
        infix: Some("[-–—/]".to_string()),
        lexemes: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_patterns_compile() {
        use crate::core::rules::RuleSet;
        let data = english();
        assert!(RuleSet::compile(
            data.prefix.as_deref(),
            data.suffix.as_deref(),
            data.infix.as_deref(),
        )
        .is_ok());
    }

    #[test]
    fn test_english_specials_nonempty() {
        let data = english();
        assert!(!data.rules.is_empty());
        assert!(data.rules.iter().all(|(_, parts)| !parts.is_empty()));
    }
}
