use super::stopwords::is_stop_word;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

fn word_regex() -> &'static Regex {
    static WORD: OnceLock<Regex> = OnceLock::new();
    WORD.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("word pattern is valid"))
}

/// Lower-cased terms of two or more word characters, stop words removed, in text order.
pub fn tokenize_text(text: &str) -> Vec<String> {
    word_regex()
        .find_iter(&text.to_lowercase())
        .map(|m| m.as_str().to_string())
        .filter(|word| !is_stop_word(word))
        .collect()
}

/// Occurrence count of every term in `text`.
pub fn term_counts(text: &str) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for token in tokenize_text(text) {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}
