//! Word-index tokenizer and sequence padding.
//!
//! Mirrors the Keras text tokenizer the network was trained with: index 0 is
//! reserved for padding, the OOV token takes index 1 and words follow in
//! descending frequency order.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Out-of-vocabulary marker
pub const OOV_TOKEN: &str = "<OOV>";

/// Punctuation stripped before splitting (Keras' default filter set)
const FILTERS: &str = "!\"#$%&()*+,-./:;<=>?@[\\]^_`{|}~\t\n";

/// Sentences used to fit a vocabulary when no tokenizer artifact exists
pub const BOOTSTRAP_SAMPLES: [&str; 8] = [
    "aku bahagia sekali hari ini",
    "hatiku sedih dan rindu",
    "aku marah dengan semua ini",
    "aku takut akan masa depan",
    "cinta ini indah sekali",
    "kenapa harus berpisah",
    "jangan tinggalkan aku",
    "semua akan baik-baik saja",
];

#[derive(Debug, thiserror::Error)]
pub enum TokenizerError {
    #[error("failed to read tokenizer file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid tokenizer file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("tokenizer has no index for its OOV token {0:?}")]
    MissingOov(String),
}

/// On-disk vocabulary format
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TokenizerFile {
    #[serde(default = "default_oov")]
    oov_token: String,
    #[serde(default)]
    num_words: Option<usize>,
    word_index: HashMap<String, u32>,
}

fn default_oov() -> String {
    OOV_TOKEN.to_string()
}

#[derive(Debug, Clone)]
pub struct Tokenizer {
    word_index: HashMap<String, u32>,
    oov_index: u32,
    num_words: Option<usize>,
}

impl Tokenizer {
    /// Build a vocabulary from `texts`, ranking words by frequency.
    /// Equal counts keep first-seen order.
    pub fn fit<'a, I>(texts: I, num_words: Option<usize>) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut order: Vec<String> = Vec::new();
        let mut counts: HashMap<String, usize> = HashMap::new();

        for text in texts {
            for word in split_words(text) {
                let count = counts.entry(word.clone()).or_insert_with(|| {
                    order.push(word);
                    0
                });
                *count += 1;
            }
        }

        // stable sort keeps insertion order among ties
        order.sort_by(|a, b| counts[b].cmp(&counts[a]));

        let mut word_index = HashMap::with_capacity(order.len() + 1);
        word_index.insert(OOV_TOKEN.to_string(), 1);
        for (i, word) in order.into_iter().enumerate() {
            word_index.entry(word).or_insert(i as u32 + 2);
        }

        Self {
            word_index,
            oov_index: 1,
            num_words,
        }
    }

    /// The vocabulary fitted on [`BOOTSTRAP_SAMPLES`]
    pub fn bootstrap(num_words: usize) -> Self {
        Self::fit(BOOTSTRAP_SAMPLES, Some(num_words))
    }

    /// Load a vocabulary artifact. A `num_words` stored in the file wins over
    /// `default_num_words`.
    pub fn from_json_file(path: &Path, default_num_words: usize) -> Result<Self, TokenizerError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw, default_num_words)
    }

    pub fn from_json_str(raw: &str, default_num_words: usize) -> Result<Self, TokenizerError> {
        let file: TokenizerFile = serde_json::from_str(raw)?;
        let oov_index = *file
            .word_index
            .get(&file.oov_token)
            .ok_or_else(|| TokenizerError::MissingOov(file.oov_token.clone()))?;

        Ok(Self {
            word_index: file.word_index,
            oov_index,
            num_words: Some(file.num_words.unwrap_or(default_num_words)),
        })
    }

    pub fn vocab_size(&self) -> usize {
        self.word_index.len()
    }

    pub fn index_of(&self, word: &str) -> Option<u32> {
        self.word_index.get(word).copied()
    }

    /// Convert text to token ids. Unknown words and words ranked at or past
    /// the vocabulary cap become the OOV id.
    pub fn texts_to_sequence(&self, text: &str) -> Vec<i64> {
        split_words(text)
            .map(|word| match self.word_index.get(&word) {
                Some(&i) if self.num_words.map_or(true, |cap| (i as usize) < cap) => i64::from(i),
                _ => i64::from(self.oov_index),
            })
            .collect()
    }
}

fn split_words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| c == ' ' || FILTERS.contains(c))
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
}

/// Pad with zeros at the end up to `max_len`. Longer sequences keep their
/// last `max_len` ids.
pub fn pad_sequence(ids: &[i64], max_len: usize) -> Vec<i64> {
    let start = ids.len().saturating_sub(max_len);
    let mut padded = Vec::with_capacity(max_len);
    padded.extend_from_slice(&ids[start..]);
    padded.resize(max_len, 0);
    padded
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_bootstrap_vocabulary() {
        let tok = Tokenizer::bootstrap(10_000);
        assert_eq!(tok.index_of(OOV_TOKEN), Some(1));
        // "aku" appears in four samples, more than any other word
        assert_eq!(tok.index_of("aku"), Some(2));
        // hyphen is a filter char, so "baik-baik" counts "baik" twice
        assert!(tok.index_of("baik").is_some());
        assert!(tok.index_of("baik-baik").is_none());
    }

    #[test]
    fn test_frequency_ties_keep_first_seen_order() {
        let tok = Tokenizer::fit(["b a", "a b c"], None);
        // a and b both occur twice; b was seen first
        assert_eq!(tok.index_of("b"), Some(2));
        assert_eq!(tok.index_of("a"), Some(3));
        assert_eq!(tok.index_of("c"), Some(4));
    }

    #[test]
    fn test_unknown_words_map_to_oov() {
        let tok = Tokenizer::bootstrap(10_000);
        let seq = tok.texts_to_sequence("aku zzz");
        assert_eq!(seq, vec![2, 1]);
    }

    #[test]
    fn test_num_words_cap() {
        let tok = Tokenizer::fit(["a a a b b c"], Some(3));
        // a=2, b=3, c=4; only ids < 3 survive
        assert_eq!(tok.texts_to_sequence("a b c"), vec![2, 1, 1]);
    }

    #[test]
    fn test_empty_text() {
        let tok = Tokenizer::bootstrap(10_000);
        assert!(tok.texts_to_sequence("").is_empty());
    }

    #[test]
    fn test_pad_short_sequence() {
        assert_eq!(pad_sequence(&[5, 6], 4), vec![5, 6, 0, 0]);
        assert_eq!(pad_sequence(&[], 3), vec![0, 0, 0]);
    }

    #[test]
    fn test_truncate_keeps_tail() {
        let ids: Vec<i64> = (1..=150).collect();
        let padded = pad_sequence(&ids, 100);
        assert_eq!(padded.len(), 100);
        assert_eq!(padded[0], 51);
        assert_eq!(padded[99], 150);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"oov_token": "<OOV>", "word_index": {{"<OOV>": 1, "cinta": 2, "luka": 3}}}}"#
        )
        .unwrap();

        let tok = Tokenizer::from_json_file(file.path(), 10_000).unwrap();
        assert_eq!(tok.vocab_size(), 3);
        assert_eq!(tok.texts_to_sequence("cinta luka rindu"), vec![2, 3, 1]);
    }

    #[test]
    fn test_file_num_words_overrides_default() {
        let raw = r#"{"num_words": 3, "word_index": {"<OOV>": 1, "a": 2, "b": 3}}"#;
        let tok = Tokenizer::from_json_str(raw, 10_000).unwrap();
        assert_eq!(tok.texts_to_sequence("a b"), vec![2, 1]);
    }

    #[test]
    fn test_missing_oov_is_rejected() {
        let raw = r#"{"word_index": {"a": 1}}"#;
        let err = Tokenizer::from_json_str(raw, 10_000).unwrap_err();
        assert!(matches!(err, TokenizerError::MissingOov(_)));
    }

    #[test]
    fn test_malformed_file_is_rejected() {
        let err = Tokenizer::from_json_str("not json", 10_000).unwrap_err();
        assert!(matches!(err, TokenizerError::Parse(_)));
    }
}
