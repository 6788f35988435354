//! Time-aligned narration words.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A word as returned by the word aligner, timed in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AlignedWord {
    /// Surface text including punctuation
    pub text: String,
    /// Start offset in milliseconds
    pub start: u64,
    /// End offset in milliseconds
    pub end: u64,
}

impl AlignedWord {
    pub fn new(text: impl Into<String>, start: u64, end: u64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }
}

/// A transcribed word as written to the metadata document.
///
/// Times are in seconds. The field name `punctuated_word` is part of the
/// renderer's data contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Word {
    pub punctuated_word: String,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
}

impl Word {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            punctuated_word: text.into(),
            start,
            end,
        }
    }

    /// Length of the spoken word in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

impl From<AlignedWord> for Word {
    fn from(word: AlignedWord) -> Self {
        Self {
            punctuated_word: word.text,
            start: word.start as f64 / 1000.0,
            end: word.end as f64 / 1000.0,
        }
    }
}

/// Convert an aligner word sequence to seconds, preserving order.
pub fn to_seconds(words: Vec<AlignedWord>) -> Vec<Word> {
    words.into_iter().map(Word::from).collect()
}
