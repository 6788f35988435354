//! Caption timing for the renderer.
//!
//! Words are shown in consecutive batches of at most `batch_size`. A batch is
//! visible from its first word's start to its last word's end, and inside the
//! batch the highlight advances word by word, pausing over any silence between
//! two words. Batches never split a word and cover the sequence in order.

use crate::Word;

/// Words shown on screen at the same time.
pub const DEFAULT_BATCH_SIZE: usize = 4;

/// Time the scene keeps running after the last word ends (seconds).
pub const SCENE_TAIL_SECONDS: f64 = 0.5;

/// Highlight timing of one word inside its batch.
#[derive(Debug, Clone, PartialEq)]
pub struct WordHighlight<'a> {
    pub word: &'a Word,
    /// Silence between the previous word's end and this word's start
    pub pause_before: f64,
    pub start: f64,
    pub end: f64,
}

/// A group of consecutive words displayed together.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionBatch<'a> {
    pub words: &'a [Word],
    /// Wait between the previous batch disappearing and this one appearing
    pub wait_before: f64,
}

impl<'a> CaptionBatch<'a> {
    pub fn start(&self) -> f64 {
        self.words.first().map(|w| w.start).unwrap_or(0.0)
    }

    pub fn end(&self) -> f64 {
        self.words.last().map(|w| w.end).unwrap_or(0.0)
    }

    /// Visible window `[first.start, last.end]`.
    pub fn window(&self) -> (f64, f64) {
        (self.start(), self.end())
    }

    pub fn highlights(&self) -> Vec<WordHighlight<'a>> {
        let words: &'a [Word] = self.words;
        words
            .iter()
            .enumerate()
            .map(|(i, word)| {
                let pause_before = if i == 0 {
                    0.0
                } else {
                    (word.start - words[i - 1].end).max(0.0)
                };
                WordHighlight {
                    word,
                    pause_before,
                    start: word.start,
                    end: word.end,
                }
            })
            .collect()
    }
}

/// Full caption schedule for a word sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionPlan<'a> {
    batches: Vec<CaptionBatch<'a>>,
}

impl<'a> CaptionPlan<'a> {
    /// Partition `words` into batches. A batch size of zero is treated as one.
    pub fn new(words: &'a [Word], batch_size: usize) -> Self {
        let mut previous_end = 0.0_f64;
        let batches = words
            .chunks(batch_size.max(1))
            .map(|chunk| {
                let batch = CaptionBatch {
                    words: chunk,
                    wait_before: 0.0,
                };
                let wait_before = (batch.start() - previous_end).max(0.0);
                previous_end = batch.end();
                CaptionBatch { wait_before, ..batch }
            })
            .collect();

        Self { batches }
    }

    pub fn with_default_batch_size(words: &'a [Word]) -> Self {
        Self::new(words, DEFAULT_BATCH_SIZE)
    }

    pub fn batches(&self) -> &[CaptionBatch<'a>] {
        &self.batches
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }
}

/// Total scene length: last word end plus the tail.
pub fn scene_duration(words: &[Word]) -> Option<f64> {
    words.last().map(|w| w.end + SCENE_TAIL_SECONDS)
}

/// How long each media asset stays on screen when `count` assets share the scene.
pub fn media_slot_duration(words: &[Word], count: usize) -> Option<f64> {
    if count == 0 {
        return None;
    }
    scene_duration(words).map(|total| total / count as f64)
}
