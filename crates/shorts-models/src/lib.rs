//! Shared data models for the shorts asset pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Jobs and their media segments
//! - Time-aligned narration words
//! - The metadata document consumed by the renderer
//! - The static voice catalog
//! - Caption batching used to time on-screen words

pub mod assets;
pub mod caption;
pub mod job;
pub mod metadata;
pub mod voice;
pub mod word;

// Re-export common types
pub use assets::AssetNames;
pub use caption::{CaptionBatch, CaptionPlan, WordHighlight, DEFAULT_BATCH_SIZE};
pub use job::{Job, JobId, MediaMode, MediaSegment, SEGMENT_COUNT};
pub use metadata::MetadataDocument;
pub use voice::{Voice, VOICE_CATALOG};
pub use word::{AlignedWord, Word};
