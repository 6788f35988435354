//! Job definitions for a single asset-assembly run.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Number of media segments produced per job.
pub const SEGMENT_COUNT: usize = 5;

/// Unique identifier for a job.
///
/// Every output file of a run embeds this id, so two jobs sharing an
/// output directory never write the same path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    /// Generate a new random job ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which kind of media each segment ends up as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum MediaMode {
    /// Still image animated into a short clip
    #[default]
    Video,
    /// Still image only
    Image,
}

impl MediaMode {
    pub fn from_video_flag(use_video: bool) -> Self {
        if use_video {
            MediaMode::Video
        } else {
            MediaMode::Image
        }
    }

    pub fn is_video(&self) -> bool {
        matches!(self, MediaMode::Video)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaMode::Video => "video",
            MediaMode::Image => "image",
        }
    }
}

impl fmt::Display for MediaMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One assembly run. Lives only for the duration of the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Job {
    /// Unique job ID
    pub id: JobId,

    /// Narration script
    pub script: String,

    /// Logical voice label (resolved by the speech provider)
    pub voice: String,

    /// Caller-supplied prompts, used positionally
    #[serde(default)]
    pub custom_prompts: Vec<String>,

    /// Reference image URL for image-conditioned generation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_image: Option<String>,

    /// Video or image output
    #[serde(default)]
    pub mode: MediaMode,
}

impl Job {
    /// Create a new job with a fresh ID.
    pub fn new(script: impl Into<String>, voice: impl Into<String>) -> Self {
        Self {
            id: JobId::new(),
            script: script.into(),
            voice: voice.into(),
            custom_prompts: Vec::new(),
            reference_image: None,
            mode: MediaMode::default(),
        }
    }

    /// Set custom prompts.
    pub fn with_custom_prompts(mut self, prompts: Vec<String>) -> Self {
        self.custom_prompts = prompts;
        self
    }

    /// Set the reference image.
    pub fn with_reference_image(mut self, reference: Option<String>) -> Self {
        self.reference_image = reference;
        self
    }

    /// Set the media mode.
    pub fn with_mode(mut self, mode: MediaMode) -> Self {
        self.mode = mode;
        self
    }

    /// Custom prompt for a segment, if one was supplied and is non-empty.
    pub fn custom_prompt(&self, index: usize) -> Option<&str> {
        custom_prompt_at(&self.custom_prompts, index)
    }
}

/// Positional lookup into a custom prompt list. Empty entries count as absent.
pub fn custom_prompt_at(prompts: &[String], index: usize) -> Option<&str> {
    prompts.get(index).map(|p| p.as_str()).filter(|p| !p.is_empty())
}

/// One of the fixed media slots of a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MediaSegment {
    /// Segment index (0..SEGMENT_COUNT)
    pub index: usize,

    /// Resolved prompt (custom or generated)
    pub prompt: String,

    /// Renderer reference of the still image
    pub image: String,

    /// Renderer reference of the animated clip (video mode only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
}

impl MediaSegment {
    /// The reference the renderer should display for this segment.
    pub fn media_reference(&self) -> &str {
        self.video.as_deref().unwrap_or(&self.image)
    }
}
