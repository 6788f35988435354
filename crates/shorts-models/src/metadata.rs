//! The metadata document handed to the renderer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{MediaMode, MediaSegment, Word};

/// Final artifact of a completed job.
///
/// `images` and `videos` mirror `media_assets` for the active mode and are
/// empty for the other one; the renderer reads whichever list it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetadataDocument {
    pub audio_url: String,
    pub media_assets: Vec<String>,
    pub is_video_mode: bool,
    pub videos: Vec<String>,
    pub images: Vec<String>,
    pub words: Vec<Word>,
}

impl MetadataDocument {
    /// Assemble a document from media references already in index order.
    pub fn new(audio_url: impl Into<String>, media_assets: Vec<String>, mode: MediaMode, words: Vec<Word>) -> Self {
        let is_video_mode = mode.is_video();
        let (videos, images) = if is_video_mode {
            (media_assets.clone(), Vec::new())
        } else {
            (Vec::new(), media_assets.clone())
        };

        Self {
            audio_url: audio_url.into(),
            media_assets,
            is_video_mode,
            videos,
            images,
            words,
        }
    }

    /// Assemble a document from completed segments.
    ///
    /// Segments are sorted by index first, so completion order never leaks
    /// into the media list.
    pub fn from_segments(
        audio_url: impl Into<String>,
        mut segments: Vec<MediaSegment>,
        mode: MediaMode,
        words: Vec<Word>,
    ) -> Self {
        segments.sort_by_key(|s| s.index);
        let media = segments
            .iter()
            .map(|s| s.media_reference().to_string())
            .collect();
        Self::new(audio_url, media, mode, words)
    }

    pub fn mode(&self) -> MediaMode {
        MediaMode::from_video_flag(self.is_video_mode)
    }

    /// Pretty-printed JSON, two-space indented.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(index: usize, video: bool) -> MediaSegment {
        MediaSegment {
            index,
            prompt: format!("prompt {index}"),
            image: format!("/j-base-image-{index}.png"),
            video: video.then(|| format!("/j-video-{index}.mp4")),
        }
    }

    #[test]
    fn test_image_mode_document() {
        let doc = MetadataDocument::new(
            "j-audio.wav",
            vec!["/a.png".into(), "/b.png".into()],
            MediaMode::Image,
            vec![],
        );
        assert!(!doc.is_video_mode);
        assert_eq!(doc.images, doc.media_assets);
        assert!(doc.videos.is_empty());
        assert_eq!(doc.mode(), MediaMode::Image);
    }

    #[test]
    fn test_video_mode_document() {
        let doc = MetadataDocument::new("j-audio.wav", vec!["/a.mp4".into()], MediaMode::Video, vec![]);
        assert!(doc.is_video_mode);
        assert_eq!(doc.videos, vec!["/a.mp4".to_string()]);
        assert!(doc.images.is_empty());
    }

    #[test]
    fn test_from_segments_restores_index_order() {
        let segments = vec![segment(3, true), segment(0, true), segment(4, true), segment(1, true), segment(2, true)];
        let doc = MetadataDocument::from_segments("j-audio.wav", segments, MediaMode::Video, vec![]);
        assert_eq!(
            doc.media_assets,
            (0..5).map(|i| format!("/j-video-{i}.mp4")).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_json_field_names() {
        let doc = MetadataDocument::new(
            "j-audio.wav",
            vec!["/j-base-image-0.png".into()],
            MediaMode::Image,
            vec![Word::new("Oi", 0.0, 0.4)],
        );
        let json: serde_json::Value = serde_json::from_str(&doc.to_json_pretty().unwrap()).unwrap();
        assert_eq!(json["audioUrl"], "j-audio.wav");
        assert_eq!(json["isVideoMode"], false);
        assert_eq!(json["mediaAssets"][0], "/j-base-image-0.png");
        assert_eq!(json["images"][0], "/j-base-image-0.png");
        assert_eq!(json["videos"].as_array().unwrap().len(), 0);
        assert_eq!(json["words"][0]["punctuated_word"], "Oi");
    }
}
