//! Output file naming.
//!
//! Renderer references are relative to the output directory. Media references
//! carry a leading slash, the audio reference does not; the renderer resolves
//! both against its public directory.

use std::path::{Path, PathBuf};

use crate::JobId;

/// File names for every artifact of one job.
#[derive(Debug, Clone)]
pub struct AssetNames {
    job_id: JobId,
}

impl AssetNames {
    pub fn new(job_id: &JobId) -> Self {
        Self {
            job_id: job_id.clone(),
        }
    }

    pub fn audio(&self) -> String {
        format!("{}-audio.wav", self.job_id)
    }

    pub fn image(&self, index: usize) -> String {
        format!("/{}-base-image-{}.png", self.job_id, index)
    }

    pub fn video(&self, index: usize) -> String {
        format!("/{}-video-{}.mp4", self.job_id, index)
    }

    pub fn metadata(&self) -> String {
        format!("{}-metadata.json", self.job_id)
    }

    /// Resolve a renderer reference to a path under `output_dir`.
    pub fn resolve(output_dir: &Path, reference: &str) -> PathBuf {
        output_dir.join(reference.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_embed_job_and_index() {
        let names = AssetNames::new(&JobId::from_string("abc"));
        assert_eq!(names.audio(), "abc-audio.wav");
        assert_eq!(names.image(3), "/abc-base-image-3.png");
        assert_eq!(names.video(0), "/abc-video-0.mp4");
        assert_eq!(names.metadata(), "abc-metadata.json");
    }

    #[test]
    fn test_resolve_strips_leading_slash() {
        let path = AssetNames::resolve(Path::new("/srv/public"), "/abc-video-1.mp4");
        assert_eq!(path, PathBuf::from("/srv/public/abc-video-1.mp4"));

        let path = AssetNames::resolve(Path::new("public"), "abc-audio.wav");
        assert_eq!(path, PathBuf::from("public/abc-audio.wav"));
    }

    #[test]
    fn test_segment_names_are_disjoint() {
        let names = AssetNames::new(&JobId::new());
        let mut all: Vec<String> = (0..crate::SEGMENT_COUNT)
            .flat_map(|i| [names.image(i), names.video(i)])
            .collect();
        all.push(names.audio());
        all.push(names.metadata());
        let before = all.len();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), before);
    }
}
