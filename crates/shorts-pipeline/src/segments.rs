//! Per-segment media generation.
//!
//! All segments of a job are polled concurrently inside the job's task and
//! each one runs to completion, even when a sibling fails. Results are
//! re-joined in index order.

use std::path::Path;

use futures::future::join_all;
use shorts_models::{AssetNames, Job, MediaSegment, SEGMENT_COUNT};

use crate::error::{PipelineError, PipelineResult};
use crate::logging::JobLogger;
use crate::metrics;
use crate::persistence::write_asset;
use crate::prompts::resolve_job_prompt;
use crate::providers::Providers;

/// Appended to a segment's prompt when animating its still.
pub const MOTION_QUALIFIER: &str = ". Cinematic motion, slow camera pan, energetic movement, 4k resolution, high quality.";

/// Build the prompt sent to the animation model.
pub fn animation_prompt(prompt: &str) -> String {
    format!("{}{}", prompt, MOTION_QUALIFIER)
}

/// Everything a segment needs, borrowed from the running job.
pub struct SegmentContext<'a> {
    pub job: &'a Job,
    pub names: &'a AssetNames,
    pub output_dir: &'a Path,
    pub providers: &'a Providers,
    pub logger: &'a JobLogger,
}

/// Generate one segment: prompt, still image, and in video mode a clip.
pub async fn generate_segment(ctx: &SegmentContext<'_>, index: usize) -> PipelineResult<MediaSegment> {
    let prompt = resolve_job_prompt(ctx.providers.script.as_ref(), ctx.job, index).await?;

    let still = ctx
        .providers
        .media
        .generate_image(&prompt, ctx.job.reference_image.as_deref())
        .await
        .map_err(|e| PipelineError::segment(index, format!("image generation: {}", e)))?;

    let image = ctx.names.image(index);
    write_asset(&AssetNames::resolve(ctx.output_dir, &image), &still)
        .await
        .map_err(|e| PipelineError::segment(index, format!("writing image: {}", e)))?;

    let video = if ctx.job.mode.is_video() {
        let clip = ctx
            .providers
            .media
            .animate_image(&animation_prompt(&prompt), &still)
            .await
            .map_err(|e| PipelineError::segment(index, format!("animation: {}", e)))?;

        let video = ctx.names.video(index);
        write_asset(&AssetNames::resolve(ctx.output_dir, &video), &clip)
            .await
            .map_err(|e| PipelineError::segment(index, format!("writing video: {}", e)))?;
        Some(video)
    } else {
        None
    };

    let segment = MediaSegment {
        index,
        prompt,
        image,
        video,
    };
    ctx.logger.log_segment(index, segment.media_reference());
    Ok(segment)
}

/// Generate all segments concurrently.
///
/// Every segment is awaited. If any failed, the error of the lowest failing
/// index is returned; files written by the others stay on disk.
pub async fn generate_segments(ctx: &SegmentContext<'_>) -> PipelineResult<Vec<MediaSegment>> {
    let results = join_all((0..SEGMENT_COUNT).map(|index| generate_segment(ctx, index))).await;

    let mut segments = Vec::with_capacity(SEGMENT_COUNT);
    let mut first_error = None;

    // join_all preserves input order, so results[i] belongs to segment i.
    for result in results {
        match result {
            Ok(segment) => segments.push(segment),
            Err(e) => {
                metrics::record_segment_failed();
                if let Some(index) = e.segment_index() {
                    ctx.logger.log_segment_failure(index, &e.to_string());
                }
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(segments),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animation_prompt_suffix() {
        assert_eq!(
            animation_prompt("a lighthouse at dusk"),
            "a lighthouse at dusk. Cinematic motion, slow camera pan, energetic movement, 4k resolution, high quality."
        );
    }
}
