//! The asset pipeline: script to metadata document.
//!
//! Narration, alignment and segment generation run in that order inside one
//! task. Segment generation is concurrent (see [`crate::segments`]). Any
//! failure before persistence aborts the job and no metadata is written;
//! files already produced are left in place.

use std::time::Instant;

use shorts_models::caption::scene_duration;
use shorts_models::word::to_seconds;
use shorts_models::{AssetNames, CaptionPlan, Job, MediaMode, MetadataDocument, Word};
use shorts_providers::PromptStyle;
use tracing::Instrument;

use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::logging::JobLogger;
use crate::metrics;
use crate::persistence::{persist_metadata, write_asset, MetadataTargets};
use crate::prompts;
use crate::providers::Providers;
use crate::segments::{generate_segments, SegmentContext};

/// Runs asset jobs against a fixed set of providers.
#[derive(Debug, Clone)]
pub struct AssetPipeline {
    providers: Providers,
    config: PipelineConfig,
}

impl AssetPipeline {
    pub fn new(providers: Providers, config: PipelineConfig) -> Self {
        Self { providers, config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Build a job from request parameters and run it.
    pub async fn run_asset_pipeline(
        &self,
        script: &str,
        voice_name: &str,
        custom_prompts: Option<Vec<String>>,
        reference_image: Option<String>,
        video_mode: bool,
    ) -> PipelineResult<MetadataDocument> {
        let job = Job::new(script, voice_name)
            .with_custom_prompts(custom_prompts.unwrap_or_default())
            .with_reference_image(reference_image)
            .with_mode(MediaMode::from_video_flag(video_mode));
        self.run(&job).await
    }

    /// Run a job to completion and persist its metadata document.
    pub async fn run(&self, job: &Job) -> PipelineResult<MetadataDocument> {
        let logger = JobLogger::new(&job.id, "asset_pipeline");
        let span = logger.create_span();

        async {
            let started = Instant::now();
            logger.log_start(&job.voice, job.mode, job.script.chars().count());
            metrics::record_job_started(job.mode.as_str());

            match self.execute(job, &logger).await {
                Ok(document) => {
                    let elapsed = started.elapsed();
                    metrics::record_job_completed(job.mode.as_str(), elapsed.as_secs_f64());
                    logger.log_completion(document.media_assets.len(), document.words.len(), elapsed);
                    Ok(document)
                }
                Err(e) => {
                    metrics::record_job_failed(e.stage());
                    logger.log_error(&e.to_string());
                    Err(e)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn execute(&self, job: &Job, logger: &JobLogger) -> PipelineResult<MetadataDocument> {
        if job.script.trim().is_empty() {
            return Err(PipelineError::invalid_input("script must not be empty"));
        }
        if job.voice.trim().is_empty() {
            return Err(PipelineError::invalid_input("voice must not be empty"));
        }

        let names = AssetNames::new(&job.id);

        let stage = Instant::now();
        let audio = self.synthesize_audio(job, &names).await?;
        finish_stage(logger, "audio", stage);

        let stage = Instant::now();
        let words = self.align_words(&audio).await?;
        finish_stage(logger, "alignment", stage);

        let plan = CaptionPlan::with_default_batch_size(&words);
        logger.log_captions(&plan, scene_duration(&words));

        let stage = Instant::now();
        let ctx = SegmentContext {
            job,
            names: &names,
            output_dir: &self.config.output_dir,
            providers: &self.providers,
            logger,
        };
        let segments = generate_segments(&ctx).await?;
        finish_stage(logger, "segments", stage);

        let document = MetadataDocument::from_segments(names.audio(), segments, job.mode, words);

        let stage = Instant::now();
        persist_metadata(&document, &MetadataTargets::new(&self.config, &names))
            .await
            .map_err(PipelineError::persistence)?;
        finish_stage(logger, "persistence", stage);

        Ok(document)
    }

    async fn synthesize_audio(&self, job: &Job, names: &AssetNames) -> PipelineResult<Vec<u8>> {
        let audio = self
            .providers
            .speech
            .synthesize(&job.script, &job.voice)
            .await
            .map_err(PipelineError::audio_synthesis)?;

        let path = AssetNames::resolve(&self.config.output_dir, &names.audio());
        write_asset(&path, &audio)
            .await
            .map_err(|e| PipelineError::audio_synthesis(format!("writing {}: {}", path.display(), e)))?;

        Ok(audio)
    }

    async fn align_words(&self, audio: &[u8]) -> PipelineResult<Vec<Word>> {
        let aligned = self
            .providers
            .aligner
            .align(audio)
            .await
            .map_err(PipelineError::alignment)?
            .ok_or_else(|| PipelineError::alignment("aligner returned no word sequence"))?;

        Ok(to_seconds(aligned))
    }

    /// Generate a narration script for a topic.
    pub async fn generate_script(&self, topic: &str) -> PipelineResult<String> {
        prompts::generate_script(self.providers.script.as_ref(), topic).await
    }

    /// Generate a storyboard of scene prompts. Unparseable replies yield an
    /// empty list.
    pub async fn generate_prompts(&self, script: &str, topic: &str, use_video: bool) -> PipelineResult<Vec<String>> {
        prompts::generate_storyboard(
            self.providers.script.as_ref(),
            script,
            topic,
            PromptStyle::from_video_flag(use_video),
        )
        .await
    }
}

fn finish_stage(logger: &JobLogger, stage: &str, started: Instant) {
    let elapsed = started.elapsed();
    metrics::record_stage(stage, elapsed.as_secs_f64());
    logger.log_stage(stage, elapsed);
}
