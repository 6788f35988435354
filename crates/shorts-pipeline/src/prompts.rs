//! Prompt resolution and storyboard parsing.

use shorts_models::job::custom_prompt_at;
use shorts_models::Job;
use shorts_providers::{PromptStyle, ScriptProvider};
use tracing::{debug, warn};

use crate::error::{PipelineError, PipelineResult};
use crate::metrics;

/// Resolve the prompt for one segment.
///
/// A non-empty custom prompt at `index` is used verbatim. Otherwise a fresh
/// prompt is derived from the script; nothing is cached across segments.
pub async fn resolve_prompt(
    script_provider: &dyn ScriptProvider,
    index: usize,
    custom_prompts: &[String],
    script: &str,
) -> PipelineResult<String> {
    if let Some(custom) = custom_prompt_at(custom_prompts, index) {
        debug!(segment = index, "Using custom prompt");
        return Ok(custom.to_string());
    }

    script_provider
        .segment_prompt(script)
        .await
        .map_err(|e| PipelineError::segment(index, format!("prompt generation: {}", e)))
}

/// Resolve the prompt for a job's segment.
pub async fn resolve_job_prompt(script_provider: &dyn ScriptProvider, job: &Job, index: usize) -> PipelineResult<String> {
    if let Some(custom) = job.custom_prompt(index) {
        debug!(job_id = %job.id, segment = index, "Using custom prompt");
        return Ok(custom.to_string());
    }
    resolve_prompt(script_provider, index, &[], &job.script).await
}

/// Parse a model reply as a JSON array of strings.
///
/// Markdown code fences around the array are tolerated.
pub fn parse_prompt_list(raw: &str) -> PipelineResult<Vec<String>> {
    let cleaned = raw.replace("```json", "").replace("```", "");
    serde_json::from_str::<Vec<String>>(cleaned.trim()).map_err(|e| PipelineError::PromptParse(e.to_string()))
}

/// Ask for a storyboard and parse it, recovering from unparseable replies
/// with an empty list.
pub async fn generate_storyboard(
    script_provider: &dyn ScriptProvider,
    script: &str,
    topic: &str,
    style: PromptStyle,
) -> PipelineResult<Vec<String>> {
    let raw = script_provider
        .storyboard_prompts(script, topic, style)
        .await
        .map_err(PipelineError::script_generation)?;

    match parse_prompt_list(&raw) {
        Ok(prompts) => Ok(prompts),
        Err(e) => {
            metrics::record_prompt_parse_failure();
            warn!(error = %e, "Storyboard reply was not a JSON string array; returning no prompts");
            Ok(Vec::new())
        }
    }
}

/// Generate a narration script for a topic.
pub async fn generate_script(script_provider: &dyn ScriptProvider, topic: &str) -> PipelineResult<String> {
    if topic.trim().is_empty() {
        return Err(PipelineError::invalid_input("topic must not be empty"));
    }

    script_provider
        .generate_script(topic)
        .await
        .map_err(PipelineError::script_generation)
}
