//! Pipeline metrics.
//!
//! Recorded through the `metrics` facade; the API binary installs the
//! Prometheus recorder, the CLI runs without one and these become no-ops.

use metrics::{counter, histogram};

pub mod names {
    pub const JOBS_STARTED_TOTAL: &str = "shorts_jobs_started_total";
    pub const JOBS_COMPLETED_TOTAL: &str = "shorts_jobs_completed_total";
    pub const JOBS_FAILED_TOTAL: &str = "shorts_jobs_failed_total";
    pub const JOB_DURATION_SECONDS: &str = "shorts_job_duration_seconds";
    pub const STAGE_DURATION_SECONDS: &str = "shorts_stage_duration_seconds";
    pub const SEGMENTS_FAILED_TOTAL: &str = "shorts_segments_failed_total";
    pub const PROMPT_PARSE_FAILURES_TOTAL: &str = "shorts_prompt_parse_failures_total";
}

pub fn record_job_started(mode: &str) {
    counter!(names::JOBS_STARTED_TOTAL, "mode" => mode.to_string()).increment(1);
}

pub fn record_job_completed(mode: &str, duration_secs: f64) {
    counter!(names::JOBS_COMPLETED_TOTAL, "mode" => mode.to_string()).increment(1);
    histogram!(names::JOB_DURATION_SECONDS, "mode" => mode.to_string()).record(duration_secs);
}

pub fn record_job_failed(stage: &str) {
    counter!(names::JOBS_FAILED_TOTAL, "stage" => stage.to_string()).increment(1);
}

pub fn record_stage(stage: &str, duration_secs: f64) {
    histogram!(names::STAGE_DURATION_SECONDS, "stage" => stage.to_string()).record(duration_secs);
}

pub fn record_segment_failed() {
    counter!(names::SEGMENTS_FAILED_TOTAL).increment(1);
}

pub fn record_prompt_parse_failure() {
    counter!(names::PROMPT_PARSE_FAILURES_TOTAL).increment(1);
}
