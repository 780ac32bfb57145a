use serde::Serialize;
use std::time::Duration;
use tracing::{info, warn};

use crate::archive::RetentionReport;

pub(crate) const TARGET: &str = "telemetry::assessment";
pub(crate) const EVENT_OUTCOME: &str = "assessment_outcome";
pub(crate) const EVENT_RETENTION: &str = "retention_sweep";

#[derive(Debug, Serialize)]
pub struct AssessmentOutcomeEvent {
    pub word: String,
    pub pronunciation_score: f32,
    pub used_fallback: bool,
    pub latency_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct RetentionSweepEvent {
    pub scanned_bytes: u64,
    pub deleted: usize,
    pub remaining_bytes: u64,
}

pub fn record_assessment_outcome(
    word: &str,
    pronunciation_score: f32,
    used_fallback: bool,
    latency: Duration,
) {
    let event = AssessmentOutcomeEvent {
        word: word.to_string(),
        pronunciation_score,
        used_fallback,
        latency_ms: duration_to_ms(latency),
    };

    match serde_json::to_string(&event) {
        Ok(payload) => info!(
            target: TARGET,
            event = EVENT_OUTCOME,
            word = %event.word,
            pronunciation_score = event.pronunciation_score,
            used_fallback = event.used_fallback,
            latency_ms = event.latency_ms,
            payload = %payload
        ),
        Err(err) => warn!(
            target: TARGET,
            event = EVENT_OUTCOME,
            %err,
            "failed to encode assessment outcome event"
        ),
    }
}

pub fn record_retention_sweep(report: &RetentionReport) {
    let event = RetentionSweepEvent {
        scanned_bytes: report.scanned_bytes,
        deleted: report.deleted,
        remaining_bytes: report.remaining_bytes,
    };

    match serde_json::to_string(&event) {
        Ok(payload) => info!(
            target: TARGET,
            event = EVENT_RETENTION,
            scanned_bytes = event.scanned_bytes,
            deleted = event.deleted,
            remaining_bytes = event.remaining_bytes,
            payload = %payload
        ),
        Err(err) => warn!(
            target: TARGET,
            event = EVENT_RETENTION,
            %err,
            "failed to encode retention sweep event"
        ),
    }
}

fn duration_to_ms(duration: Duration) -> u64 {
    duration.as_millis().min(u64::MAX as u128) as u64
}
