//! Metrics for the retrieval pipeline (embed, search, synthesize).

use metrics::{counter, histogram};
use std::time::Instant;

/// Pipeline stage label values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Embed,
    Search,
    Synthesize,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Embed => "embed",
            Stage::Search => "search",
            Stage::Synthesize => "synthesize",
        }
    }
}

/// Retrieval metrics recorder
pub struct RetrievalMetrics;

impl RetrievalMetrics {
    /// Record one stage execution and its duration
    pub fn record_stage(stage: Stage, success: bool, duration_secs: f64) {
        let status = if success { "ok" } else { "error" };

        counter!(
            "retrieval_stage_total",
            "stage" => stage.as_str(),
            "status" => status
        )
        .increment(1);

        histogram!(
            "retrieval_stage_duration_seconds",
            "stage" => stage.as_str()
        )
        .record(duration_secs);

        if !success {
            tracing::debug!(stage = stage.as_str(), duration_secs, "Pipeline stage failed");
        }
    }

    /// Record the terminal outcome of a pipeline run
    /// (`ok`, `no_results`, `invalid`, `error`)
    pub fn record_outcome(outcome: &'static str) {
        counter!("retrieval_requests_total", "outcome" => outcome).increment(1);
    }

    /// Record how many records the search backend returned
    pub fn record_records_returned(count: usize) {
        histogram!("retrieval_records_returned").record(count as f64);
    }

    /// Start timing a stage; call [`StageTimer::finish`] with the result.
    pub fn start(stage: Stage) -> StageTimer {
        StageTimer {
            stage,
            started: Instant::now(),
        }
    }
}

/// Timer returned by [`RetrievalMetrics::start`].
#[must_use]
pub struct StageTimer {
    stage: Stage,
    started: Instant,
}

impl StageTimer {
    pub fn finish(self, success: bool) {
        RetrievalMetrics::record_stage(self.stage, success, self.started.elapsed().as_secs_f64());
    }
}
