use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::StatsError;
use crate::statistics::Statistics;

/// One full run of the five descriptive queries, ready to print or persist.
#[derive(Debug, Default, Serialize)]
pub struct Summary {
    pub computed_at: DateTime<Utc>,
    pub label: Option<String>,
    pub count: usize,

    pub mean: Option<f64>,
    pub mode: Option<f64>,
    pub median: Option<f64>,
    pub percentile_rank: f64,
    pub percentile: Option<f64>,
    pub deviation: Option<f64>,
    pub sample_deviation: bool,

    // error tracking
    pub error_type: Option<String>,
    pub error_message: Option<String>,
}

impl Summary {
    /// Runs mean, mode, median, percentile and deviation over `stats`.
    ///
    /// The first failing query is recorded in `error_type`/`error_message`
    /// and leaves its own field empty; the others are still filled in.
    pub fn from_statistics(stats: &Statistics, percentile: f64, sample: bool) -> Self {
        let mut s = Summary {
            computed_at: Utc::now(),
            count: stats.len(),
            percentile_rank: percentile,
            sample_deviation: sample,
            ..Default::default()
        };

        s.mean = s.record(stats.mean());
        s.mode = s.record(stats.mode());
        s.median = s.record(stats.median());
        s.percentile = s.record(stats.percentile(percentile));
        s.deviation = s.record(stats.std(sample));

        s
    }

    fn record(&mut self, result: Result<f64, StatsError>) -> Option<f64> {
        match result {
            Ok(v) => Some(v),
            Err(e) => {
                if self.error_type.is_none() {
                    self.error_type = Some(e.kind().to_string());
                    self.error_message = Some(e.to_string());
                }
                None
            }
        }
    }

    /// A row for a run that failed before any query could be made; only the
    /// timestamp and the error columns are filled.
    pub fn from_error(error_type: &str, error_message: &str) -> Self {
        Summary {
            computed_at: Utc::now(),
            error_type: Some(error_type.to_string()),
            error_message: Some(error_message.to_string()),
            ..Default::default()
        }
    }

    /// Names the data set the row belongs to.
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn is_complete(&self) -> bool {
        self.error_type.is_none()
    }
}
