//! Simulated client metrics.
//!
//! Emits two families per scrape: a counter tracking wall-clock seconds
//! and a gauge drawn at random. The counter is only non-decreasing across
//! scrapes at least one second apart; two scrapes within the same second
//! report the same value.

use super::{CollectError, Collector};
use crate::exposition::{ExpositionError, Labels, MetricSample};
use chrono::{DateTime, Utc};
use rand::Rng;

const COUNTER_NAME: &str = "student_counter_total";
const COUNTER_HELP: &str = "A counter that always goes up.";
const GAUGE_NAME: &str = "student_gauge_random";
const GAUGE_HELP: &str = "A gauge with a random value.";

/// Inclusive upper bound of the random gauge.
pub const GAUGE_MAX: u8 = 100;

/// Collector for the simulated client exporter.
#[derive(Debug, Clone)]
pub struct ClientCollector {
    host: String,
    app: String,
}

impl Default for ClientCollector {
    fn default() -> Self {
        Self::new("client", "my-first-app")
    }
}

impl ClientCollector {
    /// Creates a collector labelling its samples with `host` and `app`.
    pub fn new(host: impl Into<String>, app: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            app: app.into(),
        }
    }

    /// Builds the samples for a scrape taken at `now` using `rng`.
    pub fn sample_at<R: Rng>(
        &self,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Vec<MetricSample>, ExpositionError> {
        let labels = Labels::new()
            .with("host", self.host.as_str())?
            .with("app", self.app.as_str())?;

        let counter = MetricSample::counter(
            COUNTER_NAME,
            COUNTER_HELP,
            labels.clone(),
            now.timestamp(),
        )?;
        let gauge = MetricSample::gauge(
            GAUGE_NAME,
            GAUGE_HELP,
            labels,
            rng.gen_range(0..=GAUGE_MAX),
        )?;

        Ok(vec![counter, gauge])
    }
}

impl Collector for ClientCollector {
    fn collect(&self) -> Result<Vec<MetricSample>, CollectError> {
        Ok(self.sample_at(Utc::now(), &mut rand::thread_rng())?)
    }
}
