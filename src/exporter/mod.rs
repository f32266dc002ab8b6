//! Metric collectors and the scrape step.
//!
//! A [`Collector`] produces the samples for one scrape. [`scrape`] turns the
//! collector's result into a response body: the rendered document on
//! success, or a single `# Error reading metrics: ...` comment line on
//! failure. A failed read never escapes to the transport layer, so the
//! endpoint always answers `200 OK` and only the body signals the failure.

mod client;
mod uptime;

pub use client::ClientCollector;
pub use uptime::{read_uptime, UptimeCollector, UptimeError, DEFAULT_UPTIME_PATH};

use crate::exposition::{self, ExpositionError, MetricSample};
use thiserror::Error;

/// Errors that can occur while collecting samples for a scrape.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error(transparent)]
    Uptime(#[from] UptimeError),
    #[error(transparent)]
    Exposition(#[from] ExpositionError),
}

/// A source of metric samples, queried once per scrape.
pub trait Collector: Send + Sync {
    /// Collects a fresh set of samples.
    fn collect(&self) -> Result<Vec<MetricSample>, CollectError>;
}

/// Runs one scrape against a collector and returns the response body.
pub fn scrape(collector: &dyn Collector) -> String {
    match collector
        .collect()
        .and_then(|samples| Ok(exposition::ExpositionDocument::try_from(samples)?))
    {
        Ok(doc) => doc.render(),
        Err(e) => {
            tracing::debug!(error = %e, "Scrape failed, serving error comment");
            exposition::render_error(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exposition::Labels;

    struct FailingCollector;

    impl Collector for FailingCollector {
        fn collect(&self) -> Result<Vec<MetricSample>, CollectError> {
            Err(UptimeError::Empty.into())
        }
    }

    struct DuplicateFamilyCollector;

    impl Collector for DuplicateFamilyCollector {
        fn collect(&self) -> Result<Vec<MetricSample>, CollectError> {
            Ok(vec![
                MetricSample::gauge("a", "A.", Labels::new(), 1i64)?,
                MetricSample::gauge("b", "B.", Labels::new(), 1i64)?,
                MetricSample::gauge("a", "A.", Labels::new(), 2i64)?,
            ])
        }
    }

    #[test]
    fn test_scrape_failure_renders_comment() {
        let body = scrape(&FailingCollector);
        assert_eq!(body, "# Error reading metrics: uptime source is empty\n");
    }

    #[test]
    fn test_scrape_rejects_malformed_document() {
        let body = scrape(&DuplicateFamilyCollector);
        assert!(body.starts_with("# Error reading metrics:"));
        assert_eq!(body.lines().count(), 1);
    }
}
