//! Host uptime metrics.
//!
//! Reads the first token of a `/proc/uptime`-style file. In a container the
//! host's file is expected to be bind-mounted at `/host/proc/uptime`.

use super::{CollectError, Collector};
use crate::exposition::{Labels, MetricSample};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::num::ParseFloatError;
use std::path::{Path, PathBuf};
use thiserror::Error;

const UPTIME_NAME: &str = "server_uptime_seconds";
const UPTIME_HELP: &str = "The uptime of the server.";

/// Default location of the host's uptime file inside the container.
pub const DEFAULT_UPTIME_PATH: &str = "/host/proc/uptime";

/// Upper bound on bytes read from the uptime source.
const MAX_READ_BYTES: u64 = 4096;

/// Failure to read the uptime source.
///
/// Display text never includes the file path, since it ends up in the
/// response body.
#[derive(Debug, Error)]
pub enum UptimeError {
    #[error("failed to read uptime source: {0}")]
    Io(#[from] std::io::Error),
    #[error("uptime source is empty")]
    Empty,
    #[error("first line of uptime source exceeds {} bytes", MAX_READ_BYTES)]
    LineTooLong,
    #[error("invalid uptime value {token:?}: {source}")]
    Parse {
        token: String,
        source: ParseFloatError,
    },
}

/// Reads uptime seconds from the first token of the file at `path`.
///
/// Only the first line is read, capped at a few kilobytes, so a non-regular
/// file at the path cannot stall the scrape indefinitely. A first line
/// longer than the cap is an error rather than a truncated token.
pub fn read_uptime(path: &Path) -> Result<f64, UptimeError> {
    let mut line = String::new();
    {
        let file = File::open(path)?;
        // One byte past the cap tells an over-long line from one that fits.
        let mut reader = BufReader::new(file.take(MAX_READ_BYTES + 1));
        reader.read_line(&mut line)?;
    }
    if line.len() as u64 > MAX_READ_BYTES && !line.ends_with('\n') {
        return Err(UptimeError::LineTooLong);
    }

    let token = line.split_whitespace().next().ok_or(UptimeError::Empty)?;
    token.parse::<f64>().map_err(|source| UptimeError::Parse {
        token: token.to_string(),
        source,
    })
}

/// Collector for the server uptime exporter.
#[derive(Debug, Clone)]
pub struct UptimeCollector {
    path: PathBuf,
    host: String,
}

impl Default for UptimeCollector {
    fn default() -> Self {
        Self::new(DEFAULT_UPTIME_PATH, "server")
    }
}

impl UptimeCollector {
    /// Creates a collector reading `path` and labelling with `host`.
    pub fn new(path: impl Into<PathBuf>, host: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            host: host.into(),
        }
    }

    /// Path of the uptime source.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Collector for UptimeCollector {
    fn collect(&self) -> Result<Vec<MetricSample>, CollectError> {
        let uptime = read_uptime(&self.path).map_err(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to read uptime");
            e
        })?;
        tracing::debug!(uptime, "Read host uptime");

        let labels = Labels::new().with("host", self.host.as_str())?;
        Ok(vec![MetricSample::gauge(
            UPTIME_NAME,
            UPTIME_HELP,
            labels,
            uptime,
        )?])
    }
}
