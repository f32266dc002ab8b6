//! Typed metric samples.

use std::fmt;
use thiserror::Error;

/// Errors raised while building exposition values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpositionError {
    #[error("invalid metric name: {0:?}")]
    InvalidMetricName(String),
    #[error("invalid label name: {0:?}")]
    InvalidLabelName(String),
    #[error("metric family {0:?} already closed; samples of a family must be contiguous")]
    FamilyReopened(String),
    #[error("metric family {name:?} declared as {existing} but sample is a {found}")]
    KindConflict {
        name: String,
        existing: MetricKind,
        found: MetricKind,
    },
}

/// The metric type announced in the `# TYPE` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    /// Only increases, barring resets.
    Counter,
    /// Free to go up and down between samples.
    Gauge,
}

impl MetricKind {
    /// Lowercase name used in the `# TYPE` line.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sample value, keeping the numeric type it was produced as.
///
/// Integers render in plain decimal form. Floats render with the shortest
/// representation that round-trips (`12345.67` stays `12345.67`), never
/// with fixed rounding. Non-finite floats use the exposition spellings
/// `NaN`, `+Inf` and `-Inf`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    /// Integral value, e.g. epoch seconds or a bounded random draw.
    Integer(i64),
    /// Floating-point value, e.g. uptime seconds.
    Float(f64),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            MetricValue::Integer(v) => write!(f, "{}", v),
            MetricValue::Float(v) if v.is_nan() => f.write_str("NaN"),
            MetricValue::Float(v) if v == f64::INFINITY => f.write_str("+Inf"),
            MetricValue::Float(v) if v == f64::NEG_INFINITY => f.write_str("-Inf"),
            MetricValue::Float(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for MetricValue {
    fn from(v: i64) -> Self {
        MetricValue::Integer(v)
    }
}

impl From<u8> for MetricValue {
    fn from(v: u8) -> Self {
        MetricValue::Integer(i64::from(v))
    }
}

impl From<f64> for MetricValue {
    fn from(v: f64) -> Self {
        MetricValue::Float(v)
    }
}

/// Label pairs in insertion order, with unique names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Labels {
    pairs: Vec<(String, String)>,
}

impl Labels {
    /// Creates an empty label set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a label, keeping insertion order.
    ///
    /// Re-inserting an existing name replaces its value in place, so the
    /// label keeps its original position.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), ExpositionError> {
        let name = name.into();
        if !is_valid_label_name(&name) {
            return Err(ExpositionError::InvalidLabelName(name));
        }
        let value = value.into();
        match self.pairs.iter_mut().find(|(n, _)| *n == name) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((name, value)),
        }
        Ok(())
    }

    /// Builder-style variant of [`Labels::insert`].
    pub fn with(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, ExpositionError> {
        self.insert(name, value)?;
        Ok(self)
    }

    /// Returns the value for a label name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// True if there are no labels.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// One metric sample, built fresh for each scrape.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    name: String,
    kind: MetricKind,
    help: String,
    labels: Labels,
    value: MetricValue,
}

impl MetricSample {
    /// Creates a sample, validating the metric name.
    pub fn new(
        name: impl Into<String>,
        kind: MetricKind,
        help: impl Into<String>,
        labels: Labels,
        value: impl Into<MetricValue>,
    ) -> Result<Self, ExpositionError> {
        let name = name.into();
        if !is_valid_metric_name(&name) {
            return Err(ExpositionError::InvalidMetricName(name));
        }
        Ok(Self {
            name,
            kind,
            help: help.into(),
            labels,
            value: value.into(),
        })
    }

    /// Shorthand for a counter sample.
    pub fn counter(
        name: impl Into<String>,
        help: impl Into<String>,
        labels: Labels,
        value: impl Into<MetricValue>,
    ) -> Result<Self, ExpositionError> {
        Self::new(name, MetricKind::Counter, help, labels, value)
    }

    /// Shorthand for a gauge sample.
    pub fn gauge(
        name: impl Into<String>,
        help: impl Into<String>,
        labels: Labels,
        value: impl Into<MetricValue>,
    ) -> Result<Self, ExpositionError> {
        Self::new(name, MetricKind::Gauge, help, labels, value)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> MetricKind {
        self.kind
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn value(&self) -> MetricValue {
        self.value
    }
}

/// `[a-zA-Z_:][a-zA-Z0-9_:]*`
pub(crate) fn is_valid_metric_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}

/// `[a-zA-Z_][a-zA-Z0-9_]*`
pub(crate) fn is_valid_label_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
