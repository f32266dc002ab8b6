//! Rendering of samples into exposition text.

use super::sample::{ExpositionError, MetricSample};
use std::fmt::Write;

/// An ordered exposition document.
///
/// Samples of one family must be pushed contiguously; this keeps every
/// rendered document acceptable to a Prometheus parser, which rejects a
/// family that reappears after another one.
#[derive(Debug, Clone, Default)]
pub struct ExpositionDocument {
    samples: Vec<MetricSample>,
}

impl ExpositionDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sample to the document.
    pub fn push(&mut self, sample: MetricSample) -> Result<(), ExpositionError> {
        if let Some(last) = self.samples.last() {
            if last.name() == sample.name() {
                if last.kind() != sample.kind() {
                    return Err(ExpositionError::KindConflict {
                        name: sample.name().to_string(),
                        existing: last.kind(),
                        found: sample.kind(),
                    });
                }
            } else if self.samples.iter().any(|s| s.name() == sample.name()) {
                return Err(ExpositionError::FamilyReopened(sample.name().to_string()));
            }
        }
        self.samples.push(sample);
        Ok(())
    }

    /// Samples in document order.
    pub fn samples(&self) -> &[MetricSample] {
        &self.samples
    }

    /// Renders the document as exposition text.
    pub fn render(&self) -> String {
        render(&self.samples)
    }
}

impl TryFrom<Vec<MetricSample>> for ExpositionDocument {
    type Error = ExpositionError;

    fn try_from(samples: Vec<MetricSample>) -> Result<Self, Self::Error> {
        let mut doc = ExpositionDocument::new();
        for sample in samples {
            doc.push(sample)?;
        }
        Ok(doc)
    }
}

/// Renders samples in order.
///
/// Each family gets a `# HELP` and `# TYPE` line followed by its sample
/// lines. A family is a run of consecutive samples sharing a name; the
/// header is taken from the first sample of the run. Families are separated
/// by one blank line and the output ends with the last sample's newline.
pub fn render(samples: &[MetricSample]) -> String {
    let mut out = String::new();
    let mut current: Option<&str> = None;

    for sample in samples {
        if current != Some(sample.name()) {
            if current.is_some() {
                out.push('\n');
            }
            write_header(&mut out, sample);
            current = Some(sample.name());
        }
        write_sample(&mut out, sample);
    }

    out
}

/// Renders a failed scrape as a single comment line.
///
/// Line breaks in the description are flattened so the body never spills
/// into something a parser would read as a sample.
pub fn render_error(err: &dyn std::error::Error) -> String {
    let description: String = err
        .to_string()
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    format!("# Error reading metrics: {}\n", description)
}

fn write_header(out: &mut String, sample: &MetricSample) {
    // Writing to a String cannot fail.
    let _ = writeln!(out, "# HELP {} {}", sample.name(), escape_help(sample.help()));
    let _ = writeln!(out, "# TYPE {} {}", sample.name(), sample.kind());
}

fn write_sample(out: &mut String, sample: &MetricSample) {
    out.push_str(sample.name());

    if !sample.labels().is_empty() {
        out.push('{');
        for (i, (name, value)) in sample.labels().iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_label_value(value));
            out.push('"');
        }
        out.push('}');
    }

    let _ = writeln!(out, " {}", sample.value());
}

fn escape_label_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            c => escaped.push(c),
        }
    }
    escaped
}

fn escape_help(help: &str) -> String {
    help.replace('\\', "\\\\").replace('\n', "\\n")
}
