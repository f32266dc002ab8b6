//! Prometheus text exposition format.
//!
//! Typed metric samples and a pure encoder that renders them into the
//! plaintext format scraped by Prometheus:
//!
//! ```text
//! # HELP student_counter_total A counter that always goes up.
//! # TYPE student_counter_total counter
//! student_counter_total{host="client",app="my-first-app"} 1700000000
//! ```
//!
//! Samples sharing a name form one family under a single `# HELP` and
//! `# TYPE` header. Families are separated by one blank line.

mod encoder;
mod sample;

pub use encoder::{render, render_error, ExpositionDocument};
pub use sample::{ExpositionError, Labels, MetricKind, MetricSample, MetricValue};
