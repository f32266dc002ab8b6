//! HTTP endpoint serving a collector at `/metrics`.
//!
//! Every scrape answers `200 OK` with a `text/plain` body, including when
//! the collector fails: the failure is reported as a comment line in the
//! body. Callers that alert on HTTP status alone will not see read
//! failures; they need to inspect the body.

mod server;
mod signal;

pub use server::{MetricsServer, MetricsServerConfig, ServerError, CONTENT_TYPE};
pub use signal::shutdown_signal;
