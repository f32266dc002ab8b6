//! Peeper Exporter Library
//!
//! Two small Prometheus exporters sharing one text-format encoder:
//!
//! - a simulated **client** exporter producing a wall-clock counter and a
//!   random gauge;
//! - a **server** exporter reporting host uptime read from a bind-mounted
//!   `/proc/uptime`.
//!
//! # Architecture
//!
//! Each scrape is handled in a single synchronous pass:
//!
//! ```text
//! GET /metrics → collector → exposition encoder → 200 text/plain
//!                    ↓
//!             read failure → error comment line
//! ```
//!
//! Nothing is cached between scrapes; every sample is built fresh.
//!
//! # Example
//!
//! ```no_run
//! use peeper_exporter::{
//!     exporter::{scrape, UptimeCollector},
//!     http::{MetricsServer, MetricsServerConfig},
//! };
//!
//! let collector = UptimeCollector::new("/proc/uptime", "server");
//! println!("{}", scrape(&collector));
//!
//! # async fn serve() -> Result<(), peeper_exporter::http::ServerError> {
//! let server = MetricsServer::new(
//!     MetricsServerConfig::with_port(9393),
//!     UptimeCollector::default(),
//! );
//! server.run().await
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod config;
pub mod exporter;
pub mod exposition;
pub mod http;

// Re-export commonly used types at crate root
pub use config::{ConfigError, ExporterConfig};
pub use exporter::{scrape, ClientCollector, CollectError, Collector, UptimeCollector};
pub use exposition::{render, Labels, MetricKind, MetricSample, MetricValue};
pub use http::{MetricsServer, MetricsServerConfig};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
