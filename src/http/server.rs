//! HTTP server for the Prometheus metrics endpoint.

use crate::exporter::{scrape, Collector};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tower_http::trace::TraceLayer;

/// Content type of the text exposition format.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Errors that can occur during metrics server operations.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind to address: {0}")]
    Bind(#[from] std::io::Error),

    #[error("server error: {0}")]
    Server(String),
}

/// Configuration for the metrics server.
#[derive(Debug, Clone)]
pub struct MetricsServerConfig {
    /// Address to bind the server to.
    pub bind_addr: SocketAddr,
}

impl MetricsServerConfig {
    /// Creates a config listening on all interfaces at `port`.
    pub fn with_port(port: u16) -> Self {
        Self {
            bind_addr: ([0, 0, 0, 0], port).into(),
        }
    }
}

/// HTTP server exposing one collector at `/metrics`.
pub struct MetricsServer {
    config: MetricsServerConfig,
    collector: Arc<dyn Collector>,
}

impl MetricsServer {
    /// Creates a new metrics server.
    pub fn new(config: MetricsServerConfig, collector: impl Collector + 'static) -> Self {
        Self {
            config,
            collector: Arc::new(collector),
        }
    }

    /// Builds the router serving this server's collector.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/metrics", get(metrics_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(Arc::clone(&self.collector))
    }

    /// Starts the HTTP server.
    ///
    /// This method runs the server until it is shut down.
    pub async fn run(self) -> Result<(), ServerError> {
        self.run_until(std::future::pending()).await
    }

    /// Starts the HTTP server and stops gracefully once `shutdown` resolves.
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router();
        let listener = tokio::net::TcpListener::bind(self.config.bind_addr).await?;

        tracing::info!(
            addr = %self.config.bind_addr,
            "Metrics server listening"
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| ServerError::Server(e.to_string()))?;

        tracing::info!("Metrics server stopped");
        Ok(())
    }
}

/// Handler for the /metrics endpoint.
async fn metrics_handler(State(collector): State<Arc<dyn Collector>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, CONTENT_TYPE)],
        scrape(collector.as_ref()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exporter::{ClientCollector, UptimeCollector};
    use axum::body::Body;
    use axum::http::Request;
    use std::io::Write;
    use tower::ServiceExt;

    async fn get_metrics(server: &MetricsServer) -> (StatusCode, String, String) {
        let req = Request::builder()
            .uri("/metrics")
            .body(Body::empty())
            .unwrap();

        let resp = server.router().oneshot(req).await.unwrap();
        let status = resp.status();
        let content_type = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, content_type, String::from_utf8(body.to_vec()).unwrap())
    }

    #[test]
    fn test_config_with_port() {
        let config = MetricsServerConfig::with_port(9191);
        assert_eq!(config.bind_addr.port(), 9191);
        assert!(config.bind_addr.ip().is_unspecified());
    }

    #[tokio::test]
    async fn test_client_metrics_two_families() {
        let server = MetricsServer::new(MetricsServerConfig::with_port(9191), ClientCollector::default());
        let (status, content_type, body) = get_metrics(&server).await;

        assert_eq!(status, StatusCode::OK);
        assert!(content_type.starts_with("text/plain"));

        let families: Vec<&str> = body.split("\n\n").collect();
        assert_eq!(families.len(), 2);

        for (family, (name, kind)) in families.iter().zip([
            ("student_counter_total", "counter"),
            ("student_gauge_random", "gauge"),
        ]) {
            let lines: Vec<&str> = family.lines().collect();
            assert_eq!(lines.len(), 3);
            assert!(lines[0].starts_with(&format!("# HELP {} ", name)));
            assert_eq!(lines[1], format!("# TYPE {} {}", name, kind));
            assert!(lines[2].starts_with(&format!("{}{{host=\"client\",app=\"my-first-app\"}} ", name)));
        }
    }

    #[tokio::test]
    async fn test_client_gauge_in_range() {
        let server = MetricsServer::new(MetricsServerConfig::with_port(9191), ClientCollector::default());

        for _ in 0..50 {
            let (_, _, body) = get_metrics(&server).await;
            let gauge_line = body.lines().last().unwrap();
            let value: i64 = gauge_line.rsplit(' ').next().unwrap().parse().unwrap();
            assert!((0..=100).contains(&value));
        }
    }

    #[tokio::test]
    async fn test_uptime_metrics_exact_body() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"12345.67 8901.23").unwrap();

        let server = MetricsServer::new(
            MetricsServerConfig::with_port(9393),
            UptimeCollector::new(file.path(), "server"),
        );
        let (status, content_type, body) = get_metrics(&server).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type, CONTENT_TYPE);
        assert_eq!(
            body,
            "# HELP server_uptime_seconds The uptime of the server.\n\
             # TYPE server_uptime_seconds gauge\n\
             server_uptime_seconds{host=\"server\"} 12345.67\n"
        );
    }

    #[tokio::test]
    async fn test_uptime_missing_file_still_ok() {
        let dir = tempfile::tempdir().unwrap();
        let server = MetricsServer::new(
            MetricsServerConfig::with_port(9393),
            UptimeCollector::new(dir.path().join("uptime"), "server"),
        );
        let (status, content_type, body) = get_metrics(&server).await;

        assert_eq!(status, StatusCode::OK);
        assert!(content_type.starts_with("text/plain"));
        assert!(body.starts_with("# Error reading metrics:"));
    }

    #[tokio::test]
    async fn test_unknown_path_not_found() {
        let server = MetricsServer::new(MetricsServerConfig::with_port(9191), ClientCollector::default());
        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();

        let resp = server.router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_bind_failure_is_fatal() {
        let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let config = MetricsServerConfig {
            bind_addr: taken.local_addr().unwrap(),
        };

        let result = MetricsServer::new(config, ClientCollector::default())
            .run()
            .await;
        assert!(matches!(result, Err(ServerError::Bind(_))));
    }
}
