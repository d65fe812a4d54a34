//! Prometheus metrics recorder and scrape route.

use axum::{routing::get, Router};
use metrics::Unit;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use roster_repository::{CACHE_ERRORS_TOTAL, CACHE_HITS_TOTAL, CACHE_MISSES_TOTAL};

/// Installs the global Prometheus recorder and describes the cache counters.
pub fn setup_metrics_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    metrics::describe_counter!(CACHE_HITS_TOTAL, Unit::Count, "User lookups answered from the cache.");
    metrics::describe_counter!(
        CACHE_MISSES_TOTAL,
        Unit::Count,
        "User lookups that fell through to the record store."
    );
    metrics::describe_counter!(
        CACHE_ERRORS_TOTAL,
        Unit::Count,
        "Cache failures absorbed by the cached repository, by operation."
    );

    Ok(handle)
}

/// Route serving the Prometheus text format at `path`.
pub fn metrics_router(path: &str, handle: PrometheusHandle) -> Router {
    Router::new().route(path, get(move || std::future::ready(handle.render())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_metrics_route_renders_counters() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            metrics::counter!(CACHE_HITS_TOTAL).increment(2);
        });

        let response = metrics_router("/metrics", handle)
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("roster_cache_hits_total 2"));
    }
}
