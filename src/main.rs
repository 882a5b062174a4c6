use axum::routing::get;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use triply::app_state::AppState;
use triply::config::AppConfig;
use triply::routes;

#[tokio::main]
async fn main() {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    // Load configuration from environment
    let config = AppConfig::from_env().expect("Failed to load configuration from environment");

    tracing::info!("Initializing triply server");

    if config.gemini_api_key.is_empty() {
        tracing::warn!("GEMINI_API_KEY is empty; generation requests will be sent without a key");
    }

    // Initialize Prometheus metrics recorder
    let prometheus_handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");
    let prometheus_handle = Arc::new(prometheus_handle);

    metrics::describe_counter!(
        "backoff_attempts_total",
        "Calls made to external services, including retries"
    );
    metrics::describe_counter!(
        "backoff_exhausted_total",
        "Calls that failed on every attempt of their retry budget"
    );
    metrics::describe_counter!(
        "stale_results_discarded_total",
        "Pipeline results dropped because a newer generation had started"
    );
    metrics::describe_counter!(
        "place_lookup_failures_total",
        "Destination lookups that failed and fell back to no suggestions"
    );
    metrics::describe_histogram!(
        "generation_stage_seconds",
        "Wall time of a generation stage including retries"
    );

    // Initialize service clients and the trip session
    tracing::info!(
        text_model = %config.text_model,
        image_model = %config.image_model,
        "Initializing generation and place lookup clients"
    );
    let state = AppState::from_config(&config).expect("Failed to initialize HTTP client");

    let app = routes::api_router(state)
        // Prometheus metrics endpoint (separate state)
        .route(
            "/metrics",
            get(routes::metrics::prometheus_metrics).with_state(prometheus_handle),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(64 * 1024)); // 64 KB limit

    tracing::info!("Starting triply on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await.expect("Server error");
}
