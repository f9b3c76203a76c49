use crate::cli::ServeArgs;
use crate::demo::demo_dataset;
use crate::infra::{AppState, Dataset, InMemoryMatchDataSource};
use crate::routes::with_match_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use talent_match::config::AppConfig;
use talent_match::error::AppError;
use talent_match::matching::MatchEngine;
use talent_match::telemetry;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let dataset = match &config.matching.dataset_path {
        Some(path) => {
            info!(path = %path.display(), "loading talent dataset");
            Dataset::load(path)?
        }
        None => {
            warn!("MATCH_DATASET not set, serving the built-in sample pool");
            demo_dataset()
        }
    };
    let source = InMemoryMatchDataSource::new(dataset);
    info!(
        jobs = source.job_count(),
        candidates = source.candidate_count(),
        "talent pool loaded"
    );
    let engine = Arc::new(MatchEngine::new(Arc::new(source)));

    let app = with_match_routes(engine, &config.matching)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "candidate matching service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
