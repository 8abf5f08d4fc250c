use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryStoryRepository};
use crate::routes::with_story_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use stranger_stories::config::AppConfig;
use stranger_stories::error::AppError;
use stranger_stories::telemetry;
use stranger_stories::workflows::stories::{AcceptancePipeline, ProfanityFilter, StoryService};
use tower_http::cors::CorsLayer;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(public_dir) = args.public_dir.take() {
        config.server.public_dir = public_dir;
    }

    telemetry::init(&config.telemetry)?;

    let words = ProfanityFilter::load(config.moderation.wordlist_path.as_deref())?;
    let source = config
        .moderation
        .wordlist_path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "builtin".to_string());
    info!(entries = words.len(), %source, "profanity word list loaded");
    let pipeline = AcceptancePipeline::new(Arc::new(words), config.moderation.acceptance.clone())?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        public_dir: Arc::new(config.server.public_dir.clone()),
    };

    let repository = Arc::new(InMemoryStoryRepository::default());
    let story_service = Arc::new(StoryService::new(repository, Arc::new(pipeline)));

    let app = with_story_routes(story_service)
        .layer(Extension(app_state))
        .layer(CorsLayer::permissive())
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "story service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
