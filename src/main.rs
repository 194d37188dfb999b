//! Insurance Qualifier server binary.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use insurance_qualifier::adapters::http::{api_router, QualificationHandlers};
use insurance_qualifier::adapters::{
    InMemorySessionStore, PostgresCatalogSource, PostgresSessionRecorder, StaticCatalogSource,
    TracingSessionRecorder,
};
use insurance_qualifier::application::{
    AnswerQuestionHandler, GetQualificationHandler, ListProductsHandler,
    RestartQualificationHandler, StartQualificationHandler,
};
use insurance_qualifier::config::{AppConfig, CatalogSourceKind, DatabaseConfig};
use insurance_qualifier::domain::catalog::{Catalog, CommonQuestionTable};
use insurance_qualifier::domain::qualification::QualificationEngine;
use insurance_qualifier::ports::{CatalogSource, SessionRecorder, SessionStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    init_tracing(&config);
    config.validate()?;

    let pool = match &config.database {
        Some(database) => Some(connect(database).await?),
        None => None,
    };

    let catalog_source: Arc<dyn CatalogSource> = match (config.catalog.source, &pool) {
        (CatalogSourceKind::Postgres, Some(pool)) => {
            Arc::new(PostgresCatalogSource::new(pool.clone()))
        }
        _ => Arc::new(StaticCatalogSource::builtin()),
    };
    let recorder: Arc<dyn SessionRecorder> = match &pool {
        Some(pool) => Arc::new(PostgresSessionRecorder::new(pool.clone())),
        None => Arc::new(TracingSessionRecorder::new()),
    };

    let table = match &config.catalog.common_questions_path {
        Some(path) => CommonQuestionTable::from_yaml_file(path)?,
        None => CommonQuestionTable::new(),
    };
    let catalog = Catalog::new(catalog_source.list_products().await?, table).map_err(|e| {
        tracing::error!(code = %e.code(), error = %e, "Catalog rejected");
        e
    })?;
    tracing::info!(
        products = catalog.len(),
        questions = catalog.distinct_question_count(),
        common_questions = catalog.common_questions().len(),
        "Catalog loaded"
    );

    let engine = QualificationEngine::new(Arc::new(catalog));
    let store = Arc::new(InMemorySessionStore::new());
    spawn_session_eviction(store.clone(), &config);

    let recorder_wait = config.session.recorder_wait();
    let handlers = QualificationHandlers::new(
        Arc::new(
            StartQualificationHandler::new(engine.clone(), store.clone(), recorder.clone())
                .with_recorder_wait(recorder_wait),
        ),
        Arc::new(
            AnswerQuestionHandler::new(engine.clone(), store.clone(), recorder.clone())
                .with_recorder_wait(recorder_wait),
        ),
        Arc::new(GetQualificationHandler::new(engine.clone(), store.clone())),
        Arc::new(
            RestartQualificationHandler::new(engine.clone(), store.clone(), recorder)
                .with_recorder_wait(recorder_wait),
        ),
        Arc::new(ListProductsHandler::new(engine)),
    );

    let app = with_layers(api_router(handlers), &config);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// RUST_LOG wins over the configured directive. Production logs are JSON.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }
}

async fn connect(database: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .min_connections(database.min_connections)
        .max_connections(database.max_connections)
        .acquire_timeout(database.acquire_timeout())
        .idle_timeout(database.idle_timeout())
        .connect(&database.url)
        .await?;

    if database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }
    Ok(pool)
}

fn with_layers(router: Router, config: &AppConfig) -> Router {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };
    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn spawn_session_eviction(store: Arc<dyn SessionStore>, config: &AppConfig) {
    let max_idle = config.session.idle_timeout();
    let mut interval = tokio::time::interval(config.session.eviction_interval());

    tokio::spawn(async move {
        loop {
            interval.tick().await;
            match store.evict_idle(max_idle).await {
                Ok(0) => {}
                Ok(evicted) => tracing::info!(evicted, "Evicted idle qualification sessions"),
                Err(e) => tracing::warn!(error = %e, "Session eviction failed"),
            }
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
