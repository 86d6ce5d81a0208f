//! Compass API Server
//!
//! Wires the Postgres adapters, the OpenAI completion provider, and the
//! generation pipeline into an axum application. All dependencies are
//! constructed once here and injected through `AppState`; there are no
//! process-wide service singletons.

use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use compass::{DeferredWriter, GenerationEngine};

mod adapters;
mod auth;
mod config;
mod models;
mod routes;
mod services;

use adapters::{
    OpenAiProvider, PgGoalRepository, PgJournalRepository, PgTaskRepository, PgUserRepository,
};
use auth::AuthService;
use config::Config;

/// Generation engine with the concrete provider
pub type AppEngine = GenerationEngine<OpenAiProvider>;
/// Deferred writer with the concrete repositories
pub type AppWriter = DeferredWriter<PgTaskRepository, PgJournalRepository>;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub user_repo: Arc<PgUserRepository>,
    pub goal_repo: Arc<PgGoalRepository>,
    pub task_repo: Arc<PgTaskRepository>,
    pub journal_repo: Arc<PgJournalRepository>,
    /// Absent when no OpenAI key is configured; AI routes answer 503
    pub engine: Option<Arc<AppEngine>>,
    pub writer: Arc<AppWriter>,
    pub auth: Arc<AuthService>,
}

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "Compass API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("🧭 Compass API initializing...");

    let config = Config::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;

    sqlx::migrate!().run(&pool).await?;
    tracing::info!("✅ Database migrations completed");

    // Repositories
    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
    let goal_repo = Arc::new(PgGoalRepository::new(pool.clone()));
    let task_repo = Arc::new(PgTaskRepository::new(pool.clone()));
    let journal_repo = Arc::new(PgJournalRepository::new(pool.clone()));

    // Generation engine, if a provider key is configured
    let engine = config.openai_api_key.clone().map(|key| {
        tracing::info!("🤖 Completion provider initialized ({})", config.openai_model);
        Arc::new(GenerationEngine::new(Arc::new(OpenAiProvider::new(
            key,
            config.openai_model.clone(),
        ))))
    });

    if engine.is_none() {
        tracing::warn!("⚠️  No OPENAI_API_KEY set - AI generation disabled");
    }

    let writer = Arc::new(DeferredWriter::new(task_repo.clone(), journal_repo.clone()));

    let auth_service = Arc::new(AuthService::new(
        config.auth_secret.clone(),
        config.mock_password.clone(),
    ));

    if auth_service.login_enabled() {
        tracing::info!("🔐 Development login enabled");
    } else {
        tracing::warn!("⚠️  No COMPASS_MOCK_PASSWORD set - login disabled");
    }

    let state = AppState {
        user_repo,
        goal_repo,
        task_repo,
        journal_repo,
        engine,
        writer,
        auth: auth_service,
    };

    // Public routes (no credential required)
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .merge(routes::auth::public_router())
        .merge(routes::users::public_router());

    // Protected routes (require authentication)
    let protected_routes = Router::new()
        .merge(routes::auth::router())
        .merge(routes::users::router())
        .merge(routes::goals::router())
        .merge(routes::tasks::router())
        .merge(routes::journals::router())
        .merge(routes::ai::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    // OpenAPI documentation
    let openapi = routes::swagger::ApiDoc::openapi();

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .merge(public_routes)
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .with_state(state);

    tracing::info!("📚 Swagger UI: /swagger-ui");

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("✅ Compass API listening on {}", config.bind_addr);

    axum::serve(listener, router).await?;

    Ok(())
}
