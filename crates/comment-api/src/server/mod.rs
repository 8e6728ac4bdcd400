//! Server setup and initialization
//!
//! Builds the application, wires all dependencies, and runs the HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use comment_cache::{PageCache, PubSubNotifier, Publisher, RedisPool, RedisPoolConfig};
use comment_common::{AppConfig, AppError};
use comment_core::SnowflakeGenerator;
use comment_db::{create_pool, PgCommentRepository};
use comment_service::{
    FsBlobStore, HttpCaptchaVerifier, NoopCaptchaVerifier, ServiceContextBuilder,
};
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let router = create_router();
    let router = apply_middleware(router).merge(health_routes());
    router.with_state(state)
}

/// Build the application with rate limiting and configured CORS
pub fn create_app_with_config(state: AppState, config: &AppConfig) -> Router {
    let router = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );
    // Health endpoints bypass the rate limiter
    router.merge(health_routes()).with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Create database pool
    info!("Connecting to PostgreSQL...");
    let db_config = comment_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    // Create Redis pool
    info!("Connecting to Redis...");
    let redis_config = RedisPoolConfig::from(&config.redis);
    let redis_pool = RedisPool::new(redis_config).map_err(|e| AppError::Cache(e.to_string()))?;
    info!("Redis connection established");

    // Read cache and fan-out over the shared Redis pool
    let page_cache = PageCache::new(redis_pool.clone(), config.cache.page_ttl_secs);
    let notifier = Arc::new(PubSubNotifier::new(Publisher::new(redis_pool)));

    // Repository
    let comment_repo = Arc::new(PgCommentRepository::new(pool));

    // Gateways
    let blob_store = Arc::new(FsBlobStore::new(
        &config.storage.upload_dir,
        &config.storage.public_base,
    ));
    let captcha: Arc<dyn comment_core::CaptchaVerifier> = if config.captcha.enabled {
        Arc::new(
            HttpCaptchaVerifier::new(&config.captcha)
                .map_err(|e| AppError::Config(e.to_string()))?,
        )
    } else {
        Arc::new(NoopCaptchaVerifier)
    };

    // Snowflake generator
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    // Build service context
    let service_context = ServiceContextBuilder::new()
        .comment_repo(comment_repo)
        .blob_store(blob_store)
        .captcha(captcha)
        .notifier(notifier)
        .page_cache(page_cache)
        .snowflake_generator(snowflake_generator)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.api.port));

    let state = create_app_state(config.clone()).await?;
    let app = create_app_with_config(state, &config);

    run_server(app, addr).await
}
