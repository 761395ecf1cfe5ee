/*
 * Responsibility
 * - Load config -> build dependencies -> assemble Router
 * - Apply middleware (trace/CORS)
 * - Start with axum::serve()
 */
use std::{panic, process, sync::Arc};

use anyhow::Result;
use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::routing::get;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;
use crate::repos::token_repo::TokenRepo;
use crate::repos::user_store::SqlUserStore;
use crate::services::cache::ValkeyClient;
use crate::services::events::{EventDispatcher, OauthRevocationHandler};
use crate::services::oauth::HybridFlowValidator;
use crate::services::tokens::SqlTokenAuthority;
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,idp_oauth=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    // Keep the default hook as a fallback (prints to stderr with location/payload).
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Always surface panics via tracing so they don't get "lost"
        // (stderr can be hidden depending on how the process is launched.)
        tracing::error!(?info, "panic");

        // In development, fail fast: crash the whole process so we notice immediately.
        // In production, prefer the default behavior (stderr) and let the server keep running.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    let abort_on_panic = !config.app_env.is_production();
    init_panic_hook(abort_on_panic);

    tracing::info!(
        "starting identity provider in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;

    let cache = ValkeyClient::new(&config.valkey_url).await?;

    let user_store = Arc::new(SqlUserStore::new(
        pool.clone(),
        config.user_store_domain.clone(),
    ));
    let authority = Arc::new(SqlTokenAuthority::new(TokenRepo::new(pool), cache));

    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(Arc::new(OauthRevocationHandler::new(
        authority,
        config.revocation_priority,
    )));

    Ok(AppState::new(
        HybridFlowValidator::new(),
        Arc::new(dispatcher),
        user_store,
    ))
}

fn build_router(state: AppState, config: &Config) -> Router {
    async fn health() -> &'static str {
        "ok"
    }

    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api::v1::routes::routes())
        .layer(TraceLayer::new_for_http())
        .layer(build_cors(config))
        .with_state(state)
}

fn build_cors(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}
