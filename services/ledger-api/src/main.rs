//! Tally Ledger API
//!
//! Personal bookkeeping service: accounts, categories, expenses and
//! spending reports behind bearer-token authentication.
//!
//! ## REST Endpoints
//!
//! - `POST /auth/register` - Create an account, returns a token
//! - `POST /auth/login` - Exchange credentials for a token
//! - `GET /users/me` - Current user's profile
//! - `PUT /users/me` - Update email and/or password
//! - `GET /categories` - List visible categories
//! - `POST /categories` - Create a category
//! - `PUT /categories/{id}` - Rename a category
//! - `DELETE /categories/{id}` - Delete a category
//! - `GET /expenses` - List expenses (`category`/`from`/`to` filters)
//! - `POST /expenses` - Record an expense
//! - `GET /expenses/{id}` - Fetch an expense
//! - `PUT /expenses/{id}` - Update an expense
//! - `DELETE /expenses/{id}` - Delete an expense
//! - `GET /reports/summary` - Spending summary
//!
//! ## Health Endpoints
//!
//! - `GET /` - Service banner
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe

mod config;
mod error;
mod extractors;
mod handlers;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post, put};
use tally_auth_core::AuthService;
use tally_db::pg::Repositories;
use tally_ledger_core::LedgerService;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("ledger_api=debug".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Tally Ledger API");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!(http_port = config.http_port, "Configuration loaded");

    // Create database pool and bring the schema up to date
    let pool = tally_db::create_pool(&config.database_url).await?;
    tally_db::MIGRATOR.run(&pool).await?;
    tracing::info!("Database ready");

    // Create repositories
    let repos = Repositories::new(pool.clone());

    // Create services
    let auth = AuthService::new(&config.auth, Arc::new(repos.users.clone()))?;
    let ledger = LedgerService::new(
        Arc::new(repos.categories.clone()),
        Arc::new(repos.expenses.clone()),
    );

    // Create application state
    let state = AppState::new(auth, ledger, pool, config.clone());

    // Build HTTP router
    let app = build_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    run_http_server(app, addr).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn build_router(state: AppState) -> Router {
    let request_timeout = state.request_timeout();

    // API routes; everything except register/login requires a bearer token
    let api = Router::new()
        .route("/auth/register", post(handlers::register))
        .route("/auth/login", post(handlers::login))
        .route("/users/me", get(handlers::get_me).put(handlers::update_me))
        .route(
            "/categories",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route(
            "/categories/{id}",
            put(handlers::update_category).delete(handlers::delete_category),
        )
        .route(
            "/expenses",
            get(handlers::list_expenses).post(handlers::create_expense),
        )
        .route(
            "/expenses/{id}",
            get(handlers::get_expense)
                .put(handlers::update_expense)
                .delete(handlers::delete_expense),
        )
        .route("/reports/summary", get(handlers::summary));

    // Health routes (no timeout - must always respond quickly)
    let health_routes = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/ready", get(handlers::ready));

    // Build middleware stack (order matters - outermost first)
    let middleware = ServiceBuilder::new()
        // Request ID propagation (outermost)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        // Tracing with request details
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // CORS
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        // Request timeout (innermost - closest to handler)
        .layer(TimeoutLayer::new(request_timeout));

    // Combine all routes
    Router::new()
        .merge(api)
        .layer(middleware)
        .merge(health_routes) // Health routes without timeout
        .with_state(state)
}

async fn run_http_server(app: Router, addr: SocketAddr) -> anyhow::Result<()> {
    tracing::info!("HTTP server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
