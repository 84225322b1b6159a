//! Backend-for-frontend of a pantry recipe finder.
//!
//!
//!
//! # General Infrastructure
//! - Frontend talks only to this server, never to the recipe or translation providers
//! - Recipe provider: ingredient search, then one detail lookup per match
//! - Translation provider: plain pass-through of free text
//! - Redis holds one favorites set per user
//! - Config and every client are built once at startup and shared through [`state::AppState`]
//!
//!
//!
//! # Endpoints
//!
//! | Method | Path | Result |
//! |---|---|---|
//! | GET | `/recipes?ingredients=<csv>` | matches zipped with their details |
//! | GET | `/getRecipeById?recipeId=<id>` | raw recipe detail |
//! | GET | `/translateText?text=<t>&targetLanguage=<code>` | `{"translatedText": ...}` |
//! | POST | `/addFav` `{userId, recipeId}` | 201 |
//! | GET | `/getFavs?userId=<id>` | list of favorites records |
//! | DELETE | `/removeFav` `{userId, recipeId}` | 201 |
//! | GET | `/health` | `OK` |
//!
//! `/api/flask/recipes` and `/api/flask/getRecipeById` answer like their short forms.
//!
//! Errors are `{"error": kind, "message": text}` with a 4xx/5xx status.
//!
//!
//!
//! # Notes
//!
//! ## Add/remove answer 201
//! Existing frontends check for it, so removal keeps answering 201 as well.
//!
//! ## Detail fan-out
//! Lookups run concurrently, at most `DETAIL_CONCURRENCY` in flight. Each carries the index of
//! its match so the response order never depends on which lookup finished first.
//!
//!
//!
//! # Setup
//!
//! Required secrets, from the environment or `/run/secrets/<NAME>`.
//! ```sh
//! export RECIPE_KEY=...
//! export TRANSLATE_KEY=...
//! ```
//!
//! Run with logs.
//! ```sh
//! RUST_LOG=info cargo run -p pantry
//! ```
//!
//! View current docs.
//! ```sh
//! cargo doc --open
//! ```

use anyhow::Context;
use tokio::{net::TcpListener, signal::ctrl_c};
#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod error;
pub mod favorites;
pub mod recipes;
pub mod routes;
pub mod state;
pub mod utils;

use config::Config;
use routes::create_router;
use state::AppState;

pub async fn start_server() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Loading config...");
    let config = Config::load()?;

    info!("Initializing state...");
    let state = AppState::new(config).await?;

    info!("Starting server...");
    let app = create_router(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
