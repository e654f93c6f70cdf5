mod config;
mod routes;
mod services;
mod state;

use std::process::ExitCode;

use painter::{CanvasState, FramebufferProvider, Loop};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;
use crate::services::display::FrameStore;

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is normal.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let frames = FrameStore::new();
    let painter = match Loop::start(&FramebufferProvider, frames.clone(), CanvasState::default()) {
        Ok(painter) => painter,
        Err(e) => {
            error!(error = %e, "execution loop failed to start");
            return ExitCode::FAILURE;
        }
    };

    let state = state::AppState::new(painter.handle(), config.parse_config(), frames.clone());
    let app = routes::app(state);

    let addr = config.bind_addr();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, %addr, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    info!(%addr, coords = %config.coords, "painter listening");
    let served = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await;
    if let Err(e) = &served {
        error!(error = %e, "server failed");
    }

    // PHASE: DRAIN
    // The listener is gone, so no new scripts arrive; apply what was accepted.
    let drained = tokio::time::timeout(
        config.shutdown_timeout,
        tokio::task::spawn_blocking(move || painter.stop_and_wait()),
    )
    .await;

    match drained {
        Ok(Ok(Ok(final_state))) => {
            info!(
                background = ?final_state.background,
                overlay = ?final_state.overlay,
                shapes = final_state.shapes.len(),
                frames = frames.published(),
                "painter stopped"
            );
            if served.is_ok() { ExitCode::SUCCESS } else { ExitCode::FAILURE }
        }
        Ok(Ok(Err(e))) => {
            error!(error = %e, "execution loop stopped with an error");
            ExitCode::FAILURE
        }
        Ok(Err(e)) => {
            error!(error = %e, "drain task failed");
            ExitCode::FAILURE
        }
        Err(_) => {
            error!(timeout_secs = config.shutdown_timeout.as_secs(), "timed out draining execution loop");
            // The blocking drain thread would hold the runtime open.
            std::process::exit(1);
        }
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown requested"),
        Err(e) => {
            error!(error = %e, "failed to install Ctrl-C handler; serving until killed");
            std::future::pending::<()>().await;
        }
    }
}
