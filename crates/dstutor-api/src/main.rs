//! Data science tutor entry point.
//!
//! Binary name: `dstutor`
//!
//! Parses CLI arguments, loads configuration and the secret chain, then
//! dispatches to the appropriate command handler or starts the chat server.

mod cli;
mod http;
mod state;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use cli::{Cli, Commands, SetResource};
use dstutor_core::service::secret::SecretService;
use dstutor_infra::config::{load_config, resolve_data_dir};
use dstutor_infra::keychain::KeychainProvider;
use dstutor_infra::secret::chain::build_secret_chain;
use dstutor_observe::tracing_setup::{init_tracing, shutdown_tracing};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity; RUST_LOG wins when set.
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "info,dstutor=debug,dstutor_core=debug,dstutor_infra=debug",
        _ => "trace",
    };
    init_tracing(filter, cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let data_dir = cli.data_dir.clone().unwrap_or_else(resolve_data_dir);

    let secrets = SecretService::new(build_secret_chain(Some(KeychainProvider::new()), true));

    let result = match cli.command {
        Commands::Set { resource } => match resource {
            SetResource::Secret { key, value } => {
                cli::secret::set_secret(&secrets, &key, value.as_deref(), cli.json).await
            }
        },

        Commands::Status => match load_config(&data_dir).await {
            Ok(config) => cli::status::status(&data_dir, &config, &secrets, cli.json).await,
            Err(e) => Err(e.into()),
        },

        Commands::Serve { host, port } => match load_config(&data_dir).await {
            Ok(mut config) => {
                if let Some(host) = host {
                    config.server.host = host;
                }
                if let Some(port) = port {
                    config.server.port = port;
                }
                serve(config, &secrets, cli.quiet).await
            }
            Err(e) => Err(e.into()),
        },
    };

    shutdown_tracing();
    result
}

/// Validate config, resolve the credential and run the HTTP server until
/// Ctrl+C / SIGTERM. Nothing is bound if startup fails.
async fn serve(
    config: dstutor_types::config::TutorConfig,
    secrets: &SecretService,
    quiet: bool,
) -> anyhow::Result<()> {
    config.validate().context("invalid configuration")?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::init(config, secrets).await?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, backend = state.controller.backend_name(), "Tutor server listening");

    if !quiet {
        println!();
        println!(
            "  {} Data Science Tutor listening on {}",
            console::style("⚡").bold(),
            console::style(format!("http://{addr}")).cyan()
        );
        println!("  {}", console::style("Press Ctrl+C to stop").dim());
    }

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if !quiet {
        println!("\n  Server stopped.");
    }
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
///
/// If a handler cannot be installed, that branch never completes and the
/// other one still stops the server.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
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
    info!("Shutdown signal received");
}
