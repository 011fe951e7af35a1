//! Marketing plan webhook service entry point.
//!
//! Binary name: `marketplan`
//!
//! Loads `.env`, installs tracing, resolves configuration, then dispatches to
//! the requested command.

mod cli;
mod http;
mod state;

use clap::Parser;

use cli::{Cli, Commands};
use marketplan_observe::tracing_setup::{init_tracing, shutdown_tracing};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    init_tracing(cli.log_directive(), cli.log_format.into(), cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    match &dotenv {
        Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "Ignoring unreadable .env file"),
    }

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        // Rendering needs no configuration or credentials.
        Commands::Render { file } => {
            cli::render::render(&file).await?;
        }

        Commands::Check => {
            let state = AppState::init(cli.config.as_deref()).await;
            cli::check::check(&state, cli.json)?;
        }

        Commands::Serve { port, host } => {
            let state = AppState::init(cli.config.as_deref()).await;
            let host = host.unwrap_or_else(|| state.config.server.host.clone());
            let port = port.unwrap_or(state.config.server.port);
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            tracing::info!(%addr, ready = state.readiness().is_ready(), "Server listening");
            if !cli.quiet {
                println!(
                    "  {} Marketing plan webhook listening on {}",
                    console::style("⚡").bold(),
                    console::style(format!("http://{addr}")).cyan()
                );
                if !state.readiness().is_ready() {
                    println!(
                        "  {} {} configuration problem(s); see GET /ready",
                        console::style("!").yellow().bold(),
                        state.readiness().problems().len()
                    );
                }
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            tracing::info!("Server stopped");
        }
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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
