//! Operator console.
//!
//! Commands are read from stdin on their own task and never touch the
//! request path; shutdown is signalled through a [`CancellationToken`] that
//! the server also listens on.

use std::io::BufRead;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::error::Result;
use crate::state::AppState;

pub const PROMPT: &str = "Stop to shutdown the server: ";

/// One line of console input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminCommand {
    Stop,
    Wipe,
    Invalid(String),
}

impl AdminCommand {
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            "stop" => Self::Stop,
            "admin wipe" => Self::Wipe,
            other => Self::Invalid(other.to_string()),
        }
    }
}

/// Deletes every user and every saved location.
pub async fn wipe(state: &AppState) -> Result<()> {
    let users = state.users.delete_all().await?;
    let locations = state.locations.delete_all().await?;
    tracing::warn!(users, locations, "wiped all users and locations");
    Ok(())
}

/// Forwards stdin lines from a dedicated OS thread.
///
/// A blocking read parked on the runtime's blocking pool would stall
/// runtime shutdown; a detached thread does not.
pub fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(8);
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.blocking_send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "failed to read admin console");
                    break;
                }
            }
        }
    });
    rx
}

/// Executes commands until `stop`, end of input, or cancellation.
pub async fn run_console(
    mut commands: mpsc::Receiver<String>,
    state: AppState,
    shutdown: CancellationToken,
) {
    println!("{PROMPT}");

    loop {
        let line = tokio::select! {
            _ = shutdown.cancelled() => return,
            line = commands.recv() => line,
        };

        let Some(line) = line else {
            tracing::info!("admin console closed");
            return;
        };

        match AdminCommand::parse(&line) {
            AdminCommand::Stop => {
                println!("Shutting down the server");
                shutdown.cancel();
                return;
            }
            AdminCommand::Wipe => {
                if let Err(e) = wipe(&state).await {
                    tracing::error!(error = %e, "admin wipe failed");
                }
            }
            AdminCommand::Invalid(command) => {
                tracing::warn!("Invalid command: {command}");
            }
        }
        println!("{PROMPT}");
    }
}

/// Resolves on Ctrl+C, SIGTERM (unix), or when `shutdown` is cancelled.
pub async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
        _ = shutdown.cancelled() => {},
    }

    shutdown.cancel();
    tracing::info!("shutdown signal received");
}
