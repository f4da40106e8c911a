//! # stackstart
//!
//! Binary entry point: parses the CLI, loads settings from the environment,
//! wires the Portainer client and webhook notifier, and runs the stack
//! sequence once.

#![deny(unsafe_code)]

mod cli;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info, warn};

use stackstart_core::{Notifier, StackApi};
use stackstart_notify::WebhookNotifier;
use stackstart_portainer::PortainerClient;
use stackstart_runtime::{RunOutcome, StackStarter};
use stackstart_settings::Settings;
use stackstart_telemetry::{TelemetryConfig, init_telemetry};

use crate::cli::Cli;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_telemetry(&TelemetryConfig {
        format: cli.log_format,
        ..TelemetryConfig::default()
    });

    info!(version = env!("CARGO_PKG_VERSION"), "stackstart starting");

    let success = match Settings::from_env() {
        Ok(settings) => run(&settings).await,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            false
        }
    };

    if cli.exit_on_finish {
        return if success {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        };
    }

    if let Err(e) = idle().await {
        error!(error = %e, "shutdown wait failed");
    }
    info!("shutting down");
    ExitCode::SUCCESS
}

/// Wire the API client and notifier, then start every stack.
async fn run(settings: &Settings) -> bool {
    let api: Arc<dyn StackApi> = match PortainerClient::from_settings(settings) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!(error = %e, "failed to build Portainer client");
            return false;
        }
    };

    let notifier: Option<Arc<dyn Notifier>> = match WebhookNotifier::from_settings(settings) {
        Some(Ok(notifier)) => Some(Arc::new(notifier)),
        Some(Err(e)) => {
            warn!(error = %e, "webhook disabled; failed to build client");
            None
        }
        None => None,
    };

    info!(
        stacks = ?settings.stack_sequence,
        portainer = %settings.base_url,
        webhook = notifier.is_some(),
        "starting stack sequence"
    );

    match StackStarter::new(settings, api, notifier).run().await {
        RunOutcome::Completed { stacks } => {
            info!(?stacks, "stack sequence complete");
            true
        }
        RunOutcome::Failed { stack_id, reason } => {
            error!(stack_id, reason = %reason.message(), "stack sequence aborted");
            false
        }
    }
}

/// Keep the process alive until Ctrl-C or SIGTERM.
async fn idle() -> anyhow::Result<()> {
    info!("run finished; idling until interrupted");
    let mut heartbeat = tokio::time::interval(HEARTBEAT_INTERVAL);
    heartbeat.tick().await;

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = &mut shutdown => return result,
            _ = heartbeat.tick() => tracing::debug!("idle"),
        }
    }
}

#[cfg(unix)]
async fn shutdown_signal() -> anyhow::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigterm = signal(SignalKind::terminate()).context("installing SIGTERM handler")?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result.context("listening for ctrl-c")?,
        _ = sigterm.recv() => info!("received SIGTERM"),
    }
    Ok(())
}

#[cfg(not(unix))]
async fn shutdown_signal() -> anyhow::Result<()> {
    tokio::signal::ctrl_c()
        .await
        .context("listening for ctrl-c")
}
