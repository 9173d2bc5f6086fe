use std::sync::Arc;

use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument};
use wallabag_client::CredentialCache;
use wallabot_core::{init_tracing, TelegramBot};
use wallabot_telegram::{run_notifier, run_repl};

use crate::components::build_bot_components;
use crate::config::BotConfig;
use crate::pipeline::{Dispatcher, Pipeline, PipelineSettings};

/// Main entry: validate config, init logging, build components, start the pipeline and
/// notifier, then run the Telegram REPL until it stops, a termination signal arrives, or
/// a pipeline stage dies.
/// All workers are awaited before returning.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    info!(
        database_url = %config.database_url(),
        site = %config.wallabag().site,
        "Initializing bot"
    );

    let components = build_bot_components(&config).await?;
    let shutdown = CancellationToken::new();

    let settings = PipelineSettings {
        queue_capacity: config.base().queue_capacity,
        rescan_interval: config.base().rescan_interval(),
    };
    let dispatcher = Dispatcher::new(components.client.clone(), CredentialCache::new());
    let (pipeline, ports) =
        Pipeline::spawn(components.repo.clone(), dispatcher, settings, shutdown.clone());

    let notifier = tokio::spawn(run_notifier(
        Arc::new(TelegramBot::from_teloxide(components.teloxide_bot.clone())),
        ports.notifications,
        shutdown.clone(),
    ));

    info!("Bot started successfully");

    tokio::select! {
        result = run_repl(components.teloxide_bot.clone(), components.filter.clone(), ports.intake) => {
            if let Err(e) = result {
                error!(error = %e, "Telegram REPL failed");
            }
            info!("Telegram REPL stopped");
        }
        _ = shutdown_signal() => {
            info!("Termination signal received");
        }
        _ = shutdown.cancelled() => {
            error!("Pipeline stopped unexpectedly, shutting down");
        }
    }

    pipeline.shutdown().await;
    if let Err(e) = notifier.await {
        error!(error = %e, "Notifier panicked");
    }

    info!("Bot stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
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
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
