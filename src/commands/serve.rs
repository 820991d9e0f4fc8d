//! `serve` command: runs the todo service until SIGINT/SIGTERM.

use crate::api::TodoService;
use crate::libs::config::{Config, Options, Overrides};
use crate::libs::messages::Message;
use crate::{msg_error, msg_info};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

include!(concat!(env!("OUT_DIR"), "/app_metadata.rs"));

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Port to listen on (0 picks a free port)
    #[arg(short, long)]
    port: Option<u16>,

    /// JSON file the todo list is persisted to
    #[arg(short, long)]
    store_file: Option<PathBuf>,
}

pub async fn cmd(serve_args: ServeArgs) -> Result<()> {
    let config = Config::read()?;
    let cli = Overrides {
        port: serve_args.port,
        store_file: serve_args.store_file,
    };
    let options = Options::resolve(cli, Overrides::from_env(), &config);

    tracing::info!(
        "{}",
        Message::ServiceVersion {
            name: APP_METADATA_NAME.to_string(),
            version: APP_METADATA_VERSION.to_string(),
        }
    );

    let service = TodoService::start(&options).await?;
    shutdown_signal().await;
    service.stop().await
}

/// Resolves once the process is asked to terminate.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {
                        msg_info!(Message::ReceivedSigterm);
                    }
                    _ = sigint.recv() => {
                        msg_info!(Message::ReceivedSigint);
                    }
                }
                return;
            }
            (Err(_), _) => msg_error!(Message::FailedToCreateSigtermHandler),
            (_, Err(_)) => msg_error!(Message::FailedToCreateSigintHandler),
        }
    }

    match tokio::signal::ctrl_c().await {
        Ok(()) => msg_info!(Message::ReceivedCtrlC),
        Err(e) => msg_error!(Message::CtrlCListenFailed(e.to_string())),
    }
}
