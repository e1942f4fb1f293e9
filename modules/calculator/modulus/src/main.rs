//! `modulus-server`: the modulus backend as a standalone process.
//!
//! Binds `0.0.0.0:50055` and serves until Ctrl+C or SIGTERM. A bind or serve
//! failure is logged and the process exits with a failure status.

use std::process::ExitCode;

use anyhow::Context;
use calc_bootstrap::{LoggingConfig, init_logging, spawn_shutdown_watcher};
use calc_transport_grpc::BoundGrpcServer;
use modulus::{ModulusModule, default_server_config};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> ExitCode {
    init_logging(&LoggingConfig::default());

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let error = format!("{e:#}");
            tracing::error!(%error, "modulus server terminated");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let cfg = default_server_config();
    let server = BoundGrpcServer::bind(&cfg)
        .await
        .context("modulus server cannot start")?;

    let cancel = CancellationToken::new();
    spawn_shutdown_watcher(cancel.clone());

    tracing::info!(endpoint = %server.endpoint(), "modulus server starting");
    ModulusModule::new()
        .serve(server, cancel)
        .await
        .context("modulus server stopped unexpectedly")
}
