use std::{path::PathBuf, process};

use beatlytics_core::{ServerInfo, PROGRAM_NAME, PROJECT_NAME_WITH_INITIAL_CAPITAL};
use chrono::Utc;
use snafu::ResultExt;
use tokio::runtime::Runtime;

use crate::{
    config::{load_server_config, Config},
    error,
    error::{Error, Result},
    shadow::{BRANCH, PKG_VERSION, SHORT_COMMIT},
};

/// Run the server
#[allow(clippy::cognitive_complexity, clippy::result_large_err)]
pub fn run_server(config: Config, env_file: Result<PathBuf, dotenv::Error>) -> Result<()> {
    let Config { ref log, ref web } = config;

    log.init().context(error::InitializeLoggerSnafu)?;

    match env_file {
        Ok(path) => tracing::info!("Loaded environment from {}", path.display()),
        Err(err) if err.not_found() => tracing::info!("No .env file found"),
        Err(err) => tracing::warn!("Could not load .env file, error: {err}"),
    }

    let server_info = ServerInfo {
        version: PKG_VERSION.to_string(),
        commit_hash: SHORT_COMMIT.to_string(),
        branch: BRANCH.to_string(),
        start_time: Utc::now(),
    };

    tracing::info!("{PROGRAM_NAME} is initializing, pid: {}", process::id());
    tracing::info!("Server info: {server_info:?}");
    tracing::info!("Starting {PROJECT_NAME_WITH_INITIAL_CAPITAL} on port {}", web.port);

    tracing::info!("Initializing Tokio runtime");

    let exit_status = match Runtime::new().context(error::InitializeTokioRuntimeSnafu) {
        Ok(runtime) => runtime.block_on({
            async move {
                let config = load_server_config(config);

                beatlytics_server::serve_with_shutdown(config, server_info)
                    .await
                    .map_err(Error::from)
            }
        }),

        Err(err) => Err(err),
    };

    if let Err(ref error) = exit_status {
        tracing::error!(%error, "{PROGRAM_NAME} is aborted");
    }

    tracing::info!("{PROGRAM_NAME} is shutdown");
    exit_status
}
