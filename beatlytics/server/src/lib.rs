pub mod entity;
mod error;
mod web;

use std::net::SocketAddr;

use beatlytics_core::{config::Config, ServerInfo};
use beatlytics_metrics::DefaultMetrics;
use futures::{future::BoxFuture, FutureExt};
use sigfinn::{ExitStatus, LifecycleManager, Shutdown};

pub use self::{
    error::{Error, Result},
    web::{controller, router, ApiDoc, ServiceState},
};

/// Serve Beatlytics until a termination signal arrives.
///
/// # Errors
///
/// Returns an error if metrics can not be registered or the HTTP server
/// fails, for instance when the listening port is already taken.
pub async fn serve_with_shutdown(config: Config, server_info: ServerInfo) -> Result<()> {
    let Config { web } = config;

    let metrics = initialize_metrics()?;

    let service_state = ServiceState::new(metrics);

    let lifecycle_manager = LifecycleManager::<Error>::new();

    let _handle = lifecycle_manager.spawn(
        "Http Server",
        create_web_http_server_future(web.listen_address, service_state, server_info),
    );

    if let Ok(Err(err)) = lifecycle_manager.serve().await {
        tracing::error!("{err}");
        Err(err)
    } else {
        Ok(())
    }
}

#[tracing::instrument]
fn initialize_metrics() -> Result<DefaultMetrics> {
    tracing::info!("Registering metrics");

    let metrics = DefaultMetrics::new()?;

    tracing::info!("Registered metric `{}`", beatlytics_metrics::GENRE_PLAYS_METRIC_NAME);

    Ok(metrics)
}

fn create_web_http_server_future(
    listen_address: SocketAddr,
    service_state: ServiceState,
    server_info: ServerInfo,
) -> impl FnOnce(Shutdown) -> BoxFuture<'static, ExitStatus<Error>> {
    move |shutdown_signal| {
        async move {
            tracing::info!("Listen Web HTTP server endpoint on {listen_address}");

            let result =
                web::new_api_server(listen_address, service_state, server_info, shutdown_signal)
                    .await;

            match result {
                Ok(()) => {
                    tracing::info!("HTTP server is shut down gracefully");
                    ExitStatus::Success
                }
                Err(err) => ExitStatus::FatalError(Error::from(err)),
            }
        }
        .boxed()
    }
}
