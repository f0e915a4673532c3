#![warn(clippy::pedantic, clippy::all, clippy::nursery)]

use registrar::{
    config::RuntimeConfiguration,
    error::{BindSnafu, RegistrarResult, ServeSnafu},
    routes::router,
    state::RegistrarState,
};
use snafu::ResultExt;
use tokio::{net::TcpListener, signal};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(?e, "Unable to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(e) => {
                error!(?e, "Unable to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    warn!("signal received, starting graceful shutdown");
}

async fn serve(config: RuntimeConfiguration) -> RegistrarResult<()> {
    let server_ip = config.server_ip().to_string();
    info!(backend = %config.endpoints().base(), "Using student backend");

    let app = router(RegistrarState::new(config)?)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(&server_ip).await.context(BindSnafu {
        address: server_ip.clone(),
    })?;

    info!(?server_ip, "Listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context(ServeSnafu)
}

#[tokio::main]
async fn main() {
    //a missing .env is fine, everything has a default
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("not loading .env: {e}");
    }

    if let Err(e) = tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .finish(),
    ) {
        eprintln!("unable to set tracing subscriber: {e}");
    }

    info!("`tracing` online");

    let result = match RuntimeConfiguration::new() {
        Ok(config) => serve(config).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        error!(?e, "Registrar stopped");
        std::process::exit(1);
    }
}
