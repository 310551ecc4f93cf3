//! SSO server binary.
//!
//! Loads the YAML config, connects to PostgreSQL and serves the auth core
//! over HTTP and gRPC until SIGINT or SIGTERM.

mod config;
mod logging;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use sso_api::{AppState, config::ApiConfig};
use sso_core::AuthService;
use sso_core::store::PgStore;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, info_span};

use crate::config::{Config, GrpcConfig, HttpConfig};

/// CLI arguments for the SSO server.
#[derive(Parser, Debug)]
#[command(name = "sso_server", about = "SSO authentication server", version)]
struct Args {
    /// Path to the YAML config file.
    #[arg(long, env = "CONFIG_PATH")]
    config: PathBuf,

    /// Apply embedded database migrations before serving.
    #[arg(long, default_value_t = false)]
    migrate: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    logging::init(cfg.env);

    info!(
        env = ?cfg.env,
        grpc_port = cfg.grpc.port,
        http_port = cfg.http_server.port,
        "starting application"
    );
    debug!(config = ?cfg, "loaded configuration");

    let pool = cfg.postgres.connect().await?;
    if args.migrate {
        info!("running database migrations");
        sso_core::migrate::migrate(&pool).await?;
    }

    let store = Arc::new(PgStore::new(pool));
    let auth = Arc::new(AuthService::with_store(
        info_span!("sso"),
        store,
        cfg.auth_config(),
    ));

    let shutdown = CancellationToken::new();
    tokio::spawn(wait_for_signal(shutdown.clone()));

    // Either server stopping takes the other one down with it.
    let http = {
        let shutdown = shutdown.clone();
        let auth = auth.clone();
        let http_cfg = cfg.http_server.clone();
        async move {
            let result = serve_http(auth, &http_cfg, shutdown.clone()).await;
            shutdown.cancel();
            result
        }
    };
    let grpc = {
        let shutdown = shutdown.clone();
        let grpc_cfg = cfg.grpc.clone();
        async move {
            let result = serve_grpc(auth, &grpc_cfg, shutdown.clone()).await;
            shutdown.cancel();
            result
        }
    };

    let (http_result, grpc_result) = tokio::join!(http, grpc);
    http_result?;
    grpc_result?;

    info!("application stopped");
    Ok(())
}

async fn serve_http(
    auth: Arc<AuthService>,
    cfg: &HttpConfig,
    shutdown: CancellationToken,
) -> std::io::Result<()> {
    let config = ApiConfig::new(cfg.port, Duration::from_secs(cfg.timeout_secs));
    let listener = TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "http server listening");

    let app = sso_api::router(AppState { auth, config });
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .inspect_err(|e| error!(error = %e, "http server failed"))?;

    info!("http server stopped");
    Ok(())
}

async fn serve_grpc(
    auth: Arc<AuthService>,
    cfg: &GrpcConfig,
    shutdown: CancellationToken,
) -> Result<(), tonic::transport::Error> {
    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.port));
    info!(%addr, "grpc server listening");

    tonic::transport::Server::builder()
        .timeout(Duration::from_secs(cfg.timeout_secs))
        .add_service(sso_grpc::auth_server(auth))
        .serve_with_shutdown(addr, async move { shutdown.cancelled().await })
        .await
        .inspect_err(|e| error!(error = %e, "grpc server failed"))?;

    info!("grpc server stopped");
    Ok(())
}

/// Cancel `shutdown` on SIGINT or SIGTERM.
async fn wait_for_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "cannot listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!(signal = "SIGINT", "caught signal; shutting down"),
        _ = terminate => info!(signal = "SIGTERM", "caught signal; shutting down"),
        _ = shutdown.cancelled() => return,
    }
    shutdown.cancel();
}
