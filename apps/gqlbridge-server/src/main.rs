//! gqlbridge server - GraphQL-over-HTTP endpoint.
//!
//! This binary serves the `gqlbridge-http` pipeline over HTTP/1.1 and HTTP/2.
//! Every validated request is answered by the built-in echo executor, which
//! makes the binary a conformance target for GraphQL-over-HTTP clients.
//!
//! # Usage
//!
//! ```text
//! GQLBRIDGE_LISTEN=127.0.0.1:4000 gqlbridge-server
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `GQLBRIDGE_LISTEN` | `0.0.0.0:4000` | Bind address |
//! | `GQLBRIDGE_MAX_BODY_SIZE` | `1048576` | Largest accepted POST body in bytes |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

mod config;
mod executor;

use anyhow::{Context, Result};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as HttpConnBuilder;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use gqlbridge_http::{GraphQLExecutor, GqlHttpConfig, GqlHttpService};

use crate::config::ServerConfig;
use crate::executor::EchoExecutor;

/// Server version reported at startup.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    Ok(())
}

/// Build the [`GqlHttpConfig`] from the server configuration.
fn build_http_config(config: &ServerConfig) -> GqlHttpConfig {
    GqlHttpConfig {
        max_body_size: config.max_body_size,
    }
}

/// Run the accept loop, serving connections until a shutdown signal is received.
async fn serve<E: GraphQLExecutor>(listener: TcpListener, service: GqlHttpService<E>) -> Result<()> {
    let graceful = hyper_util::server::graceful::GracefulShutdown::new();
    let http = HttpConnBuilder::new(TokioExecutor::new());

    let shutdown = async {
        tokio::signal::ctrl_c().await.ok();
        info!("received shutdown signal, draining connections");
    };

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = listener.accept() => {
                let (stream, peer_addr) = match result {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!(error = %e, "failed to accept connection");
                        continue;
                    }
                };

                let svc = service.clone();
                let conn = http.serve_connection(TokioIo::new(stream), svc);
                let conn = graceful.watch(conn.into_owned());

                tokio::spawn(async move {
                    if let Err(e) = conn.await {
                        error!(peer_addr = %peer_addr, error = %e, "connection error");
                    }
                });
            }

            () = &mut shutdown => {
                info!("shutting down gracefully");
                break;
            }
        }
    }

    graceful.shutdown().await;
    info!("all connections drained, exiting");

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::from_env().context("failed to read configuration")?;

    init_tracing(&config.log_level)?;

    info!(
        listen = %config.listen,
        max_body_size = config.max_body_size,
        version = VERSION,
        "starting gqlbridge server",
    );

    let service = GqlHttpService::new(EchoExecutor, build_http_config(&config));

    let listener = TcpListener::bind(config.listen)
        .await
        .with_context(|| format!("failed to bind to {}", config.listen))?;

    info!(addr = %config.listen, "listening for connections");

    serve(listener, service).await
}
