mod cli;
mod telemetry;

use crate::cli::CLI;
use clap::Parser;
use ddlink_cache::HostTracker;
use ddlink_core::{FallbackResolver, RedirectorDomains};
use ddlink_debrid::{AllDebridClient, DebridConfig};
use ddlink_dlprotect::{CachedResolver, CachedResolverConfig, DlProtectClient, DlProtectConfig};
use ddlink_gateway::{App, AppState};
use ddlink_unlock::UnlockService;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::try_parse()?;
    telemetry::init(config.log_format);

    let timeout = Duration::from_secs(config.request_timeout_secs);
    let domains = RedirectorDomains::default();

    let hosts = Arc::new(HostTracker::new());
    let debrid = Arc::new(AllDebridClient::new(
        DebridConfig {
            api_key: config.alldebrid_api_key.clone(),
            base_url: config.alldebrid_base_url.clone(),
            timeout,
        },
        hosts.clone(),
    )?);

    let dlprotect = DlProtectClient::new(
        DlProtectConfig::builder()
            .service_url(config.dlprotect_service_url.clone())
            .timeout(timeout)
            .disable_remote_cache(config.disable_remote_dlprotect_cache)
            .domains(domains.clone())
            .build(),
    )?;
    let fallback = Arc::new(CachedResolver::new(
        dlprotect,
        CachedResolverConfig::builder()
            .domains(domains.clone())
            .build(),
    ));

    let service = UnlockService::builder()
        .unlocker(debrid.clone())
        .redirector(debrid.clone())
        .fallback(fallback.clone())
        .domains(domains)
        .max_hops(config.max_hops)
        .build();

    let cache_stats = fallback.cache_stats().await;
    info!(
        listen_addr = %config.listen_addr,
        debrid_enabled = debrid.is_configured(),
        dlprotect_service_url = %config.dlprotect_service_url,
        dlprotect_cache_entries = cache_stats.as_ref().map(|stats| stats.entries),
        max_hops = config.max_hops,
        "starting gateway server"
    );

    let state = AppState::new(service, debrid, hosts);
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    axum::serve(listener, App::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server closed, shutting down fallback resolver");
    fallback.shutdown().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!(signal = "SIGINT", "received shutdown signal"),
        _ = terminate => info!(signal = "SIGTERM", "received shutdown signal"),
    }
}
