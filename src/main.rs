use anyhow::Context;
use climate_ingest::{ingester::Ingester, settings::Settings};
use clap::Parser;
use tokio::{signal, task::JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[doc(hidden)]
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// config file, merged over config/default and under environment overrides
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let settings = Settings::new(args.config.as_deref()).context("cannot load config")?;
    let shutdown = CancellationToken::new();
    let mut ingesters = JoinSet::new();
    for (name, cfg) in settings.ingesters {
        let shutdown = shutdown.clone();
        ingesters.spawn(async move {
            let mut ingester = Ingester::new(&name, cfg)
                .await
                .with_context(|| format!("failed to create ingester {name}"))?;
            ingester.start(shutdown).await;
            Ok::<(), anyhow::Error>(())
        });
    }
    tokio::spawn(shutdown_signal(shutdown.clone()));

    let mut result = Ok(());
    while let Some(joined) = ingesters.join_next().await {
        let err = match joined {
            Ok(Ok(())) => continue,
            Ok(Err(e)) => e,
            Err(e) => anyhow::Error::new(e).context("ingester task failed"),
        };
        error!("{:#}", err);
        shutdown.cancel();
        if result.is_ok() {
            result = Err(err);
        }
    }
    info!("shutdown complete");
    result
}

async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = ?e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = ?e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
        _ = shutdown.cancelled() => return,
    }
    shutdown.cancel();
}
