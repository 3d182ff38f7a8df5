use anyhow::Context;
use calc_server::utils::logger;
use calc_server::{router_from_settings, CliConfig, Settings};
use clap::Parser;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let settings = match Settings::load(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(2);
        }
    };

    logger::init_logger(
        settings.log_level.as_deref(),
        settings.verbose,
        settings.log_json,
    );
    tracing::debug!("settings: {:?}", settings);

    if !settings.static_dir.join("index.html").exists() {
        tracing::warn!(
            "no index.html under {}; non-API paths will return 404",
            settings.static_dir.display()
        );
    }

    let router = router_from_settings(&settings);
    let listener = TcpListener::bind(settings.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", settings.bind_addr()))?;
    tracing::info!("Calculator service listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Calculator service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
