use clap::Parser;
use home_data_svc::core::ConfigProvider;
use home_data_svc::utils::{
    logger,
    validation::{validate_file_extensions, Validate},
};
use home_data_svc::{CliConfig, Server, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting home-data-svc");

    let result = match &cli.config {
        Some(path) => {
            validate_file_extensions("config", std::slice::from_ref(path), &["toml"])?;
            tracing::info!("Loading configuration from {}", path);
            let config = TomlConfig::from_file(path)?;
            run(&config).await
        }
        None => run(&cli).await,
    };

    if let Err(e) = &result {
        tracing::error!("❌ home-data-svc failed: {}", e);
    }
    result
}

async fn run<C: ConfigProvider + Validate>(config: &C) -> anyhow::Result<()> {
    // 驗證配置
    config.validate()?;

    let server = Server::new(config)?;
    tracing::info!("Binding to {}", server.listen_address());
    server.serve(shutdown_signal()).await?;
    Ok(())
}

/// Wait for SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::info!("Shutdown signal received");
}
