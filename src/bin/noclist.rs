use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use reqwest::Client;
use tracing::{error, info};

use noclist::config::proc_validator::validate_service_config;
use noclist::config::settings::RetryConfig;
use noclist::observability::metrics::encode_metrics;
use noclist::utils::config_loader;
use noclist::utils::constants::DEFAULT_CONFIG_PATH;
use noclist::utils::logging::{self, LogLevel};
use noclist::{NoclistClient, ServiceConfig};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: String,
    #[arg(long, env = "BADSEC_SERVER_URL")]
    base_url: Option<String>,
    #[arg(long, env = "MAX_RETRIES")]
    max_retries: Option<u32>,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
    /// dump request metrics to stderr before exiting
    #[arg(long)]
    print_metrics: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let result = run(&args).await;

    if args.print_metrics {
        match encode_metrics().await {
            Ok(text) => eprintln!("{}", text),
            Err(e) => error!("failed to encode metrics: {}", e),
        }
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // logging may not be initialised yet when config loading fails
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> Result<()> {
    // -------------------------------
    // 1. Load YAML config, apply CLI overrides
    // -------------------------------

    let service_config = load_config(args).await?;
    logging::run(&service_config, args.log_level)?;

    // -------------------------------
    // 2. Create request client
    // -------------------------------

    let mut client = NoclistClient::from_settings(Client::new(), &service_config.settings)
        .context("failed to create client")?;

    // -------------------------------
    // 3. Authenticate, then fetch the signed user list
    // -------------------------------

    info!("Authorizing...");
    client.authenticate().await.context("authentication failed")?;

    info!("Fetching users...");
    let users = client.fetch_users().await.context("fetching users failed")?;

    println!("{}", serde_json::to_string(&users)?);
    Ok(())
}

async fn load_config(args: &Args) -> Result<ServiceConfig> {
    let mut service_config = config_loader::run(&args.config).await?;

    if let Some(base_url) = &args.base_url {
        service_config.settings.server.base_url = base_url.to_owned();
    }
    if let Some(max_retries) = args.max_retries {
        let retry = service_config.settings.retry.get_or_insert_with(RetryConfig::default);
        retry.max_retries = Some(max_retries);
    }

    // overrides can break an otherwise valid file
    validate_service_config(&service_config)
        .map_err(|errors| anyhow::anyhow!("invalid config: {}", errors.join("; ")))?;
    Ok(service_config)
}
