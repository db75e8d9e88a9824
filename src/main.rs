use clap::Parser;
use oncall_bot::adapters::{pagerduty::PagerDutyClient, slack};
use oncall_bot::utils::{logger, validation::Validate};
use oncall_bot::{BotConfig, BotService, CliConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting oncall-bot");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = BotConfig::from_file(&cli.config)?;
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let directory = Arc::new(config.directory()?);
    let teams: Vec<&str> = directory.known_teams().map(|t| t.as_str()).collect();
    tracing::info!("📋 Loaded {} team(s): {}", directory.len(), teams.join(", "));

    let roster = Arc::new(PagerDutyClient::new(
        &config.pagerduty.api_base,
        &config.pagerduty.token,
        config.query_timeout(),
    )?);
    let service = Arc::new(BotService::new(directory, roster));

    let app = slack::router(service);
    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    tracing::info!("✅ oncall-bot listening on {}", config.server.bind);

    axum::serve(listener, app).await?;

    Ok(())
}
