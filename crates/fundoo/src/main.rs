use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fundoo::cli::{execute, format_output, Cli};
use fundoo::config::Config;
use fundoo::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the response envelope
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "fundoo=debug".into());
    let registry = tracing_subscriber::registry().with(filter);
    if std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json") {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    let config = Config::from_env();
    let state = AppState::new(&config).await?;

    let response = execute(&state, cli.command, cli.user_id).await?;
    println!("{}", format_output(&response, cli.format));

    // Let background email sends finish
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    Ok(())
}
