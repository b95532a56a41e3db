use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use oppscan::config::{Config, TickerMapping};
use oppscan::logging::init_logging;
use oppscan::report::{send_report, write_workbook, EmailEnv};
use oppscan::scanner::Scanner;
use oppscan::services::YahooProvider;

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(e) = run().await {
        error!(error = %e, "run aborted");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Missing .env is fine; variables may come from the real environment.
    let _ = dotenvy::dotenv();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.json".to_string());

    // Startup preconditions: config, mapping and mail credentials are
    // all fatal when missing, before any ticker is touched.
    let config = Config::from_file(&config_path)?;
    let mapping = TickerMapping::from_file(&config.mapping_file)?;
    let email_env = EmailEnv::from_env()?;

    info!(config = %config_path, tickers = mapping.len(), "configuration loaded");

    let provider = YahooProvider::new(Duration::from_secs(config.fetch_timeout_seconds))?;
    let scanner = Scanner::new(Arc::new(provider), config.clone());

    let report = scanner.run(&mapping).await;

    let workbook_bytes = write_workbook(&report, &config.output_file)?;
    info!(file = %config.output_file, "workbook written");

    send_report(&config, &email_env, report.opportunities.len(), workbook_bytes).await?;

    info!(
        found = report.opportunities.len(),
        skipped = report.skipped.len(),
        "run complete"
    );
    Ok(())
}
