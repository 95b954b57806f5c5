use clap::Parser;
use promoter_payouts::cli::Cli;
use promoter_payouts::PayoutError;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Load .env if present so REPORT_* and LOG_* settings are picked up
    let _ = dotenvy::dotenv();

    let config = promoter_payouts::config::config();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!("Starting payouts CLI in {:?} mode", config.environment);

    let cli = Cli::parse();
    let json_output = cli.json;

    if let Err(e) = promoter_payouts::cli::run(cli) {
        if json_output {
            if let Some(payout_error) = e.downcast_ref::<PayoutError>() {
                println!("{}", serde_json::to_string_pretty(&payout_error.to_json())?);
            }
        }
        match std::env::var("CLI_VERBOSE").as_deref() {
            Ok("true") | Ok("1") => eprintln!("Error: {e:?}"),
            _ => eprintln!("Error: {e}"),
        }
        std::process::exit(1);
    }

    Ok(())
}
