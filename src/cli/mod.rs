pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "payouts")]
#[command(about = "Promoter payout calculator - estimates, closeout reports and payout runs")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Calculate one payout from a contract file and a check-in count")]
    Calculate(commands::calculate::CalculateArgs),

    #[command(about = "Estimate live earnings for a list of promoters")]
    Estimate(commands::estimate::EstimateArgs),

    #[command(about = "Build the closeout report (and optionally the payout run) for an event")]
    Closeout(commands::closeout::CloseoutArgs),

    #[command(about = "Mark one promoter's line in a payout run as paid")]
    Pay(commands::pay::PayArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Calculate(args) => commands::calculate::handle(args, output_format),
        Commands::Estimate(args) => commands::estimate::handle(args, output_format),
        Commands::Closeout(args) => commands::closeout::handle(args, output_format),
        Commands::Pay(args) => commands::pay::handle(args, output_format),
    }
}
