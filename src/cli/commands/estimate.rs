use clap::Args;
use serde::Deserialize;

use crate::cli::utils::{output_data, read_document};
use crate::cli::OutputFormat;
use crate::models::EventPromoterRow;
use crate::services::EarningsService;

#[derive(Args, Debug)]
pub struct EstimateArgs {
    #[arg(long, help = "List of {row, live_checkins} entries (JSON or YAML), or - for stdin")]
    pub input: String,
}

#[derive(Debug, Deserialize)]
struct EstimateInput {
    row: EventPromoterRow,
    live_checkins: u32,
}

pub fn handle(args: EstimateArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let inputs: Vec<EstimateInput> = read_document(&args.input)?;
    let service = EarningsService::new();
    let estimates = service.estimate_all(inputs.iter().map(|i| (&i.row, i.live_checkins)));

    output_data(&output_format, &estimates, || {
        if estimates.is_empty() {
            return vec!["No estimates".to_string()];
        }
        estimates
            .iter()
            .map(|e| {
                format!(
                    "{}  {} check-ins  estimated {}",
                    e.promoter_name.clone().unwrap_or_else(|| e.promoter_id.to_string()),
                    e.checkins_count,
                    e.display_amount
                )
            })
            .collect()
    })
}
