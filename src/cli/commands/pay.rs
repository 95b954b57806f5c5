use chrono::Utc;
use clap::Args;
use uuid::Uuid;

use crate::cli::utils::{output_data, read_document};
use crate::cli::OutputFormat;
use crate::error::PayoutError;
use crate::models::PayoutRun;

#[derive(Args, Debug)]
pub struct PayArgs {
    #[arg(long, help = "Payout run produced by `closeout --ledger` (JSON or YAML), or - for stdin")]
    pub run: String,

    #[arg(long, help = "Promoter whose line is being paid")]
    pub promoter: Uuid,

    #[arg(long, allow_hyphen_values = true, help = "Payment reference (transfer id, cheque number)")]
    pub reference: String,

    #[arg(long, help = "Write the updated run to this file")]
    pub output: Option<String>,
}

pub fn handle(args: PayArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let mut run: PayoutRun = read_document(&args.run)?;
    run.mark_paid(args.promoter, &args.reference, Utc::now())
        .map_err(PayoutError::from)?;

    if let Some(path) = &args.output {
        let content = serde_json::to_string_pretty(&run)?;
        std::fs::write(path, content).map_err(|e| PayoutError::io(path.as_str(), e))?;
    }

    let config = &crate::config::config().report;
    output_data(&output_format, &run, || {
        let mut lines = Vec::new();
        if let Some(line) = run.line(args.promoter) {
            lines.push(format!(
                "Paid {} {} (reference {})",
                line.promoter_name.clone().unwrap_or_else(|| line.promoter_id.to_string()),
                config.format(line.final_payout),
                line.payment_reference.as_deref().unwrap_or_default()
            ));
        }
        if run.is_settled() {
            lines.push(format!("Payout run {} is settled", run.id));
        } else {
            lines.push(format!("Outstanding: {}", config.format(run.outstanding())));
        }
        lines
    })
}
