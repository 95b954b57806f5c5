use clap::Args;
use rust_decimal::Decimal;

use crate::cli::utils::{output_data, read_document, render_breakdown};
use crate::cli::OutputFormat;
use crate::payout::{calculate_promoter_payout, PromoterContract};

#[derive(Args, Debug)]
pub struct CalculateArgs {
    #[arg(long, help = "Contract file (JSON or YAML), or - for stdin")]
    pub contract: String,

    #[arg(long, help = "Check-in count to pay against")]
    pub checkins: u32,

    #[arg(long, allow_hyphen_values = true, help = "Manual adjustment, replaces the contract's own")]
    pub adjustment: Option<Decimal>,
}

pub fn handle(args: CalculateArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let mut contract: PromoterContract = read_document(&args.contract)?;
    if args.adjustment.is_some() {
        contract.manual_adjustment_amount = args.adjustment;
    }

    let breakdown = calculate_promoter_payout(&contract, args.checkins);
    let report = &crate::config::config().report;

    output_data(&output_format, &breakdown, || {
        let mut lines = vec!["Payout".to_string()];
        lines.extend(render_breakdown(report, &breakdown));
        lines
    })
}
