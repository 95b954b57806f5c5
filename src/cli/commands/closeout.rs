use chrono::Utc;
use clap::Args;
use serde_json::json;
use uuid::Uuid;

use crate::cli::utils::{output_data, read_document, render_breakdown};
use crate::cli::OutputFormat;
use crate::error::PayoutError;
use crate::models::EventPromoterRow;
use crate::services::CloseoutService;
use crate::types::CheckinSource;

#[derive(Args, Debug)]
pub struct CloseoutArgs {
    #[arg(long, help = "Event being closed out")]
    pub event: Uuid,

    #[arg(long, help = "event_promoters rows (JSON or YAML), or - for stdin")]
    pub input: String,

    #[arg(long, help = "Also generate the pending payout run")]
    pub ledger: bool,
}

pub fn handle(args: CloseoutArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let rows: Vec<EventPromoterRow> = read_document(&args.input)?;
    let service = CloseoutService::new();
    let report = service.report(args.event, &rows).map_err(PayoutError::from)?;

    let run = if args.ledger {
        Some(service.payout_run(&report, Utc::now()).map_err(PayoutError::from)?)
    } else {
        None
    };

    let config = &crate::config::config().report;
    let data = json!({
        "report": report,
        "payout_run": run,
    });

    output_data(&output_format, &data, || {
        let mut lines = vec![format!("Closeout for event {}", report.event_id)];
        for line in &report.lines {
            let name = line.promoter_name.clone().unwrap_or_else(|| line.promoter_id.to_string());
            match line.checkin_source {
                CheckinSource::ManualOverride => lines.push(format!(
                    "{} (override: {} check-ins, actual {})",
                    name, line.checkins_count, line.actual_checkins
                )),
                _ => lines.push(name),
            }
            lines.extend(render_breakdown(config, &line.breakdown));
        }
        lines.push(format!("Total calculated: {}", config.format(report.total_calculated)));
        lines.push(format!("Total final:      {}", config.format(report.total_final)));
        if let Some(run) = &run {
            lines.push(format!("Payout run {} created with {} pending lines", run.id, run.lines.len()));
        }
        lines
    })
}
