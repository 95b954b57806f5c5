use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;
use std::io::Read;
use std::path::Path;

use crate::cli::OutputFormat;
use crate::config::ReportConfig;
use crate::error::PayoutError;
use crate::payout::{BonusSource, PayoutBreakdown};

/// Read a JSON or YAML document from a file, or stdin when `path` is "-"
pub fn read_document<T: DeserializeOwned>(path: &str) -> Result<T, PayoutError> {
    let content = if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| PayoutError::io("stdin", e))?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(|e| PayoutError::io(path, e))?
    };

    parse_document(path, &content)
}

/// YAML files by extension; everything else is tried as JSON first
pub fn parse_document<T: DeserializeOwned>(path: &str, content: &str) -> Result<T, PayoutError> {
    let is_yaml = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    if is_yaml {
        return serde_yaml::from_str(content).map_err(|e| PayoutError::parse(path, e.to_string()));
    }

    serde_json::from_str(content).or_else(|json_err| {
        serde_yaml::from_str(content).map_err(|_| PayoutError::parse(path, json_err.to_string()))
    })
}

/// Print the data payload in the appropriate format
pub fn output_data<T: Serialize>(
    output_format: &OutputFormat,
    data: &T,
    text_lines: impl FnOnce() -> Vec<String>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let response = json!({
                "success": true,
                "data": data,
            });
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            for line in text_lines() {
                println!("{}", line);
            }
        }
    }
    Ok(())
}

/// Human-readable itemization of one breakdown
pub fn render_breakdown(report: &ReportConfig, breakdown: &PayoutBreakdown) -> Vec<String> {
    let mut lines = vec![format!("  Check-ins:          {}", breakdown.checkins_count)];

    if let Some(guests) = breakdown.effective_guests {
        if guests != breakdown.checkins_count {
            lines.push(format!("  Paid guests:        {}", guests));
        }
        lines.push(format!("  Per-head:           {}", report.format(breakdown.per_head_component)));
    }
    if !breakdown.fixed_fee_component.is_zero() {
        lines.push(format!("  Fixed fee:          {}", report.format(breakdown.fixed_fee_component)));
    }
    if let Some(penalty) = &breakdown.shortfall_penalty {
        lines.push(format!(
            "  Shortfall:          -{} ({}% paid below {} guests)",
            report.format(penalty.reduction),
            penalty.percent,
            penalty.minimum_guests
        ));
    }
    if let Some(bonus) = &breakdown.bonus {
        let label = match bonus.source {
            BonusSource::Tier { threshold } => format!("tier at {}", threshold),
            BonusSource::Flat { threshold } => format!("at {}", threshold),
        };
        lines.push(format!("  Bonus:              {} ({})", report.format(bonus.amount), label));
    }

    lines.push(format!("  Calculated payout:  {}", report.format(breakdown.calculated_payout)));
    if !breakdown.manual_adjustment.is_zero() {
        lines.push(format!("  Manual adjustment:  {}", report.format(breakdown.manual_adjustment)));
    }
    lines.push(format!("  Final payout:       {}", report.format(breakdown.final_payout)));
    lines
}
