#![allow(dead_code)]

use std::io::Write;
use std::process::{Command, Output};
use std::str::FromStr;

use anyhow::{Context, Result};
use promoter_payouts::models::EventPromoterRow;
use promoter_payouts::PromoterContract;
use rust_decimal::Decimal;
use tempfile::NamedTempFile;
use uuid::Uuid;

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap_or_else(|e| panic!("bad decimal literal {s:?}: {e}"))
}

pub fn row(event_id: Uuid, contract: &PromoterContract, checkins: i64) -> EventPromoterRow {
    let mut row = EventPromoterRow::new(event_id, Uuid::new_v4()).with_contract(contract);
    row.checkins_count = Some(checkins);
    row
}

/// Write `content` to a temp file that is removed when the handle drops.
/// The extension matters: `.yaml` inputs take the YAML parser.
pub fn temp_file(extension: &str, content: &str) -> Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix("payouts_test_")
        .suffix(&format!(".{}", extension))
        .tempfile()
        .context("failed to create temp file")?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("failed to write {}", file.path().display()))?;
    file.flush()?;
    Ok(file)
}

pub fn path_arg(file: &NamedTempFile) -> &str {
    file.path().to_str().expect("temp path is valid UTF-8")
}

/// Run the built `payouts` binary with a quiet, deterministic environment
pub fn run_cli(args: &[&str]) -> Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_payouts"))
        .args(args)
        .env("APP_ENV", "production")
        .env("REPORT_CURRENCY", "USD")
        .env("REPORT_DISPLAY_SCALE", "2")
        .env("RUST_LOG", "off")
        .output()
        .context("failed to run payouts binary")
}

pub fn stdout_json(output: &Output) -> Result<serde_json::Value> {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).with_context(|| format!("stdout was not JSON: {}", stdout))
}
