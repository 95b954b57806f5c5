use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

use super::ServiceError;
use crate::config::ReportConfig;
use crate::models::{EventPromoterRow, PayoutLine, PayoutRun};
use crate::payout::{calculate_promoter_payout, PayoutBreakdown, PromoterContract};
use crate::types::CheckinSource;

/// A staff override replaces the automatic count when present
pub fn resolve_checkins(actual: u32, manual_override: Option<u32>) -> (u32, CheckinSource) {
    match manual_override {
        Some(count) => (count, CheckinSource::ManualOverride),
        None => (actual, CheckinSource::Actual),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloseoutLine {
    pub promoter_id: Uuid,
    pub promoter_name: Option<String>,
    pub checkins_count: u32,
    pub checkin_source: CheckinSource,
    /// Actual count, kept for the report when an override was used
    pub actual_checkins: u32,
    pub contract: PromoterContract,
    pub breakdown: PayoutBreakdown,
    pub display_calculated: Decimal,
    pub display_final: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloseoutReport {
    pub event_id: Uuid,
    pub currency: String,
    pub lines: Vec<CloseoutLine>,
    pub total_calculated: Decimal,
    pub total_final: Decimal,
}

/// End-of-event reconciliation: report figures and payout ledger lines
pub struct CloseoutService {
    report: ReportConfig,
}

impl CloseoutService {
    pub fn new() -> Self {
        Self::with_config(crate::config::config().report.clone())
    }

    pub fn with_config(report: ReportConfig) -> Self {
        Self { report }
    }

    /// Build the closeout report for one event.
    /// Manual check-in overrides and persisted manual adjustments both apply here.
    pub fn report(&self, event_id: Uuid, rows: &[EventPromoterRow]) -> Result<CloseoutReport, ServiceError> {
        let mut seen = HashSet::new();
        let mut lines = Vec::with_capacity(rows.len());

        for row in rows {
            if row.event_id != event_id {
                return Err(ServiceError::EventMismatch {
                    promoter_id: row.promoter_id,
                    expected: event_id,
                    found: row.event_id,
                });
            }
            if !seen.insert(row.promoter_id) {
                return Err(ServiceError::DuplicatePromoter(row.promoter_id));
            }

            lines.push(self.closeout_line(row)?);
        }

        let total_calculated = lines
            .iter()
            .fold(Decimal::ZERO, |acc, l| acc.saturating_add(l.breakdown.calculated_payout));
        let total_final = lines
            .iter()
            .fold(Decimal::ZERO, |acc, l| acc.saturating_add(l.breakdown.final_payout));

        tracing::info!(
            %event_id,
            promoters = lines.len(),
            %total_calculated,
            %total_final,
            "built closeout report"
        );

        Ok(CloseoutReport {
            event_id,
            currency: self.report.currency.clone(),
            lines,
            total_calculated,
            total_final,
        })
    }

    /// One pending ledger line per report line
    pub fn payout_run(&self, report: &CloseoutReport, created_at: DateTime<Utc>) -> Result<PayoutRun, ServiceError> {
        let mut seen = HashSet::new();
        let mut lines = Vec::with_capacity(report.lines.len());

        for line in &report.lines {
            if !seen.insert(line.promoter_id) {
                return Err(ServiceError::DuplicatePromoter(line.promoter_id));
            }
            lines.push(PayoutLine::from_breakdown(
                report.event_id,
                line.promoter_id,
                line.promoter_name.clone(),
                line.contract.clone(),
                line.checkin_source,
                &line.breakdown,
                created_at,
            ));
        }

        let run = PayoutRun::new(report.event_id, lines, created_at);
        tracing::info!(
            run_id = %run.id,
            event_id = %run.event_id,
            lines = run.lines.len(),
            total = %run.total(),
            "created payout run"
        );
        Ok(run)
    }

    fn closeout_line(&self, row: &EventPromoterRow) -> Result<CloseoutLine, ServiceError> {
        let contract = row.contract()?;
        let actual_checkins = row.actual_checkins();
        let (checkins_count, checkin_source) = resolve_checkins(actual_checkins, row.checkins_override());

        if checkin_source == CheckinSource::ManualOverride {
            tracing::debug!(
                promoter_id = %row.promoter_id,
                actual_checkins,
                checkins_count,
                "using manual check-in override"
            );
        }

        let breakdown = calculate_promoter_payout(&contract, checkins_count);
        Ok(CloseoutLine {
            promoter_id: row.promoter_id,
            promoter_name: row.promoter_name.clone(),
            checkins_count,
            checkin_source,
            actual_checkins,
            display_calculated: self.report.round(breakdown.calculated_payout),
            display_final: self.report.round(breakdown.final_payout),
            contract,
            breakdown,
        })
    }
}

impl Default for CloseoutService {
    fn default() -> Self {
        Self::new()
    }
}
