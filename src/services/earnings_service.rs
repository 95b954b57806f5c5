use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::ReportConfig;
use crate::models::{ContractError, EventPromoterRow};
use crate::payout::{calculate_promoter_payout, PayoutBreakdown};

/// Live "estimated earnings" figure for one promoter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarningsEstimate {
    pub event_id: Uuid,
    pub promoter_id: Uuid,
    pub promoter_name: Option<String>,
    pub checkins_count: u32,
    pub estimated_payout: Decimal,
    pub display_amount: String,
    pub breakdown: PayoutBreakdown,
}

/// Dashboard estimates. Manual adjustments are never part of an estimate.
pub struct EarningsService {
    report: ReportConfig,
}

impl EarningsService {
    pub fn new() -> Self {
        Self::with_config(crate::config::config().report.clone())
    }

    pub fn with_config(report: ReportConfig) -> Self {
        Self { report }
    }

    pub fn estimate(&self, row: &EventPromoterRow, live_checkins: u32) -> Result<EarningsEstimate, ContractError> {
        let contract = row.contract()?.without_adjustment();
        if contract.is_empty() {
            tracing::debug!(
                promoter_id = %row.promoter_id,
                event_id = %row.event_id,
                "estimating against a contract with no earning rules"
            );
        }

        let breakdown = calculate_promoter_payout(&contract, live_checkins);
        Ok(EarningsEstimate {
            event_id: row.event_id,
            promoter_id: row.promoter_id,
            promoter_name: row.promoter_name.clone(),
            checkins_count: live_checkins,
            estimated_payout: breakdown.calculated_payout,
            display_amount: self.report.format(breakdown.calculated_payout),
            breakdown,
        })
    }

    /// Estimate every row; malformed contracts are skipped, not fatal
    pub fn estimate_all<'a, I>(&self, rows: I) -> Vec<EarningsEstimate>
    where
        I: IntoIterator<Item = (&'a EventPromoterRow, u32)>,
    {
        rows.into_iter()
            .filter_map(|(row, live_checkins)| match self.estimate(row, live_checkins) {
                Ok(estimate) => Some(estimate),
                Err(e) => {
                    tracing::warn!(
                        promoter_id = %row.promoter_id,
                        event_id = %row.event_id,
                        error = %e,
                        "skipping estimate for malformed contract"
                    );
                    None
                }
            })
            .collect()
    }
}

impl Default for EarningsService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payout::PromoterContract;
    use crate::testing::{dec, row_for};

    #[test]
    fn estimate_ignores_manual_adjustment() {
        let contract = PromoterContract::new()
            .with_per_head(dec("10"))
            .with_manual_adjustment(Some(dec("-500")));
        let row = row_for(Uuid::new_v4(), &contract);
        let service = EarningsService::with_config(ReportConfig::default());

        let estimate = service.estimate(&row, 3).unwrap();
        assert_eq!(estimate.estimated_payout, dec("30"));
        assert_eq!(estimate.breakdown.final_payout, dec("30"));
        assert_eq!(estimate.display_amount, "30.00 USD");
    }

    #[test]
    fn malformed_rows_are_skipped() {
        let event_id = Uuid::new_v4();
        let good = row_for(event_id, &PromoterContract::new().with_fixed_fee(dec("50")));
        let mut bad = row_for(event_id, &PromoterContract::new());
        bad.per_head_min = Some(-2);

        let service = EarningsService::with_config(ReportConfig::default());
        let estimates = service.estimate_all(vec![(&good, 1), (&bad, 1)]);
        assert_eq!(estimates.len(), 1);
        assert_eq!(estimates[0].promoter_id, good.promoter_id);
    }
}
