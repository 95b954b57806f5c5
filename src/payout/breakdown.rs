use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which bonus rule paid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BonusSource {
    Tier { threshold: u32 },
    Flat { threshold: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedBonus {
    pub source: BonusSource,
    pub amount: Decimal,
}

/// Minimum-guest penalty that scaled the base
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortfallPenalty {
    pub minimum_guests: u32,
    pub percent: Decimal,
    /// Amount taken off the base (base minus penalised base)
    pub reduction: Decimal,
}

/// Result of one payout calculation.
///
/// `calculated_payout` is never negative; `final_payout` is not floored and
/// differs from it by `manual_adjustment`, saturating at the `Decimal` bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutBreakdown {
    pub calculated_payout: Decimal,
    pub final_payout: Decimal,

    pub checkins_count: u32,
    pub effective_guests: Option<u32>,
    pub fixed_fee_component: Decimal,
    pub per_head_component: Decimal,
    pub base_payout: Decimal,
    pub shortfall_penalty: Option<ShortfallPenalty>,
    pub bonus: Option<AppliedBonus>,
    pub manual_adjustment: Decimal,
}

impl PayoutBreakdown {
    pub fn bonus_amount(&self) -> Decimal {
        self.bonus.as_ref().map_or(Decimal::ZERO, |b| b.amount)
    }

    /// True when the formula result went below zero and was floored
    pub fn was_floored(&self) -> bool {
        let reduction = self.shortfall_penalty.as_ref().map_or(Decimal::ZERO, |p| p.reduction);
        let penalised = self.base_payout.saturating_sub(reduction);
        penalised.saturating_add(self.bonus_amount()) < Decimal::ZERO
    }
}
