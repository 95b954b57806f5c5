use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One step of a tiered bonus: reaching `threshold` check-ins earns `amount`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusTier {
    pub threshold: u32,
    pub amount: Decimal,
}

impl BonusTier {
    pub fn new(threshold: u32, amount: Decimal) -> Self {
        Self { threshold, amount }
    }
}

/// Commission terms agreed with a promoter for one event.
///
/// Every field is optional and `None` means the rule does not apply. This is
/// not the same as zero: a `per_head_rate` of 0 still clamps the guest count,
/// while an absent rate skips the per-head component entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromoterContract {
    pub per_head_rate: Option<Decimal>,
    /// Guarantee floor for the per-head count
    pub per_head_min: Option<u32>,
    /// Cap for the per-head count
    pub per_head_max: Option<u32>,
    pub fixed_fee: Option<Decimal>,
    pub minimum_guests: Option<u32>,
    /// Percentage (0-100) of the base paid when attendance misses `minimum_guests`
    pub below_minimum_percent: Option<Decimal>,
    pub bonus_threshold: Option<u32>,
    pub bonus_amount: Option<Decimal>,
    /// Takes precedence over `bonus_threshold`/`bonus_amount` when non-empty
    pub bonus_tiers: Option<Vec<BonusTier>>,
    /// Human correction added after calculation, may be negative
    pub manual_adjustment_amount: Option<Decimal>,
}

impl PromoterContract {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_per_head(mut self, rate: Decimal) -> Self {
        self.per_head_rate = Some(rate);
        self
    }

    pub fn with_per_head_bounds(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.per_head_min = min;
        self.per_head_max = max;
        self
    }

    pub fn with_fixed_fee(mut self, fee: Decimal) -> Self {
        self.fixed_fee = Some(fee);
        self
    }

    pub fn with_minimum(mut self, minimum_guests: u32, below_minimum_percent: Option<Decimal>) -> Self {
        self.minimum_guests = Some(minimum_guests);
        self.below_minimum_percent = below_minimum_percent;
        self
    }

    pub fn with_flat_bonus(mut self, threshold: u32, amount: Decimal) -> Self {
        self.bonus_threshold = Some(threshold);
        self.bonus_amount = Some(amount);
        self
    }

    pub fn with_bonus_tiers(mut self, tiers: Vec<BonusTier>) -> Self {
        self.bonus_tiers = Some(tiers);
        self
    }

    pub fn with_manual_adjustment(mut self, amount: Option<Decimal>) -> Self {
        self.manual_adjustment_amount = amount;
        self
    }

    /// Copy of the contract with the manual adjustment cleared.
    /// Estimates never include human corrections.
    pub fn without_adjustment(&self) -> Self {
        Self {
            manual_adjustment_amount: None,
            ..self.clone()
        }
    }

    /// True when no rule can produce earnings (still being set up)
    pub fn is_empty(&self) -> bool {
        self.per_head_rate.is_none()
            && self.fixed_fee.is_none()
            && self.bonus_amount.is_none()
            && self.bonus_tiers.as_ref().map_or(true, |t| t.is_empty())
    }

    /// Non-empty tier list, if any
    pub(crate) fn active_tiers(&self) -> Option<&[BonusTier]> {
        self.bonus_tiers.as_deref().filter(|tiers| !tiers.is_empty())
    }
}
