pub mod breakdown;
pub mod calculator;
pub mod contract;

pub use breakdown::{AppliedBonus, BonusSource, PayoutBreakdown, ShortfallPenalty};
pub use calculator::calculate_promoter_payout;
pub use contract::{BonusTier, PromoterContract};
