pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod payout;
pub mod services;
pub mod types;

pub use error::PayoutError;
pub use payout::{calculate_promoter_payout, BonusTier, PayoutBreakdown, PromoterContract};

#[cfg(test)]
pub mod testing;
