use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::lenient;
use crate::payout::{BonusTier, PromoterContract};

/// Errors raised while turning a persisted row into a contract
#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    #[error("Invalid value for field '{field}': {reason}")]
    InvalidField { field: String, reason: String },
}

impl ContractError {
    fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ContractError::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// An `event_promoters` row as exported from the database.
///
/// Numeric columns are read leniently; shape problems surface only when the
/// row is converted with [`EventPromoterRow::contract`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventPromoterRow {
    pub event_id: Uuid,
    pub promoter_id: Uuid,
    #[serde(default)]
    pub promoter_name: Option<String>,

    #[serde(default, with = "lenient::decimal")]
    pub per_head_rate: Option<Decimal>,
    #[serde(default, with = "lenient::integer")]
    pub per_head_min: Option<i64>,
    #[serde(default, with = "lenient::integer")]
    pub per_head_max: Option<i64>,
    #[serde(default, with = "lenient::decimal")]
    pub fixed_fee: Option<Decimal>,
    #[serde(default, with = "lenient::integer")]
    pub minimum_guests: Option<i64>,
    #[serde(default, with = "lenient::decimal")]
    pub below_minimum_percent: Option<Decimal>,
    #[serde(default, with = "lenient::integer")]
    pub bonus_threshold: Option<i64>,
    #[serde(default, with = "lenient::decimal")]
    pub bonus_amount: Option<Decimal>,
    /// JSON array of `{threshold, amount}`, or that array encoded as a string
    #[serde(default)]
    pub bonus_tiers: Option<Value>,
    #[serde(default, with = "lenient::decimal")]
    pub manual_adjustment_amount: Option<Decimal>,

    #[serde(default, with = "lenient::integer")]
    pub manual_checkins_override: Option<i64>,
    /// Actual check-ins recorded for this promoter's referrals
    #[serde(default, with = "lenient::integer")]
    pub checkins_count: Option<i64>,
}

impl EventPromoterRow {
    pub fn new(event_id: Uuid, promoter_id: Uuid) -> Self {
        Self {
            event_id,
            promoter_id,
            promoter_name: None,
            per_head_rate: None,
            per_head_min: None,
            per_head_max: None,
            fixed_fee: None,
            minimum_guests: None,
            below_minimum_percent: None,
            bonus_threshold: None,
            bonus_amount: None,
            bonus_tiers: None,
            manual_adjustment_amount: None,
            manual_checkins_override: None,
            checkins_count: None,
        }
    }

    /// Copy contract terms from a typed contract (fixtures and round trips)
    pub fn with_contract(mut self, contract: &PromoterContract) -> Self {
        self.per_head_rate = contract.per_head_rate;
        self.per_head_min = contract.per_head_min.map(i64::from);
        self.per_head_max = contract.per_head_max.map(i64::from);
        self.fixed_fee = contract.fixed_fee;
        self.minimum_guests = contract.minimum_guests.map(i64::from);
        self.below_minimum_percent = contract.below_minimum_percent;
        self.bonus_threshold = contract.bonus_threshold.map(i64::from);
        self.bonus_amount = contract.bonus_amount;
        self.bonus_tiers = contract
            .bonus_tiers
            .as_ref()
            .and_then(|tiers| serde_json::to_value(tiers).ok());
        self.manual_adjustment_amount = contract.manual_adjustment_amount;
        self
    }

    /// Validate the row and build the typed contract
    pub fn contract(&self) -> Result<PromoterContract, ContractError> {
        if let Some(percent) = self.below_minimum_percent {
            if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
                return Err(ContractError::invalid(
                    "below_minimum_percent",
                    format!("expected a percentage between 0 and 100, got {}", percent),
                ));
            }
        }

        Ok(PromoterContract {
            per_head_rate: self.per_head_rate,
            per_head_min: count_field("per_head_min", self.per_head_min)?,
            per_head_max: count_field("per_head_max", self.per_head_max)?,
            fixed_fee: self.fixed_fee,
            minimum_guests: count_field("minimum_guests", self.minimum_guests)?,
            below_minimum_percent: self.below_minimum_percent,
            bonus_threshold: count_field("bonus_threshold", self.bonus_threshold)?,
            bonus_amount: self.bonus_amount,
            bonus_tiers: parse_bonus_tiers(self.bonus_tiers.as_ref())?,
            manual_adjustment_amount: self.manual_adjustment_amount,
        })
    }

    /// Recorded check-ins, negative values clamped to zero
    pub fn actual_checkins(&self) -> u32 {
        self.checkins_count
            .map_or(0, |count| self.clamp_count("checkins_count", count))
    }

    /// Staff override of the check-in count, if one was entered
    pub fn checkins_override(&self) -> Option<u32> {
        self.manual_checkins_override
            .map(|count| self.clamp_count("manual_checkins_override", count))
    }

    pub fn display_name(&self) -> String {
        self.promoter_name
            .clone()
            .unwrap_or_else(|| self.promoter_id.to_string())
    }

    fn clamp_count(&self, field: &str, count: i64) -> u32 {
        if count < 0 {
            tracing::warn!(
                promoter_id = %self.promoter_id,
                event_id = %self.event_id,
                field,
                count,
                "negative check-in count clamped to zero"
            );
            return 0;
        }
        u32::try_from(count).unwrap_or(u32::MAX)
    }
}

fn count_field(field: &str, value: Option<i64>) -> Result<Option<u32>, ContractError> {
    value
        .map(|v| {
            u32::try_from(v)
                .map_err(|_| ContractError::invalid(field, format!("expected a non-negative count, got {}", v)))
        })
        .transpose()
}

fn parse_bonus_tiers(raw: Option<&Value>) -> Result<Option<Vec<BonusTier>>, ContractError> {
    let value = match raw {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(Value::String(s)) => serde_json::from_str::<Value>(s)
            .map_err(|e| ContractError::invalid("bonus_tiers", format!("invalid JSON: {}", e)))?,
        Some(other) => other.clone(),
    };

    let items = match value {
        Value::Null => return Ok(None),
        Value::Array(items) => items,
        other => {
            return Err(ContractError::invalid(
                "bonus_tiers",
                format!("expected an array, got {}", other),
            ))
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| parse_tier(i, item))
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

fn parse_tier(index: usize, item: &Value) -> Result<BonusTier, ContractError> {
    let field = |name: &str| format!("bonus_tiers[{}].{}", index, name);
    let obj = item
        .as_object()
        .ok_or_else(|| ContractError::invalid(format!("bonus_tiers[{}]", index), "expected an object"))?;

    let threshold = lenient::integer_from_value(obj.get("threshold").unwrap_or(&Value::Null))
        .map_err(|reason| ContractError::invalid(field("threshold"), reason))?
        .ok_or_else(|| ContractError::invalid(field("threshold"), "missing"))?;
    let threshold = count_field(&field("threshold"), Some(threshold))?.unwrap_or_default();

    let amount = lenient::decimal_from_value(obj.get("amount").unwrap_or(&Value::Null))
        .map_err(|reason| ContractError::invalid(field("amount"), reason))?
        .ok_or_else(|| ContractError::invalid(field("amount"), "missing"))?;

    Ok(BonusTier { threshold, amount })
}
