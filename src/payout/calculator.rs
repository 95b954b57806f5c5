use rust_decimal::Decimal;

use super::breakdown::{AppliedBonus, BonusSource, PayoutBreakdown, ShortfallPenalty};
use super::contract::{BonusTier, PromoterContract};

/// Compute a promoter's commission for one event.
///
/// Pure and infallible: absent contract fields switch their rule off. Steps
/// run in a fixed order: base (fixed fee plus clamped per-head), minimum-guest
/// shortfall on the whole base, then a single bonus. The sum is floored at
/// zero before the manual adjustment is added. Values are returned unrounded.
pub fn calculate_promoter_payout(contract: &PromoterContract, checkins_count: u32) -> PayoutBreakdown {
    let fixed_fee_component = contract.fixed_fee.unwrap_or(Decimal::ZERO);

    let effective_guests = contract
        .per_head_rate
        .map(|_| clamp_guests(checkins_count, contract.per_head_min, contract.per_head_max));
    let per_head_component = match (contract.per_head_rate, effective_guests) {
        (Some(rate), Some(guests)) => rate.saturating_mul(Decimal::from(guests)),
        _ => Decimal::ZERO,
    };

    let base_payout = fixed_fee_component.saturating_add(per_head_component);

    let shortfall_penalty = shortfall(contract, checkins_count, base_payout);
    let penalised = match &shortfall_penalty {
        Some(penalty) => base_payout.saturating_sub(penalty.reduction),
        None => base_payout,
    };

    let bonus = select_bonus(contract, checkins_count);
    let total = penalised.saturating_add(bonus.as_ref().map_or(Decimal::ZERO, |b| b.amount));

    let calculated_payout = total.max(Decimal::ZERO);
    let manual_adjustment = contract.manual_adjustment_amount.unwrap_or(Decimal::ZERO);
    let final_payout = calculated_payout.saturating_add(manual_adjustment);

    tracing::trace!(
        checkins_count,
        %calculated_payout,
        %final_payout,
        "calculated promoter payout"
    );

    PayoutBreakdown {
        calculated_payout,
        final_payout,
        checkins_count,
        effective_guests,
        fixed_fee_component,
        per_head_component,
        base_payout,
        shortfall_penalty,
        bonus,
        manual_adjustment,
    }
}

/// Floor at `min`, then cap at `max`. An inverted pair resolves to `max`.
fn clamp_guests(checkins_count: u32, min: Option<u32>, max: Option<u32>) -> u32 {
    let mut guests = checkins_count;
    if let Some(min) = min {
        guests = guests.max(min);
    }
    if let Some(max) = max {
        guests = guests.min(max);
    }
    guests
}

fn shortfall(contract: &PromoterContract, checkins_count: u32, base: Decimal) -> Option<ShortfallPenalty> {
    let minimum_guests = contract.minimum_guests?;
    let percent = contract.below_minimum_percent?;
    if checkins_count >= minimum_guests {
        return None;
    }

    // Scale the percent first so the multiplier stays at or below one
    let penalised = base.saturating_mul(percent / Decimal::ONE_HUNDRED);
    Some(ShortfallPenalty {
        minimum_guests,
        percent,
        reduction: base.saturating_sub(penalised),
    })
}

fn select_bonus(contract: &PromoterContract, checkins_count: u32) -> Option<AppliedBonus> {
    if let Some(tiers) = contract.active_tiers() {
        return best_tier(tiers, checkins_count).map(|tier| AppliedBonus {
            source: BonusSource::Tier { threshold: tier.threshold },
            amount: tier.amount,
        });
    }

    match (contract.bonus_threshold, contract.bonus_amount) {
        (Some(threshold), Some(amount)) if checkins_count >= threshold => Some(AppliedBonus {
            source: BonusSource::Flat { threshold },
            amount,
        }),
        _ => None,
    }
}

/// Highest qualifying threshold, in any input order. Ties keep the first listed.
fn best_tier(tiers: &[BonusTier], checkins_count: u32) -> Option<&BonusTier> {
    tiers
        .iter()
        .filter(|tier| tier.threshold <= checkins_count)
        .fold(None, |best: Option<&BonusTier>, tier| match best {
            Some(current) if current.threshold >= tier.threshold => Some(current),
            _ => Some(tier),
        })
}
