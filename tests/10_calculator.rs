mod common;

use common::dec;
use promoter_payouts::{calculate_promoter_payout, BonusTier, PromoterContract};
use rust_decimal::Decimal;

fn tiered() -> PromoterContract {
    PromoterContract::new()
        .with_per_head(dec("5"))
        .with_bonus_tiers(vec![BonusTier::new(10, dec("20")), BonusTier::new(50, dec("100"))])
}

#[test]
fn repeated_calls_are_identical() {
    let contract = tiered()
        .with_fixed_fee(dec("12.34"))
        .with_minimum(40, Some(dec("75")))
        .with_manual_adjustment(Some(dec("-3.21")));
    for checkins in [0, 1, 15, 39, 40, 60, 10_000] {
        let first = calculate_promoter_payout(&contract, checkins);
        let second = calculate_promoter_payout(&contract, checkins);
        assert_eq!(first, second, "checkins = {}", checkins);
    }
}

#[test]
fn per_head_count_is_clamped_to_bounds() {
    let contract = PromoterContract::new()
        .with_per_head(dec("10"))
        .with_per_head_bounds(Some(5), Some(20));

    let floored = calculate_promoter_payout(&contract, 2);
    assert_eq!(floored.effective_guests, Some(5));
    assert_eq!(floored.calculated_payout, dec("50"));

    let capped = calculate_promoter_payout(&contract, 30);
    assert_eq!(capped.effective_guests, Some(20));
    assert_eq!(capped.calculated_payout, dec("200"));

    let inside = calculate_promoter_payout(&contract, 12);
    assert_eq!(inside.calculated_payout, dec("120"));
}

#[test]
fn fixed_fee_ignores_attendance() {
    let contract = PromoterContract::new().with_fixed_fee(dec("100"));
    for checkins in [0, 1, 500, u32::MAX] {
        assert_eq!(calculate_promoter_payout(&contract, checkins).calculated_payout, dec("100"));
    }
}

#[test]
fn shortfall_penalty_scales_base() {
    let contract = PromoterContract::new()
        .with_per_head(dec("10"))
        .with_minimum(10, Some(dec("50")));
    let b = calculate_promoter_payout(&contract, 4);
    assert_eq!(b.base_payout, dec("40"));
    assert_eq!(b.calculated_payout, dec("20"));
}

#[test]
fn highest_qualifying_tier_wins() {
    let high = calculate_promoter_payout(&tiered(), 60);
    assert_eq!(high.base_payout, dec("300"));
    assert_eq!(high.bonus_amount(), dec("100"));
    assert_eq!(high.calculated_payout, dec("400"));

    let low = calculate_promoter_payout(&tiered(), 15);
    assert_eq!(low.bonus_amount(), dec("20"));
    assert_eq!(low.calculated_payout, dec("95"));

    let none = calculate_promoter_payout(&tiered(), 9);
    assert!(none.bonus.is_none());
    assert_eq!(none.calculated_payout, dec("45"));
}

#[test]
fn tier_order_does_not_matter() {
    let reversed = PromoterContract::new()
        .with_per_head(dec("5"))
        .with_bonus_tiers(vec![BonusTier::new(50, dec("100")), BonusTier::new(10, dec("20"))]);
    for checkins in [5, 10, 49, 50, 60] {
        assert_eq!(
            calculate_promoter_payout(&reversed, checkins).calculated_payout,
            calculate_promoter_payout(&tiered(), checkins).calculated_payout,
        );
    }
}

#[test]
fn calculated_is_floored_but_final_is_not() {
    let contract = PromoterContract::new()
        .with_per_head(dec("-10"))
        .with_manual_adjustment(Some(dec("-250")));
    let b = calculate_promoter_payout(&contract, 7);
    assert_eq!(b.calculated_payout, Decimal::ZERO);
    assert_eq!(b.final_payout, dec("-250"));
}

#[test]
fn tiers_take_precedence_over_flat_bonus() {
    let contract = tiered().with_flat_bonus(1, dec("1000"));
    let b = calculate_promoter_payout(&contract, 15);
    assert_eq!(b.calculated_payout, dec("95"));

    let below_tiers = calculate_promoter_payout(&contract, 5);
    assert!(below_tiers.bonus.is_none());
}

#[test]
fn adjustment_is_exact_difference() {
    let adjustments = [None, Some(dec("0")), Some(dec("12.345")), Some(dec("-999.99"))];
    for adjustment in adjustments {
        let contract = tiered()
            .with_minimum(20, Some(dec("33.3")))
            .with_manual_adjustment(adjustment);
        for checkins in [0, 12, 19, 20, 75] {
            let b = calculate_promoter_payout(&contract, checkins);
            assert_eq!(b.final_payout - b.calculated_payout, adjustment.unwrap_or(Decimal::ZERO));
        }
    }
}
