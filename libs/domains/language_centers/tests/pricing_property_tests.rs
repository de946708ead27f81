//! Property tests for the course price calculator.

use directory_rules::AuditContext;
use domain_language_centers::pricing::{
    MAX_MONEY, PricingTerms, compute_discount_amount, compute_fee_per_week, compute_final_price,
};
use domain_language_centers::{CoursePricing, CreateCoursePricing};
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;
use validator::Validate;

/// Amounts in cents, up to the accepted money cap.
fn money() -> impl Strategy<Value = Decimal> {
    (0i64..=100_000_000_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// 0.00 to 100.00
fn percentage() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000).prop_map(|hundredths| Decimal::new(hundredths, 2))
}

/// Any representable decimal, including the extremes.
fn any_decimal() -> impl Strategy<Value = Decimal> {
    (any::<u32>(), any::<u32>(), any::<u32>(), any::<bool>(), 0u32..=28)
        .prop_map(|(lo, mid, hi, negative, scale)| Decimal::from_parts(lo, mid, hi, negative, scale))
}

fn terms(fee: Decimal, percentage: Option<Decimal>, amount: Option<Decimal>) -> PricingTerms {
    PricingTerms {
        fee,
        has_discount: true,
        discount_percentage: percentage,
        discount_amount: amount,
    }
}

proptest! {
    #[test]
    fn prop_fee_per_week_divides_fee(fee in money(), weeks in 1i32..=520) {
        let per_week = compute_fee_per_week(fee, weeks).unwrap();

        prop_assert_eq!(per_week, fee / Decimal::from(weeks));
        let drift = (per_week * Decimal::from(weeks) - fee).abs();
        prop_assert!(drift <= Decimal::new(1, 9), "drift {}", drift);
    }

    #[test]
    fn prop_fee_per_week_needs_weeks(fee in money(), weeks in -520i32..=0) {
        prop_assert_eq!(compute_fee_per_week(fee, weeks), None);
    }

    #[test]
    fn prop_without_discount_final_is_fee(
        fee in money(),
        p in proptest::option::of(percentage()),
        amount in proptest::option::of(money()),
    ) {
        let mut t = terms(fee, p, amount);
        t.has_discount = false;
        prop_assert_eq!(compute_final_price(&t), Ok(fee));
    }

    #[test]
    fn prop_percentage_discount(fee in money(), p in percentage(), amount in proptest::option::of(money())) {
        prop_assume!(p > Decimal::ZERO);
        let final_price = compute_final_price(&terms(fee, Some(p), amount)).unwrap();

        prop_assert_eq!(final_price, fee * (Decimal::ONE - p / Decimal::ONE_HUNDRED));
        prop_assert_eq!(final_price + compute_discount_amount(fee, p).unwrap(), fee);
        prop_assert!(final_price >= Decimal::ZERO && final_price <= fee);
    }

    #[test]
    fn prop_amount_discount(fee in money(), amount in money(), zero_percentage in any::<bool>()) {
        prop_assume!(amount > Decimal::ZERO);
        let p = zero_percentage.then_some(Decimal::ZERO);

        prop_assert_eq!(compute_final_price(&terms(fee, p, Some(amount))), Ok(fee - amount));
    }

    #[test]
    fn prop_calculator_never_panics(
        fee in any_decimal(),
        p in proptest::option::of(any_decimal()),
        amount in proptest::option::of(any_decimal()),
        has_discount in any::<bool>(),
    ) {
        let t = PricingTerms { fee, has_discount, discount_percentage: p, discount_amount: amount };

        let _ = compute_final_price(&t);
        let _ = t.percentage_discount_amount();
        if let Some(p) = p {
            let _ = compute_discount_amount(fee, p);
        }
    }

    #[test]
    fn prop_accepted_input_always_prices(
        fee in money(),
        weeks in 1i32..=520,
        p in proptest::option::of(percentage()),
        has_discount in any::<bool>(),
    ) {
        let input = CreateCoursePricing {
            duration_weeks: weeks,
            fee,
            currency: "USD".to_string(),
            has_discount,
            discount_percentage: p,
            discount_amount: None,
            is_active: true,
        };
        prop_assert!(input.validate().is_ok());

        let pricing = CoursePricing::new(Uuid::now_v7(), input, &AuditContext::system()).unwrap();
        prop_assert!(pricing.final_price >= Decimal::ZERO);
        prop_assert!(pricing.final_price <= MAX_MONEY);
    }
}
