//! Course price arithmetic.
//!
//! All values are `Decimal`, so divisions keep 28 significant digits and
//! nothing is rounded before it is stored. Every step is checked; a result
//! that does not fit a `Decimal` is a [`PricingOverflow`], never a panic.

use rust_decimal::Decimal;
use validator::ValidationError;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Largest accepted fee or fixed discount amount (10^12).
pub const MAX_MONEY: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("price calculation overflowed")]
pub struct PricingOverflow;

/// The inputs that determine a final price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingTerms {
    pub fee: Decimal,
    pub has_discount: bool,
    pub discount_percentage: Option<Decimal>,
    pub discount_amount: Option<Decimal>,
}

impl PricingTerms {
    pub fn undiscounted(fee: Decimal) -> Self {
        Self {
            fee,
            has_discount: false,
            discount_percentage: None,
            discount_amount: None,
        }
    }

    /// Percentage in effect, if the discount is percentage based.
    pub fn active_percentage(&self) -> Option<Decimal> {
        self.discount_percentage
            .filter(|p| self.has_discount && *p > Decimal::ZERO)
    }

    /// Amount taken off by a percentage discount; `Ok(None)` for other terms.
    pub fn percentage_discount_amount(&self) -> Result<Option<Decimal>, PricingOverflow> {
        self.active_percentage()
            .map(|p| compute_discount_amount(self.fee, p))
            .transpose()
    }
}

/// `fee / duration_weeks`, or `None` when there are no weeks to divide by.
pub fn compute_fee_per_week(fee: Decimal, duration_weeks: i32) -> Option<Decimal> {
    if duration_weeks <= 0 {
        return None;
    }
    fee.checked_div(Decimal::from(duration_weeks))
}

/// Price after discount. A positive percentage wins over a fixed amount.
pub fn compute_final_price(terms: &PricingTerms) -> Result<Decimal, PricingOverflow> {
    if !terms.has_discount {
        return Ok(terms.fee);
    }
    if let Some(p) = terms.active_percentage() {
        let share = p
            .checked_div(HUNDRED)
            .and_then(|ratio| Decimal::ONE.checked_sub(ratio))
            .ok_or(PricingOverflow)?;
        return terms.fee.checked_mul(share).ok_or(PricingOverflow);
    }
    match terms.discount_amount.filter(|d| *d > Decimal::ZERO) {
        Some(amount) => terms.fee.checked_sub(amount).ok_or(PricingOverflow),
        None => Ok(terms.fee),
    }
}

pub fn compute_discount_amount(fee: Decimal, percentage: Decimal) -> Result<Decimal, PricingOverflow> {
    fee.checked_mul(percentage)
        .and_then(|v| v.checked_div(HUNDRED))
        .ok_or(PricingOverflow)
}

pub fn validate_discount_percentage(percentage: Decimal) -> bool {
    (Decimal::ZERO..=HUNDRED).contains(&percentage)
}

/// `validator` rule for fees and fixed discount amounts: `0..=MAX_MONEY`.
pub fn validate_money(value: &Decimal) -> Result<(), ValidationError> {
    if (Decimal::ZERO..=MAX_MONEY).contains(value) {
        Ok(())
    } else {
        Err(ValidationError::new("money_range"))
    }
}
