//! Field rules the `validator` derive cannot express on its own.

use rust_decimal::Decimal;
use validator::ValidationError;

pub const MAX_RATING: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Ratings are stored as `NUMERIC(3,2)`.
pub const RATING_DECIMALS: u32 = 2;

/// ISO 4217 style code: exactly three ASCII uppercase letters.
pub fn validate_currency_code(code: &str) -> Result<(), ValidationError> {
    if code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase()) {
        Ok(())
    } else {
        Err(ValidationError::new("currency_code"))
    }
}

/// Ratings run from 0 to 5 inclusive, with at most two decimals so the
/// database never has to round them.
pub fn is_valid_rating(rating: Decimal) -> bool {
    (Decimal::ZERO..=MAX_RATING).contains(&rating) && rating.normalize().scale() <= RATING_DECIMALS
}
