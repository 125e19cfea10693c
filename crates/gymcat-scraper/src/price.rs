//! The single price-parsing rule shared by validation and transformation.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Prices above this are treated as scrape errors.
pub const MAX_PRICE: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);

/// Parses storefront price text such as `"$1,234.56"`.
///
/// Everything except digits and `.` is dropped (so `,` thousands separators
/// vanish), the value is rounded half away from zero to cents, and the
/// rounded result must satisfy `0 < price <= 100000`.
#[must_use]
pub fn parse_price(text: &str) -> Option<Decimal> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let mut value = Decimal::from_str(&cleaned)
        .ok()?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    value.rescale(2);

    (value > Decimal::ZERO && value <= MAX_PRICE).then_some(value)
}
