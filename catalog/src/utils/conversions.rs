use tracing::error;

use crate::{errors::CatalogError, site::CURRENCY_SIGN};

/// Is capable of parsing the following into whole rubles:
/// 1. "36 990 ₽"
/// 2. "36990₽"
/// 3. "1 234 567" (regular, non-breaking or thin spaces as thousands separators)
pub(crate) fn rubles_to_i32(amount: &str) -> Result<i32, CatalogError> {
    let digits: String = amount.chars().filter(|c| !c.is_whitespace()).collect();
    let digits = digits.trim_end_matches(CURRENCY_SIGN);

    let Ok(rubles) = digits.parse::<i32>() else {
        error!("Failed to parse amount into i32: '{amount}'");
        return Err(CatalogError::InvalidNumber(amount.into()));
    };

    Ok(rubles)
}

/// `round(100 - price / original_price * 100)`, rounding halves to even
pub(crate) fn discount_percent(price: i32, original_price: i32) -> Result<i32, CatalogError> {
    if original_price <= 0 {
        error!("Previous price must be positive, got {original_price}");
        return Err(CatalogError::InvalidNumber(original_price.to_string()));
    }

    let ratio = f64::from(price) / f64::from(original_price);

    Ok((100.0 - ratio * 100.0).round_ties_even() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_separators_and_currency() {
        assert_eq!(rubles_to_i32("36 990 ₽").unwrap(), 36990);
        assert_eq!(rubles_to_i32("36\u{a0}990\u{2009}₽").unwrap(), 36990);
        assert_eq!(rubles_to_i32("149990").unwrap(), 149990);
    }

    #[test]
    fn rejects_malformed_amounts() {
        assert!(rubles_to_i32("").is_err());
        assert!(rubles_to_i32("от 36 990 ₽").is_err());
        assert!(rubles_to_i32("36 990 ₽ 45 990 ₽").is_err());
    }

    #[test]
    fn discount_is_rounded_percentage() {
        assert_eq!(discount_percent(36990, 45990).unwrap(), 20);
        assert_eq!(discount_percent(99990, 99990).unwrap(), 0);
        assert_eq!(discount_percent(50, 200).unwrap(), 75);
    }

    #[test]
    fn discount_ties_round_to_even() {
        assert_eq!(discount_percent(30000, 80000).unwrap(), 62);
        assert_eq!(discount_percent(6000, 16000).unwrap(), 62);
    }

    #[test]
    fn discount_requires_previous_price() {
        assert!(discount_percent(36990, 0).is_err());
    }
}
