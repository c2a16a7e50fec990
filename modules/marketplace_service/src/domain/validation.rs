//! Field validation and normalization rules

use crate::contract::MarketplaceError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

pub const NAME_MIN_LEN: usize = 3;
pub const NAME_MAX_LEN: usize = 255;
pub const DESCRIPTION_MIN_LEN: usize = 10;

/// Return the trimmed value or fail when it is missing or blank
pub fn required(value: Option<&str>, field: &str) -> Result<String, MarketplaceError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(MarketplaceError::validation(format!("{} is required", field))),
    }
}

/// Keep a partial-update field only when it carries a non-blank value
pub fn present(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Trimmed length must fall in `min..=max` characters
pub fn bounded(
    value: &str,
    field: &str,
    min: usize,
    max: usize,
) -> Result<String, MarketplaceError> {
    let trimmed = value.trim();
    let len = trimmed.chars().count();
    if len == 0 {
        return Err(MarketplaceError::validation(format!("{} is required", field)));
    }
    if len < min || len > max {
        return Err(MarketplaceError::validation(format!(
            "{} must be between {} and {} characters",
            field, min, max
        )));
    }
    Ok(trimmed.to_string())
}

pub fn product_name(value: &str) -> Result<String, MarketplaceError> {
    bounded(value, "product name", NAME_MIN_LEN, NAME_MAX_LEN)
}

pub fn store_name(value: &str) -> Result<String, MarketplaceError> {
    bounded(value, "store name", NAME_MIN_LEN, NAME_MAX_LEN)
}

pub fn store_slug(value: &str) -> Result<String, MarketplaceError> {
    bounded(value, "store url", NAME_MIN_LEN, NAME_MAX_LEN)
}

pub fn description(value: &str) -> Result<String, MarketplaceError> {
    let trimmed = value.trim();
    if trimmed.chars().count() < DESCRIPTION_MIN_LEN {
        return Err(MarketplaceError::validation(format!(
            "description must be at least {} characters",
            DESCRIPTION_MIN_LEN
        )));
    }
    Ok(trimmed.to_string())
}

/// Prices travel and are stored as text but must parse as a decimal
pub fn price(value: &str, field: &str) -> Result<String, MarketplaceError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(MarketplaceError::validation(format!("{} is required", field)));
    }
    Decimal::from_str(trimmed)
        .map_err(|_| MarketplaceError::validation(format!("{} must be a decimal number", field)))?;
    Ok(trimmed.to_string())
}

pub fn stock(value: i64) -> Result<i32, MarketplaceError> {
    if value < 0 {
        return Err(MarketplaceError::validation("stock must not be negative"));
    }
    i32::try_from(value).map_err(|_| MarketplaceError::validation("stock is too large"))
}

pub fn positive_id(value: i64, field: &str) -> Result<i32, MarketplaceError> {
    if value <= 0 {
        return Err(MarketplaceError::validation(format!("{} must be a positive number", field)));
    }
    i32::try_from(value)
        .map_err(|_| MarketplaceError::validation(format!("{} is out of range", field)))
}

/// Calendar date in `YYYY-MM-DD` form
pub fn birth_date(value: &str) -> Result<NaiveDate, MarketplaceError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| MarketplaceError::validation("birth date must use the YYYY-MM-DD format"))
}

/// Lower case, spaces to hyphens, punctuation `. , ! ? ' "` dropped.
/// No other normalization; slugs are not unique.
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .replace(' ', "-")
        .chars()
        .filter(|c| !matches!(c, '.' | ',' | '!' | '?' | '\'' | '"'))
        .collect()
}

/// Decimal filter value; unparseable input disables the filter
pub fn price_filter(value: Option<&str>) -> Option<Decimal> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| Decimal::from_str(v).ok())
}

pub fn id_filter(value: Option<&str>) -> Option<i32> {
    value
        .and_then(|v| v.trim().parse::<i32>().ok())
        .filter(|v| *v > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_trims_and_rejects_blank() {
        assert_eq!(required(Some("  Elektronik "), "name").unwrap(), "Elektronik");
        assert!(required(Some("   "), "name").is_err());
        assert!(required(None, "name").is_err());
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Kaos Polos Hitam"), "kaos-polos-hitam");
        assert_eq!(slugify("Hello, World! It's \"new\"?"), "hello-world-its-new");
        assert_eq!(slugify("v1.2 Pro"), "v12-pro");
        // Repeated spaces are kept as repeated hyphens
        assert_eq!(slugify("a  b"), "a--b");
    }

    #[test]
    fn test_product_name_bounds() {
        assert!(product_name("ab").is_err());
        assert!(product_name("  abc  ").is_ok());
        assert!(product_name(&"x".repeat(256)).is_err());
        assert!(product_name(&"x".repeat(255)).is_ok());
    }

    #[test]
    fn test_price_and_stock() {
        assert_eq!(price(" 15000.50 ", "consumer price").unwrap(), "15000.50");
        assert!(price("abc", "consumer price").is_err());
        assert!(price("", "consumer price").is_err());
        assert!(stock(-1).is_err());
        assert_eq!(stock(0).unwrap(), 0);
    }

    #[test]
    fn test_description_min_length() {
        assert!(description("too short").is_err());
        assert!(description("long enough text").is_ok());
    }

    #[test]
    fn test_birth_date() {
        assert_eq!(
            birth_date("1990-01-31").unwrap(),
            NaiveDate::from_ymd_opt(1990, 1, 31).unwrap()
        );
        assert!(birth_date("31/01/1990").is_err());
    }

    #[test]
    fn test_filters_ignore_garbage() {
        assert!(price_filter(Some("abc")).is_none());
        assert_eq!(price_filter(Some("1000")), Some(Decimal::from(1000)));
        assert_eq!(id_filter(Some("7")), Some(7));
        assert_eq!(id_filter(Some("-1")), None);
    }
}
