//! Validation utilities for packing transfers and stock settings

use chrono::NaiveDate;

// ============================================================================
// Packing Transfer Validations
// ============================================================================

/// Validate a production batch id (`WIP-<PRODUCT>-<YYMMDD>-<SEQ>`)
pub fn validate_production_batch_id(batch_id: &str) -> Result<(), &'static str> {
    let parts: Vec<&str> = batch_id.split('-').collect();

    if parts.len() < 3 {
        return Err("Production batch id must be in format WIP-<PRODUCT>-<YYMMDD>-<SEQ>");
    }
    if parts[2].len() != 6 || !parts[2].chars().all(|c| c.is_ascii_digit()) {
        return Err("Production batch id must carry a YYMMDD date");
    }
    Ok(())
}

/// Parse and validate a packing date in `YYYY-MM-DD` form
pub fn parse_packing_date(date: &str) -> Result<NaiveDate, &'static str> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| "Packing date must be a valid YYYY-MM-DD date")
}

/// Validate the number of packed units
pub fn validate_unit_count(units: u32) -> Result<(), &'static str> {
    if units == 0 {
        return Err("Unit count must be positive");
    }
    Ok(())
}

// ============================================================================
// Stock Settings Validations
// ============================================================================

/// Validate configured stock bounds.
/// Zero means "not configured" and is allowed for either bound.
pub fn validate_stock_bounds(min_level: f64, max_level: f64) -> Result<(), &'static str> {
    if min_level.is_nan() || max_level.is_nan() {
        return Err("Stock levels must be numeric");
    }
    if min_level < 0.0 || max_level < 0.0 {
        return Err("Stock levels cannot be negative");
    }
    if min_level > 0.0 && max_level > 0.0 && max_level < min_level {
        return Err("Maximum level must not be below minimum level");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_production_batch_id_valid() {
        assert!(validate_production_batch_id("WIP-SUN-251030-001").is_ok());
        assert!(validate_production_batch_id("WIP-SUN-251030").is_ok());
    }

    #[test]
    fn test_validate_production_batch_id_invalid() {
        assert!(validate_production_batch_id("WIP-SUN").is_err());
        assert!(validate_production_batch_id("WIP-SUN-2510-001").is_err());
        assert!(validate_production_batch_id("WIP-SUN-25OCT1-001").is_err());
        assert!(validate_production_batch_id("").is_err());
    }

    #[test]
    fn test_parse_packing_date() {
        let date = parse_packing_date("2025-10-31").unwrap();
        assert_eq!(date.to_string(), "2025-10-31");
        assert!(parse_packing_date("2025-02-30").is_err());
        assert!(parse_packing_date("31/10/2025").is_err());
    }

    #[test]
    fn test_validate_unit_count() {
        assert!(validate_unit_count(1).is_ok());
        assert!(validate_unit_count(0).is_err());
    }

    #[test]
    fn test_validate_stock_bounds() {
        assert!(validate_stock_bounds(100.0, 500.0).is_ok());
        assert!(validate_stock_bounds(0.0, 500.0).is_ok());
        assert!(validate_stock_bounds(100.0, 0.0).is_ok());
        assert!(validate_stock_bounds(-1.0, 500.0).is_err());
        assert!(validate_stock_bounds(500.0, 100.0).is_err());
        assert!(validate_stock_bounds(f64::NAN, 100.0).is_err());
    }
}
