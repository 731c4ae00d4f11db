//! Secondary packing material consumption

use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

pub const PACKING_ROLL: &str = "PACKING_ROLL";
pub const PACKING_COVER: &str = "PACKING_COVER";

/// Ledger category for packing material deductions
pub const PACKING_MATERIAL_CATEGORY: &str = "Packing Material";
/// Unit recorded on deduction lines
pub const DEDUCTION_UNIT: &str = "KG";

/// Grams of each material consumed per packed unit, keyed by package size.
/// Amounts are `(mantissa, scale)` pairs, e.g. `(6240, 4)` is `0.6240` g.
const PACKAGING_PROFILES: &[(&str, &[(&str, (i64, u32))])] = &[
    ("25g", &[(PACKING_ROLL, (6240, 4))]),
    ("50g", &[(PACKING_ROLL, (9360, 4))]),
    ("100g", &[(PACKING_ROLL, (14500, 4))]),
    ("250g", &[(PACKING_ROLL, (23000, 4)), (PACKING_COVER, (120000, 4))]),
    ("500g", &[(PACKING_COVER, (185000, 4))]),
    ("1kg", &[(PACKING_COVER, (240000, 4))]),
    ("5kg", &[]),
];

/// Per-unit material weights for a package size, in configuration order.
/// Unknown sizes have no profile.
pub fn packaging_profile(package_size: &str) -> Vec<(&'static str, Decimal)> {
    let wanted = package_size.trim().to_ascii_lowercase();
    PACKAGING_PROFILES
        .iter()
        .find(|(size, _)| *size == wanted)
        .map(|(_, materials)| {
            materials
                .iter()
                .map(|(material, (mantissa, scale))| (*material, Decimal::new(*mantissa, *scale)))
                .collect()
        })
        .unwrap_or_default()
}

/// Package sizes with a configured profile
pub fn known_package_sizes() -> impl Iterator<Item = &'static str> {
    PACKAGING_PROFILES.iter().map(|(size, _)| *size)
}

/// Amount of one material
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MaterialAmount {
    pub grams: Decimal,
    pub kilograms: Decimal,
}

/// Materials consumed for a batch, in configuration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Consumption {
    entries: Vec<(&'static str, MaterialAmount)>,
}

impl Consumption {
    pub fn get(&self, material: &str) -> Option<&MaterialAmount> {
        self.entries
            .iter()
            .find(|(name, _)| *name == material)
            .map(|(_, amount)| amount)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &MaterialAmount)> {
        self.entries.iter().map(|(name, amount)| (*name, amount))
    }
}

impl Serialize for Consumption {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (material, amount) in &self.entries {
            map.serialize_entry(material, amount)?;
        }
        map.end()
    }
}

/// A line to subtract from the raw material ledger
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeductionLine {
    pub material: String,
    pub category: String,
    pub quantity: Decimal,
    pub unit: String,
}

/// Packing material consumed by `unit_count` packages of `package_size`.
///
/// Sizes without a profile consume nothing. No rounding is applied.
pub fn packing_consumption(package_size: &str, unit_count: u32) -> Consumption {
    let units = Decimal::from(unit_count);
    let entries = packaging_profile(package_size)
        .into_iter()
        .map(|(material, grams_per_unit)| {
            let grams = grams_per_unit * units;
            let kilograms = grams / Decimal::ONE_THOUSAND;
            (material, MaterialAmount { grams, kilograms })
        })
        .collect();
    Consumption { entries }
}

/// Consumption expressed as raw material ledger deductions, in kilograms
pub fn packing_deductions(package_size: &str, unit_count: u32) -> Vec<DeductionLine> {
    packing_consumption(package_size, unit_count)
        .iter()
        .map(|(material, amount)| DeductionLine {
            material: material.to_string(),
            category: PACKING_MATERIAL_CATEGORY.to_string(),
            quantity: amount.kilograms,
            unit: DEDUCTION_UNIT.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_profile_lookup_normalizes_size() {
        assert_eq!(packaging_profile("25G"), vec![(PACKING_ROLL, dec("0.6240"))]);
        assert_eq!(packaging_profile(" 25g "), packaging_profile("25g"));
    }

    #[test]
    fn test_profile_order_follows_configuration() {
        let materials: Vec<&str> = packaging_profile("250g").into_iter().map(|(m, _)| m).collect();
        assert_eq!(materials, vec![PACKING_ROLL, PACKING_COVER]);
    }

    #[test]
    fn test_empty_profile_and_unknown_size() {
        assert!(packing_consumption("5kg", 10).is_empty());
        assert!(packing_consumption("3kg", 10).is_empty());
        assert!(packing_deductions("3kg", 10).is_empty());
    }

    #[test]
    fn test_zero_units() {
        let consumption = packing_consumption("25g", 0);
        assert_eq!(consumption.get(PACKING_ROLL).unwrap().grams, Decimal::ZERO);
    }

    #[test]
    fn test_deduction_lines() {
        let lines = packing_deductions("250g", 10);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].material, PACKING_ROLL);
        assert_eq!(lines[0].quantity, dec("0.023"));
        assert_eq!(lines[1].material, PACKING_COVER);
        assert_eq!(lines[1].quantity, dec("0.12"));
        assert!(lines.iter().all(|l| l.category == "Packing Material" && l.unit == "KG"));
    }

    #[test]
    fn test_consumption_serializes_as_ordered_map() {
        let json = serde_json::to_string(&packing_consumption("250g", 1)).unwrap();
        let roll = json.find(PACKING_ROLL).unwrap();
        let cover = json.find(PACKING_COVER).unwrap();
        assert!(json.starts_with('{'));
        assert!(roll < cover);
    }
}
