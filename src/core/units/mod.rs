//! Static conversion tables for the linear unit converters.
//!
//! Each converter normalises its input to one canonical unit and derives
//! every other unit from that value. Temperature is affine and lives in its
//! own module.

pub mod height;
pub mod length;
pub mod temperature;
pub mod weight;

use std::collections::BTreeMap;

use crate::core::{finite_round, ConversionResult};
use crate::utils::error::{CalcError, Result};
use crate::utils::validation::validate_non_negative;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitDef {
    pub code: &'static str,
    pub aliases: &'static [&'static str],
    /// Canonical units in one of this unit.
    pub factor: f64,
}

pub fn find_unit<'a>(table: &'a [UnitDef], code: &str) -> Result<&'a UnitDef> {
    let wanted = code.trim().to_ascii_lowercase();
    table
        .iter()
        .find(|u| u.code == wanted || u.aliases.contains(&wanted.as_str()))
        .ok_or_else(|| CalcError::InvalidUnit {
            unit: code.to_string(),
        })
}

/// Converts `value` from `from` to every unit in `table`.
pub fn convert_linear(
    value: f64,
    from: &str,
    table: &[UnitDef],
    canonical_unit: &'static str,
    decimals: u32,
) -> Result<ConversionResult> {
    let unit = find_unit(table, from)?;
    validate_non_negative("value", value)?;

    let canonical_value = value * unit.factor;
    let conversions = table
        .iter()
        .map(|u| Ok((u.code, finite_round(canonical_value / u.factor, decimals)?)))
        .collect::<Result<BTreeMap<&'static str, f64>>>()?;

    Ok(ConversionResult {
        value,
        from: unit.code,
        canonical_unit,
        canonical_value: finite_round(canonical_value, decimals)?,
        conversions,
        label: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: [UnitDef; 2] = [
        UnitDef {
            code: "m",
            aliases: &["meter"],
            factor: 1.0,
        },
        UnitDef {
            code: "km",
            aliases: &["kilometer"],
            factor: 1000.0,
        },
    ];

    #[test]
    fn test_find_unit_by_code_or_alias() {
        assert_eq!(find_unit(&TABLE, "KM").unwrap().code, "km");
        assert_eq!(find_unit(&TABLE, " meter ").unwrap().code, "m");
        let err = find_unit(&TABLE, "furlong").unwrap_err();
        assert_eq!(err.code(), "InvalidUnit");
    }

    #[test]
    fn test_convert_linear() {
        let result = convert_linear(2.5, "km", &TABLE, "m", 4).unwrap();
        assert_eq!(result.from, "km");
        assert_eq!(result.canonical_value, 2500.0);
        assert_eq!(result.conversions["m"], 2500.0);
        assert_eq!(result.conversions["km"], 2.5);
    }

    #[test]
    fn test_overflow_is_rejected() {
        let err = convert_linear(1e308, "km", &TABLE, "m", 4).unwrap_err();
        assert_eq!(err.code(), "InvalidInput");
    }

    #[test]
    fn test_negative_value_rejected() {
        assert!(convert_linear(-1.0, "m", &TABLE, "m", 4).is_err());
    }
}
