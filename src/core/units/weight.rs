use serde::Deserialize;

use super::{convert_linear, UnitDef};
use crate::core::{Calculation, ConversionResult, NumberField};
use crate::utils::error::{CalcError, Result};

pub const WEIGHT_DECIMALS: u32 = 4;

/// Factors in kilograms.
pub static WEIGHT_UNITS: [UnitDef; 7] = [
    UnitDef {
        code: "mg",
        aliases: &["milligram", "milligrams"],
        factor: 0.000_001,
    },
    UnitDef {
        code: "g",
        aliases: &["gram", "grams"],
        factor: 0.001,
    },
    UnitDef {
        code: "kg",
        aliases: &["kilogram", "kilograms", "kgs"],
        factor: 1.0,
    },
    UnitDef {
        code: "t",
        aliases: &["tonne", "tonnes", "metric_ton"],
        factor: 1000.0,
    },
    UnitDef {
        code: "oz",
        aliases: &["ounce", "ounces"],
        factor: 0.028_349_523_125,
    },
    UnitDef {
        code: "lb",
        aliases: &["lbs", "pound", "pounds"],
        factor: 0.453_592_37,
    },
    UnitDef {
        code: "st",
        aliases: &["stone", "stones"],
        factor: 6.350_293_18,
    },
];

pub fn convert(value: f64, from: &str) -> Result<ConversionResult> {
    convert_linear(value, from, &WEIGHT_UNITS, "kg", WEIGHT_DECIMALS)
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeightInput {
    #[serde(default)]
    pub value: NumberField,
    #[serde(default, alias = "unit")]
    pub from: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct WeightCalculator;

impl Calculation for WeightCalculator {
    type Input = WeightInput;
    type Output = ConversionResult;

    fn name(&self) -> &'static str {
        "weight"
    }

    fn calculate(&self, input: WeightInput) -> Result<ConversionResult> {
        let value = input.value.require("value")?;
        let from = input
            .from
            .ok_or_else(|| CalcError::invalid_input("from unit is required"))?;
        convert(value, &from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kilograms_to_imperial() {
        let result = convert(1.0, "kg").unwrap();
        assert_eq!(result.conversions["lb"], 2.2046);
        assert_eq!(result.conversions["oz"], 35.274);
        assert_eq!(result.conversions["g"], 1000.0);
        assert_eq!(result.conversions["st"], 0.1575);
    }

    #[test]
    fn test_pounds_to_metric() {
        let result = convert(10.0, "Pounds").unwrap();
        assert_eq!(result.from, "lb");
        assert_eq!(result.canonical_value, 4.5359);
        assert_eq!(result.conversions["g"], 4535.9237);
    }

    #[test]
    fn test_calculator_errors() {
        let err = WeightCalculator
            .calculate(WeightInput {
                value: 5.0.into(),
                from: Some("carat".into()),
            })
            .unwrap_err();
        assert_eq!(err.code(), "InvalidUnit");

        let err = WeightCalculator
            .calculate(WeightInput {
                value: 5.0.into(),
                from: None,
            })
            .unwrap_err();
        assert_eq!(err.code(), "InvalidInput");
    }
}
