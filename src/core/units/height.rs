use serde::Deserialize;

use super::{convert_linear, UnitDef};
use crate::core::{round_to, Calculation, ConversionResult, NumberField};
use crate::utils::error::{CalcError, Result};
use crate::utils::validation::ensure_finite_result;

pub const HEIGHT_DECIMALS: u32 = 4;
const CM_PER_INCH: f64 = 2.54;

/// Factors in centimetres.
pub static HEIGHT_UNITS: [UnitDef; 4] = [
    UnitDef {
        code: "cm",
        aliases: &["centimeter", "centimeters", "centimetre", "centimetres"],
        factor: 1.0,
    },
    UnitDef {
        code: "m",
        aliases: &["meter", "meters", "metre", "metres"],
        factor: 100.0,
    },
    UnitDef {
        code: "ft",
        aliases: &["foot", "feet"],
        factor: 30.48,
    },
    UnitDef {
        code: "in",
        aliases: &["inch", "inches"],
        factor: CM_PER_INCH,
    },
];

/// Largest foot count that `f64` still represents exactly.
const MAX_LABEL_FEET: f64 = 9_007_199_254_740_992.0;

/// Splits a height into whole feet and inches rounded to one decimal,
/// carrying into feet when the inches round up to 12.
pub fn feet_and_inches(cm: f64) -> Result<(u64, f64)> {
    let total_inches = ensure_finite_result(cm / CM_PER_INCH)?;
    let mut feet = (total_inches / 12.0).floor();
    if feet > MAX_LABEL_FEET {
        return Err(CalcError::invalid_input(
            "height is too large for a feet-and-inches label",
        ));
    }
    let mut inches = round_to(total_inches - feet * 12.0, 1);
    if inches >= 12.0 {
        feet += 1.0;
        inches = round_to(inches - 12.0, 1);
    }
    Ok((feet as u64, inches))
}

pub fn feet_inches_label(cm: f64) -> Result<String> {
    let (feet, inches) = feet_and_inches(cm)?;
    Ok(format!("{}' {}\"", feet, inches))
}

pub fn convert(value: f64, from: &str) -> Result<ConversionResult> {
    let mut result = convert_linear(value, from, &HEIGHT_UNITS, "cm", HEIGHT_DECIMALS)?;
    result.label = Some(feet_inches_label(result.canonical_value)?);
    Ok(result)
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HeightInput {
    #[serde(default)]
    pub value: NumberField,
    #[serde(default, alias = "unit")]
    pub from: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct HeightCalculator;

impl Calculation for HeightCalculator {
    type Input = HeightInput;
    type Output = ConversionResult;

    fn name(&self) -> &'static str {
        "height"
    }

    fn calculate(&self, input: HeightInput) -> Result<ConversionResult> {
        let value = input.value.require("value")?;
        let from = input
            .from
            .ok_or_else(|| CalcError::invalid_input("from unit is required"))?;
        convert(value, &from)
    }
}
