use serde::Deserialize;

use super::{convert_linear, UnitDef};
use crate::core::{Calculation, ConversionResult, NumberField};
use crate::utils::error::{CalcError, Result};

/// Six places: astronomical units are tiny numbers at everyday scales.
pub const LENGTH_DECIMALS: u32 = 6;

/// Factors in metres.
pub static LENGTH_UNITS: [UnitDef; 10] = [
    UnitDef {
        code: "mm",
        aliases: &["millimeter", "millimeters", "millimetre", "millimetres"],
        factor: 0.001,
    },
    UnitDef {
        code: "cm",
        aliases: &["centimeter", "centimeters", "centimetre", "centimetres"],
        factor: 0.01,
    },
    UnitDef {
        code: "m",
        aliases: &["meter", "meters", "metre", "metres"],
        factor: 1.0,
    },
    UnitDef {
        code: "km",
        aliases: &["kilometer", "kilometers", "kilometre", "kilometres"],
        factor: 1000.0,
    },
    UnitDef {
        code: "in",
        aliases: &["inch", "inches"],
        factor: 0.0254,
    },
    UnitDef {
        code: "ft",
        aliases: &["foot", "feet"],
        factor: 0.3048,
    },
    UnitDef {
        code: "yd",
        aliases: &["yard", "yards"],
        factor: 0.9144,
    },
    UnitDef {
        code: "mi",
        aliases: &["mile", "miles"],
        factor: 1609.344,
    },
    UnitDef {
        code: "nmi",
        aliases: &["nautical_mile", "nautical_miles"],
        factor: 1852.0,
    },
    UnitDef {
        code: "au",
        aliases: &["astronomical_unit", "astronomical_units"],
        factor: 149_597_870_700.0,
    },
];

pub fn convert(value: f64, from: &str) -> Result<ConversionResult> {
    convert_linear(value, from, &LENGTH_UNITS, "m", LENGTH_DECIMALS)
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LengthInput {
    #[serde(default)]
    pub value: NumberField,
    #[serde(default, alias = "unit")]
    pub from: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct LengthCalculator;

impl Calculation for LengthCalculator {
    type Input = LengthInput;
    type Output = ConversionResult;

    fn name(&self) -> &'static str {
        "length"
    }

    fn calculate(&self, input: LengthInput) -> Result<ConversionResult> {
        let value = input.value.require("value")?;
        let from = input
            .from
            .ok_or_else(|| CalcError::invalid_input("from unit is required"))?;
        convert(value, &from)
    }
}
