use serde::Deserialize;
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::core::{finite_round, Calculation, ConversionResult, NumberField};
use crate::utils::error::{CalcError, Result};
use crate::utils::validation::ensure_finite_result;

pub const TEMPERATURE_DECIMALS: u32 = 4;
pub const ABSOLUTE_ZERO_C: f64 = -273.15;

pub fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 9.0 / 5.0 + 32.0
}

pub fn fahrenheit_to_celsius(f: f64) -> f64 {
    (f - 32.0) * 5.0 / 9.0
}

pub fn celsius_to_kelvin(c: f64) -> f64 {
    c + 273.15
}

pub fn kelvin_to_celsius(k: f64) -> f64 {
    k - 273.15
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureUnit {
    pub fn code(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "c",
            TemperatureUnit::Fahrenheit => "f",
            TemperatureUnit::Kelvin => "k",
        }
    }

    pub fn to_celsius(&self, value: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => value,
            TemperatureUnit::Fahrenheit => fahrenheit_to_celsius(value),
            TemperatureUnit::Kelvin => kelvin_to_celsius(value),
        }
    }

    pub fn from_celsius(&self, celsius: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => celsius,
            TemperatureUnit::Fahrenheit => celsius_to_fahrenheit(celsius),
            TemperatureUnit::Kelvin => celsius_to_kelvin(celsius),
        }
    }
}

impl FromStr for TemperatureUnit {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" | "celsius" | "°c" => Ok(TemperatureUnit::Celsius),
            "f" | "fahrenheit" | "°f" => Ok(TemperatureUnit::Fahrenheit),
            "k" | "kelvin" => Ok(TemperatureUnit::Kelvin),
            _ => Err(CalcError::InvalidUnit {
                unit: s.to_string(),
            }),
        }
    }
}

const ALL_UNITS: [TemperatureUnit; 3] = [
    TemperatureUnit::Celsius,
    TemperatureUnit::Fahrenheit,
    TemperatureUnit::Kelvin,
];

pub fn convert(value: f64, from: TemperatureUnit) -> Result<ConversionResult> {
    let celsius = ensure_finite_result(from.to_celsius(value))?;
    // small tolerance so -459.67 °F is accepted despite float error
    if celsius < ABSOLUTE_ZERO_C - 1e-9 {
        return Err(CalcError::invalid_input(
            "temperature cannot be below absolute zero",
        ));
    }

    let conversions = ALL_UNITS
        .iter()
        .map(|u| {
            let value = finite_round(u.from_celsius(celsius), TEMPERATURE_DECIMALS)?;
            Ok((u.code(), value))
        })
        .collect::<Result<BTreeMap<&'static str, f64>>>()?;

    Ok(ConversionResult {
        value,
        from: from.code(),
        canonical_unit: "c",
        canonical_value: finite_round(celsius, TEMPERATURE_DECIMALS)?,
        conversions,
        label: None,
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemperatureInput {
    #[serde(default)]
    pub value: NumberField,
    #[serde(default, alias = "unit")]
    pub from: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TemperatureCalculator;

impl Calculation for TemperatureCalculator {
    type Input = TemperatureInput;
    type Output = ConversionResult;

    fn name(&self) -> &'static str {
        "temperature"
    }

    fn calculate(&self, input: TemperatureInput) -> Result<ConversionResult> {
        let value = input.value.require("value")?;
        let from: TemperatureUnit = input
            .from
            .ok_or_else(|| CalcError::invalid_input("from unit is required"))?
            .parse()?;
        convert(value, from)
    }
}
