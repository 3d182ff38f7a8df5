use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::{round_to, Calculation, NumberField};
use crate::utils::error::{CalcError, Result};
use crate::utils::validation::ensure_finite_result;

pub const PERCENTAGE_DECIMALS: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PercentageKind {
    /// a% of b
    Of,
    /// a is what percent of b
    What,
    /// percent change from a to b
    Change,
    /// b increased by a%
    Add,
    /// b decreased by a%
    Subtract,
}

impl FromStr for PercentageKind {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "of" => Ok(PercentageKind::Of),
            "what" => Ok(PercentageKind::What),
            "change" => Ok(PercentageKind::Change),
            "add" | "increase" => Ok(PercentageKind::Add),
            "subtract" | "decrease" => Ok(PercentageKind::Subtract),
            _ => Err(CalcError::InvalidType {
                kind: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PercentageResult {
    #[serde(rename = "type")]
    pub kind: PercentageKind,
    pub a: f64,
    pub b: f64,
    pub result: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_increase: Option<bool>,
    pub description: String,
}

pub fn calculate(kind: PercentageKind, a: f64, b: f64) -> Result<PercentageResult> {
    let (raw, description) = match kind {
        PercentageKind::Of => (a / 100.0 * b, format!("{}% of {}", a, b)),
        PercentageKind::What => {
            if b == 0.0 {
                return Err(CalcError::invalid_input(
                    "b must not be zero when asking what percent a is of b",
                ));
            }
            (a / b * 100.0, format!("{} is what percent of {}", a, b))
        }
        PercentageKind::Change => {
            if a == 0.0 {
                return Err(CalcError::invalid_input(
                    "a must not be zero when computing a percentage change",
                ));
            }
            ((b - a) / a * 100.0, format!("change from {} to {}", a, b))
        }
        PercentageKind::Add => (b * (1.0 + a / 100.0), format!("{} + {}%", b, a)),
        PercentageKind::Subtract => (b * (1.0 - a / 100.0), format!("{} - {}%", b, a)),
    };

    let result = round_to(ensure_finite_result(raw)?, PERCENTAGE_DECIMALS);
    Ok(PercentageResult {
        kind,
        a,
        b,
        result,
        is_increase: (kind == PercentageKind::Change).then_some(result > 0.0),
        description,
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PercentageInput {
    #[serde(default, rename = "type", alias = "mode")]
    pub kind: Option<String>,
    #[serde(default, alias = "value1")]
    pub a: NumberField,
    #[serde(default, alias = "value2")]
    pub b: NumberField,
}

#[derive(Debug, Clone, Default)]
pub struct PercentageCalculator;

impl Calculation for PercentageCalculator {
    type Input = PercentageInput;
    type Output = PercentageResult;

    fn name(&self) -> &'static str {
        "percentage"
    }

    fn calculate(&self, input: PercentageInput) -> Result<PercentageResult> {
        let kind: PercentageKind = input
            .kind
            .ok_or_else(|| CalcError::invalid_input("type is required"))?
            .parse()?;
        let a = input.a.require("a")?;
        let b = input.b.require("b")?;
        calculate(kind, a, b)
    }
}
