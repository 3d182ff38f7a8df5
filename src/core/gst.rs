use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::{finite_round2, Calculation, NumberField};
use crate::utils::error::{CalcError, Result};
use crate::utils::validation::validate_non_negative;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GstMode {
    /// `amount` already contains the tax.
    Inclusive,
    /// Tax is added on top of `amount`.
    Exclusive,
}

impl FromStr for GstMode {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inclusive" | "incl" => Ok(GstMode::Inclusive),
            "exclusive" | "excl" => Ok(GstMode::Exclusive),
            _ => Err(CalcError::InvalidType {
                kind: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GstBreakdown {
    #[serde(rename = "type")]
    pub mode: GstMode,
    pub original_amount: f64,
    pub gst_rate: f64,
    pub gst_amount: f64,
    pub cgst: f64,
    pub sgst: f64,
    pub cgst_rate: f64,
    pub sgst_rate: f64,
    pub total_amount: f64,
}

pub fn calculate(amount: f64, rate: f64, mode: GstMode) -> Result<GstBreakdown> {
    validate_non_negative("amount", amount)?;
    validate_non_negative("rate", rate)?;

    let (base, tax, total) = match mode {
        GstMode::Exclusive => {
            let tax = amount * rate / 100.0;
            (amount, tax, amount + tax)
        }
        GstMode::Inclusive => {
            // rate >= 0 keeps the divisor at 100 or more
            let base = amount * 100.0 / (100.0 + rate);
            (base, amount - base, amount)
        }
    };

    Ok(GstBreakdown {
        mode,
        original_amount: finite_round2(base)?,
        gst_rate: rate,
        gst_amount: finite_round2(tax)?,
        cgst: finite_round2(tax / 2.0)?,
        sgst: finite_round2(tax / 2.0)?,
        cgst_rate: rate / 2.0,
        sgst_rate: rate / 2.0,
        total_amount: finite_round2(total)?,
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GstInput {
    #[serde(default)]
    pub amount: NumberField,
    #[serde(default)]
    pub rate: NumberField,
    #[serde(default, rename = "type", alias = "mode")]
    pub mode: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct GstCalculator;

impl Calculation for GstCalculator {
    type Input = GstInput;
    type Output = GstBreakdown;

    fn name(&self) -> &'static str {
        "gst"
    }

    fn calculate(&self, input: GstInput) -> Result<GstBreakdown> {
        let amount = input.amount.require("amount")?;
        let rate = input.rate.require("rate")?;
        let mode = match input.mode.as_deref() {
            None | Some("") => GstMode::Exclusive,
            Some(raw) => raw.parse()?,
        };
        calculate(amount, rate, mode)
    }
}
