pub mod age;
pub mod area;
pub mod arithmetic;
pub mod emi;
pub mod expression;
pub mod gst;
pub mod percentage;
pub mod tds;
pub mod units;

pub use crate::domain::model::{ConversionResult, NumberField};
pub use crate::domain::ports::Calculation;
pub use crate::utils::error::Result;

use crate::utils::error::CalcError;
use crate::utils::validation::ensure_finite_result;
use serde_json::Value;

/// Scaled values at or above 2^52 carry no fraction bits left to round.
const NO_FRACTION_FROM: f64 = 4_503_599_627_370_496.0;

/// Rounds half away from zero to `decimals` places and normalises `-0.0`.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;
    if !scaled.is_finite() || scaled.abs() >= NO_FRACTION_FROM {
        return value;
    }
    let rounded = scaled.round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

/// `round_to` for computed outputs: an overflowed or undefined value is an
/// `InvalidInput` error instead of a `null` in the response.
pub fn finite_round(value: f64, decimals: u32) -> Result<f64> {
    ensure_finite_result(value).map(|v| round_to(v, decimals))
}

pub fn finite_round2(value: f64) -> Result<f64> {
    finite_round(value, 2)
}

/// Every calculator the service exposes, configured once at startup.
#[derive(Debug, Clone, Default)]
pub struct Calculators {
    pub basic: arithmetic::ArithmeticCalculator,
    pub gst: gst::GstCalculator,
    pub tds: tds::TdsCalculator,
    pub height: units::height::HeightCalculator,
    pub length: units::length::LengthCalculator,
    pub weight: units::weight::WeightCalculator,
    pub temperature: units::temperature::TemperatureCalculator,
    pub age: age::AgeCalculator,
    pub emi: emi::EmiCalculator,
    pub percentage: percentage::PercentageCalculator,
    pub area: area::AreaCalculator,
}

impl Calculators {
    pub fn new(limits: expression::ExpressionLimits, full_emi_schedule: bool) -> Self {
        Self {
            basic: arithmetic::ArithmeticCalculator::new(limits),
            emi: emi::EmiCalculator::new(full_emi_schedule),
            ..Self::default()
        }
    }

    pub const NAMES: [&'static str; 11] = [
        "basic",
        "gst",
        "tds",
        "height",
        "length",
        "weight",
        "temperature",
        "age",
        "emi",
        "percentage",
        "area",
    ];

    /// Runs the calculator registered under `name` on a raw JSON payload.
    pub fn evaluate(&self, name: &str, payload: Value) -> Result<Value> {
        match name {
            "basic" => self.basic.evaluate_json(payload),
            "gst" => self.gst.evaluate_json(payload),
            "tds" => self.tds.evaluate_json(payload),
            "height" => self.height.evaluate_json(payload),
            "length" => self.length.evaluate_json(payload),
            "weight" => self.weight.evaluate_json(payload),
            "temperature" => self.temperature.evaluate_json(payload),
            "age" => self.age.evaluate_json(payload),
            "emi" => self.emi.evaluate_json(payload),
            "percentage" => self.percentage.evaluate_json(payload),
            "area" => self.area.evaluate_json(payload),
            other => Err(CalcError::InvalidType {
                kind: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(8791.588723, 2), 8791.59);
        assert_eq!(round_to(-33.333333, 4), -33.3333);
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(-0.00001, 2), 0.0);
        assert!(round_to(-0.00001, 2).is_sign_positive());
    }

    #[test]
    fn test_round_to_keeps_huge_values() {
        assert_eq!(round_to(1e306, 6), 1e306);
        assert_eq!(round_to(1e20, 6), 1e20);
        assert_eq!(round_to(-123456789012.5, 6), -123456789012.5);
    }

    #[test]
    fn test_finite_round() {
        assert_eq!(finite_round2(8791.588723).unwrap(), 8791.59);
        assert_eq!(finite_round(1e306, 6).unwrap(), 1e306);

        for bad in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            let err = finite_round2(bad).unwrap_err();
            assert_eq!(err.code(), "InvalidInput");
        }
    }

    #[test]
    fn test_every_name_dispatches() {
        let calculators = Calculators::default();
        for name in Calculators::NAMES {
            // an empty body must come back as a structured error, never a panic
            let result = calculators.evaluate(name, json!({}));
            assert!(result.is_err(), "{} accepted an empty body", name);
        }
    }

    #[test]
    fn test_unknown_calculator() {
        let err = Calculators::default()
            .evaluate("mortgage", json!({}))
            .unwrap_err();
        assert_eq!(err.code(), "InvalidType");
    }
}
