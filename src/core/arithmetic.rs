use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::expression::{self, ExpressionLimits};
use crate::core::{round_to, Calculation, NumberField};
use crate::utils::error::{CalcError, Result};
use crate::utils::validation::ensure_finite_result;

/// Results are trimmed to this many places to hide binary float noise
/// (`0.1 + 0.2` reports `0.3`).
const RESULT_DECIMALS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl FromStr for Operator {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "+" | "add" => Ok(Operator::Add),
            "-" | "sub" | "subtract" => Ok(Operator::Subtract),
            "*" | "x" | "mul" | "multiply" => Ok(Operator::Multiply),
            "/" | "div" | "divide" => Ok(Operator::Divide),
            "%" | "mod" => Ok(Operator::Modulo),
            _ => Err(CalcError::InvalidOperator {
                operator: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Modulo => "%",
        };
        f.write_str(symbol)
    }
}

/// Applies `op`; a zero divisor is rejected rather than reported as a value.
pub fn apply(a: f64, op: Operator, b: f64) -> Result<f64> {
    let value = match op {
        Operator::Add => a + b,
        Operator::Subtract => a - b,
        Operator::Multiply => a * b,
        Operator::Divide | Operator::Modulo if b == 0.0 => {
            return Err(CalcError::DivisionByZero)
        }
        Operator::Divide => a / b,
        Operator::Modulo => a % b,
    };
    ensure_finite_result(value).map(|v| round_to(v, RESULT_DECIMALS))
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BasicInput {
    #[serde(default)]
    pub a: NumberField,
    #[serde(default)]
    pub b: NumberField,
    #[serde(default)]
    pub operator: Option<String>,
    #[serde(default)]
    pub expression: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BasicResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub a: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
    pub result: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ArithmeticCalculator {
    limits: ExpressionLimits,
}

impl ArithmeticCalculator {
    pub fn new(limits: ExpressionLimits) -> Self {
        Self { limits }
    }
}

impl Calculation for ArithmeticCalculator {
    type Input = BasicInput;
    type Output = BasicResult;

    fn name(&self) -> &'static str {
        "basic"
    }

    fn calculate(&self, input: BasicInput) -> Result<BasicResult> {
        if let Some(expr) = input.expression {
            let value = expression::evaluate(&expr, &self.limits)?;
            return Ok(BasicResult {
                a: None,
                b: None,
                operator: None,
                expression: Some(expr.trim().to_string()),
                result: round_to(value, RESULT_DECIMALS),
            });
        }

        let a = input.a.require("a")?;
        let b = input.b.require("b")?;
        let raw_operator = input
            .operator
            .ok_or_else(|| CalcError::invalid_input("operator is required"))?;
        let op: Operator = raw_operator.parse()?;

        Ok(BasicResult {
            a: Some(a),
            b: Some(b),
            operator: Some(op.to_string()),
            expression: None,
            result: apply(a, op, b)?,
        })
    }
}
