use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::str::FromStr;

use crate::core::{finite_round, Calculation, NumberField};
use crate::utils::error::{CalcError, Result};
use crate::utils::validation::validate_positive;

pub const AREA_DECIMALS: u32 = 6;
pub const SQ_FT_PER_SQ_M: f64 = 10.7639;
const SCIENTIFIC_FROM: f64 = 1e15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Rectangle,
    Circle,
    Triangle,
    Square,
    Trapezoid,
}

impl FromStr for Shape {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rectangle" => Ok(Shape::Rectangle),
            "circle" => Ok(Shape::Circle),
            "triangle" => Ok(Shape::Triangle),
            "square" => Ok(Shape::Square),
            "trapezoid" | "trapezium" => Ok(Shape::Trapezoid),
            _ => Err(CalcError::InvalidShape {
                shape: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AreaInput {
    #[serde(default)]
    pub shape: Option<String>,
    #[serde(default, alias = "l")]
    pub length: NumberField,
    #[serde(default, alias = "w")]
    pub width: NumberField,
    #[serde(default, alias = "r")]
    pub radius: NumberField,
    #[serde(default)]
    pub base: NumberField,
    #[serde(default, alias = "h")]
    pub height: NumberField,
    #[serde(default, alias = "s")]
    pub side: NumberField,
    #[serde(default)]
    pub a: NumberField,
    #[serde(default)]
    pub b: NumberField,
    #[serde(default)]
    pub c: NumberField,
    #[serde(default)]
    pub d: NumberField,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AreaResult {
    pub shape: Shape,
    pub area: f64,
    /// Absent when the input does not pin down every side.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perimeter: Option<f64>,
    pub area_sq_ft: f64,
    pub area_sq_m: f64,
    pub formula: String,
}

fn dimension(field: &NumberField, name: &str) -> Result<f64> {
    let value = field.require(name)?;
    validate_positive(name, value)?;
    Ok(value)
}

fn optional_dimension(field: &NumberField, name: &str) -> Result<Option<f64>> {
    match field.optional(name)? {
        Some(value) => {
            validate_positive(name, value)?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

fn triangle_perimeter(input: &AreaInput) -> Result<Option<f64>> {
    let sides = (
        optional_dimension(&input.a, "a")?,
        optional_dimension(&input.b, "b")?,
        optional_dimension(&input.c, "c")?,
    );
    match sides {
        (Some(a), Some(b), Some(c)) => {
            if a + b <= c || a + c <= b || b + c <= a {
                return Err(CalcError::invalid_input(
                    "sides a, b and c do not form a triangle",
                ));
            }
            Ok(Some(a + b + c))
        }
        _ => Ok(None),
    }
}

/// Formula operand; switches to scientific notation once `Display` would
/// spell out every digit.
fn show(value: f64) -> String {
    if value.abs() >= SCIENTIFIC_FROM {
        format!("{:e}", value)
    } else {
        value.to_string()
    }
}

/// Area, optional perimeter and the formula with the inputs substituted.
fn measure(shape: Shape, input: &AreaInput) -> Result<(f64, Option<f64>, String)> {
    Ok(match shape {
        Shape::Rectangle => {
            let l = dimension(&input.length, "length")?;
            let w = dimension(&input.width, "width")?;
            let area = l * w;
            (
                area,
                Some(2.0 * (l + w)),
                format!("Area = length × width = {} × {}", show(l), show(w)),
            )
        }
        Shape::Circle => {
            let r = dimension(&input.radius, "radius")?;
            (
                PI * r * r,
                Some(2.0 * PI * r),
                format!("Area = π × r² = π × {}²", show(r)),
            )
        }
        Shape::Triangle => {
            let base = dimension(&input.base, "base")?;
            let height = dimension(&input.height, "height")?;
            (
                0.5 * base * height,
                triangle_perimeter(input)?,
                format!(
                    "Area = ½ × base × height = ½ × {} × {}",
                    show(base),
                    show(height)
                ),
            )
        }
        Shape::Square => {
            let s = dimension(&input.side, "side")?;
            (s * s, Some(4.0 * s), format!("Area = side² = {}²", show(s)))
        }
        Shape::Trapezoid => {
            let a = dimension(&input.a, "a")?;
            let b = dimension(&input.b, "b")?;
            let height = dimension(&input.height, "height")?;
            let c = optional_dimension(&input.c, "c")?;
            let d = optional_dimension(&input.d, "d")?;
            (
                0.5 * (a + b) * height,
                c.zip(d).map(|(c, d)| a + b + c + d),
                format!(
                    "Area = ½ × (a + b) × height = ½ × ({} + {}) × {}",
                    show(a),
                    show(b),
                    show(height)
                ),
            )
        }
    })
}

pub fn calculate(shape: Shape, input: &AreaInput) -> Result<AreaResult> {
    let (area, perimeter, formula) = measure(shape, input)?;
    let area = finite_round(area, AREA_DECIMALS)?;
    let perimeter = perimeter
        .map(|p| finite_round(p, AREA_DECIMALS))
        .transpose()?;

    Ok(AreaResult {
        shape,
        area,
        perimeter,
        area_sq_ft: finite_round(area * SQ_FT_PER_SQ_M, 4)?,
        area_sq_m: area,
        formula: format!("{} = {}", formula, show(area)),
    })
}

#[derive(Debug, Clone, Default)]
pub struct AreaCalculator;

impl Calculation for AreaCalculator {
    type Input = AreaInput;
    type Output = AreaResult;

    fn name(&self) -> &'static str {
        "area"
    }

    fn calculate(&self, input: AreaInput) -> Result<AreaResult> {
        let shape: Shape = input
            .shape
            .as_deref()
            .ok_or_else(|| CalcError::invalid_input("shape is required"))?
            .parse()?;
        calculate(shape, &input)
    }
}
