use serde::{Deserialize, Serialize};

use crate::core::{finite_round2, round_to, Calculation, NumberField};
use crate::utils::error::{CalcError, Result};
use crate::utils::validation::{
    ensure_finite_result, validate_non_negative, validate_positive, validate_range,
    validate_whole_number,
};

pub const MAX_TENURE_MONTHS: u32 = 1200;
/// Leading periods kept in a truncated schedule; the final period is always kept.
pub const SCHEDULE_HEAD: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub month: u32,
    pub emi: f64,
    pub principal: f64,
    pub interest: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmiBreakdown {
    pub principal: f64,
    pub annual_rate: f64,
    pub monthly_rate: f64,
    pub tenure_months: u32,
    pub emi: f64,
    pub total_payment: f64,
    pub total_interest: f64,
    pub schedule: Vec<ScheduleEntry>,
    pub schedule_truncated: bool,
}

/// Unrounded monthly installment.
pub fn monthly_installment(principal: f64, annual_rate: f64, months: u32) -> f64 {
    let r = annual_rate / 1200.0;
    let n = months as f64;
    // P·r / (1 - (1+r)^-n); stays finite when (1+r)^n overflows
    let discount = 1.0 - (1.0 + r).powf(-n);
    if r == 0.0 || discount <= 0.0 {
        return principal / n;
    }
    principal * r / discount
}

fn keep_in_schedule(month: u32, months: u32, full: bool) -> bool {
    full || month <= SCHEDULE_HEAD || month == months
}

pub fn calculate(
    principal: f64,
    annual_rate: f64,
    months: u32,
    full_schedule: bool,
) -> Result<EmiBreakdown> {
    validate_positive("principal", principal)?;
    validate_non_negative("rate", annual_rate)?;
    validate_range("tenure", months, 1, MAX_TENURE_MONTHS)?;

    let r = annual_rate / 1200.0;
    let emi = ensure_finite_result(monthly_installment(principal, annual_rate, months))?;
    let emi_rounded = finite_round2(emi)?;
    let total_payment = finite_round2(emi_rounded * months as f64)?;

    let mut schedule = Vec::new();
    let mut balance = principal;
    for month in 1..=months {
        let interest = balance * r;
        let principal_part = emi - interest;
        balance -= principal_part;
        if keep_in_schedule(month, months, full_schedule) {
            schedule.push(ScheduleEntry {
                month,
                emi: emi_rounded,
                principal: finite_round2(principal_part)?,
                interest: finite_round2(interest)?,
                balance: finite_round2(balance.max(0.0))?,
            });
        }
    }

    Ok(EmiBreakdown {
        principal,
        annual_rate,
        monthly_rate: monthly_rate(annual_rate),
        tenure_months: months,
        emi: emi_rounded,
        total_payment,
        total_interest: finite_round2(total_payment - principal)?,
        schedule_truncated: !full_schedule && months > SCHEDULE_HEAD + 1,
        schedule,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TenureUnit {
    Months,
    Years,
}

impl std::str::FromStr for TenureUnit {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "month" | "months" => Ok(TenureUnit::Months),
            "year" | "years" => Ok(TenureUnit::Years),
            _ => Err(CalcError::InvalidType {
                kind: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmiInput {
    #[serde(default, alias = "amount")]
    pub principal: NumberField,
    #[serde(default, alias = "annualRate", alias = "interestRate")]
    pub rate: NumberField,
    #[serde(default)]
    pub tenure: NumberField,
    #[serde(default, alias = "tenure_type")]
    pub tenure_type: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct EmiCalculator {
    full_schedule: bool,
}

impl EmiCalculator {
    pub fn new(full_schedule: bool) -> Self {
        Self { full_schedule }
    }
}

impl Calculation for EmiCalculator {
    type Input = EmiInput;
    type Output = EmiBreakdown;

    fn name(&self) -> &'static str {
        "emi"
    }

    fn calculate(&self, input: EmiInput) -> Result<EmiBreakdown> {
        let principal = input.principal.require("principal")?;
        let rate = input.rate.require("rate")?;
        let tenure = input.tenure.require("tenure")?;
        validate_whole_number("tenure", tenure)?;

        let unit: TenureUnit = input.tenure_type.as_deref().unwrap_or("months").parse()?;
        let months = match unit {
            TenureUnit::Months => tenure,
            TenureUnit::Years => tenure * 12.0,
        };
        validate_range("tenure", months, 1.0, MAX_TENURE_MONTHS as f64)?;

        calculate(principal, rate, months as u32, self.full_schedule)
    }
}

/// Monthly rate as a fraction, rounded for display.
pub fn monthly_rate(annual_rate: f64) -> f64 {
    round_to(annual_rate / 1200.0, 8)
}
