use chrono::{DateTime, Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::Calculation;
use crate::utils::error::{CalcError, Result};

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d-%m-%Y", "%Y/%m/%d"];

/// Upper (inclusive) boundary of each sign; the first boundary not yet
/// passed wins, and December 31 always lands on Capricorn.
const ZODIAC_TABLE: [(u32, u32, &str); 13] = [
    (1, 19, "Capricorn"),
    (2, 18, "Aquarius"),
    (3, 20, "Pisces"),
    (4, 19, "Aries"),
    (5, 20, "Taurus"),
    (6, 20, "Gemini"),
    (7, 22, "Cancer"),
    (8, 22, "Leo"),
    (9, 22, "Virgo"),
    (10, 22, "Libra"),
    (11, 21, "Scorpio"),
    (12, 21, "Sagittarius"),
    (12, 31, "Capricorn"),
];

pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CalcError::invalid_date("date is empty"));
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Ok(date);
        }
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Ok(datetime.date_naive());
    }
    Err(CalcError::invalid_date(format!(
        "'{}' is not a date (expected YYYY-MM-DD)",
        raw
    )))
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(31)
}

pub fn zodiac_sign(month: u32, day: u32) -> &'static str {
    ZODIAC_TABLE
        .iter()
        .find(|(m, d, _)| month < *m || (month == *m && day <= *d))
        .map(|(_, _, sign)| *sign)
        .unwrap_or("Capricorn")
}

/// The birthday in `year`; Feb 29 moves to Feb 28 in common years.
fn birthday_in(birth: NaiveDate, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, birth.month(), birth.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, birth.month(), birth.day() - 1))
}

/// Next birthday on or after `as_of`.
pub fn next_birthday(birth: NaiveDate, as_of: NaiveDate) -> Result<NaiveDate> {
    let this_year = birthday_in(birth, as_of.year())
        .ok_or_else(|| CalcError::invalid_date("birthday is out of range"))?;
    if this_year >= as_of {
        return Ok(this_year);
    }
    birthday_in(birth, as_of.year() + 1)
        .ok_or_else(|| CalcError::invalid_date("birthday is out of range"))
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AgeBreakdown {
    pub birth_date: NaiveDate,
    pub as_of: NaiveDate,
    pub years: i32,
    pub months: i32,
    pub days: i32,
    pub total_days: i64,
    pub total_weeks: i64,
    pub total_months: i32,
    pub total_hours: i64,
    pub next_birthday: NaiveDate,
    pub next_birthday_in_days: i64,
    pub born_on: String,
    pub zodiac_sign: &'static str,
}

/// Calendar-aware age of someone born on `birth`, measured on `as_of`.
pub fn calculate(birth: NaiveDate, as_of: NaiveDate) -> Result<AgeBreakdown> {
    if birth > as_of {
        return Err(CalcError::invalid_date("birth date is in the future"));
    }

    let mut years = as_of.year() - birth.year();
    let mut months = as_of.month() as i32 - birth.month() as i32;
    let mut days = as_of.day() as i32 - birth.day() as i32;

    if days < 0 {
        months -= 1;
        let (prev_year, prev_month) = if as_of.month() == 1 {
            (as_of.year() - 1, 12)
        } else {
            (as_of.year(), as_of.month() - 1)
        };
        // a 31st birth day borrows at least 31 days so the result never goes negative
        let borrowed = days_in_month(prev_year, prev_month).max(birth.day());
        days += borrowed as i32;
    }
    if months < 0 {
        years -= 1;
        months += 12;
    }

    let total_days = (as_of - birth).num_days();
    let next = next_birthday(birth, as_of)?;

    Ok(AgeBreakdown {
        birth_date: birth,
        as_of,
        years,
        months,
        days,
        total_days,
        total_weeks: total_days / 7,
        total_months: years * 12 + months,
        total_hours: total_days * 24,
        next_birthday: next,
        next_birthday_in_days: (next - as_of).num_days(),
        born_on: birth.format("%A").to_string(),
        zodiac_sign: zodiac_sign(birth.month(), birth.day()),
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeInput {
    #[serde(default, alias = "dob", alias = "birth_date")]
    pub birth_date: Option<String>,
    #[serde(default, alias = "as_of")]
    pub as_of: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AgeCalculator;

impl Calculation for AgeCalculator {
    type Input = AgeInput;
    type Output = AgeBreakdown;

    fn name(&self) -> &'static str {
        "age"
    }

    fn calculate(&self, input: AgeInput) -> Result<AgeBreakdown> {
        let birth = input
            .birth_date
            .as_deref()
            .ok_or_else(|| CalcError::invalid_date("birthDate is required"))
            .and_then(parse_date)?;
        let as_of = match input.as_of.as_deref() {
            Some(raw) => parse_date(raw)?,
            None => Local::now().date_naive(),
        };
        calculate(birth, as_of)
    }
}
