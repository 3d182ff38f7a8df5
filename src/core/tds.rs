use serde::{Deserialize, Serialize};

use crate::core::{finite_round, finite_round2, Calculation, NumberField};
use crate::utils::error::Result;
use crate::utils::validation::validate_non_negative;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TdsCategory {
    pub code: &'static str,
    pub section: &'static str,
    pub rate: f64,
    pub description: &'static str,
}

pub static TDS_CATEGORIES: [TdsCategory; 8] = [
    TdsCategory {
        code: "salary",
        section: "192",
        rate: 10.0,
        description: "Salary",
    },
    TdsCategory {
        code: "interest",
        section: "194A",
        rate: 10.0,
        description: "Interest other than on securities",
    },
    TdsCategory {
        code: "dividend",
        section: "194",
        rate: 10.0,
        description: "Dividend",
    },
    TdsCategory {
        code: "contractor",
        section: "194C",
        rate: 2.0,
        description: "Payment to contractors",
    },
    TdsCategory {
        code: "professional",
        section: "194J",
        rate: 10.0,
        description: "Professional or technical fees",
    },
    TdsCategory {
        code: "rent",
        section: "194I",
        rate: 10.0,
        description: "Rent",
    },
    TdsCategory {
        code: "commission",
        section: "194H",
        rate: 5.0,
        description: "Commission or brokerage",
    },
    TdsCategory {
        code: "nri",
        section: "195",
        rate: 20.0,
        description: "Payments to non-residents",
    },
];

/// Applied when the category is missing or not in [`TDS_CATEGORIES`].
pub const DEFAULT_CATEGORY: &str = "professional";

/// Surcharge applies once basic TDS exceeds this amount.
pub const SURCHARGE_THRESHOLD: f64 = 1_000_000.0;
pub const SURCHARGE_PERCENT: f64 = 10.0;
/// Health and education cess, levied on basic TDS plus surcharge.
pub const CESS_PERCENT: f64 = 4.0;

pub fn find_category(code: &str) -> Option<&'static TdsCategory> {
    let code = code.trim();
    TDS_CATEGORIES
        .iter()
        .find(|c| c.code.eq_ignore_ascii_case(code))
}

fn default_category() -> &'static TdsCategory {
    TDS_CATEGORIES
        .iter()
        .find(|c| c.code == DEFAULT_CATEGORY)
        .unwrap_or(&TDS_CATEGORIES[0])
}

/// Resolves a category code, falling back to [`DEFAULT_CATEGORY`].
/// The flag is `true` when the fallback was used.
pub fn resolve_category(code: Option<&str>) -> (&'static TdsCategory, bool) {
    match code.and_then(find_category) {
        Some(category) => (category, false),
        None => (default_category(), true),
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TdsBreakdown {
    pub amount: f64,
    pub category: &'static str,
    pub section: &'static str,
    pub description: &'static str,
    pub category_fallback: bool,
    pub tds_rate: f64,
    pub basic_tds: f64,
    pub surcharge: f64,
    pub cess: f64,
    pub total_tds: f64,
    pub net_amount: f64,
    pub effective_rate: f64,
}

pub fn calculate(amount: f64, category: Option<&str>) -> Result<TdsBreakdown> {
    validate_non_negative("amount", amount)?;
    let (category, category_fallback) = resolve_category(category);

    let basic_tds = amount * category.rate / 100.0;
    let surcharge = if basic_tds > SURCHARGE_THRESHOLD {
        basic_tds * SURCHARGE_PERCENT / 100.0
    } else {
        0.0
    };
    let cess = (basic_tds + surcharge) * CESS_PERCENT / 100.0;
    let total_tds = basic_tds + surcharge + cess;
    let effective_rate = if amount > 0.0 {
        total_tds / amount * 100.0
    } else {
        0.0
    };

    Ok(TdsBreakdown {
        amount: finite_round2(amount)?,
        category: category.code,
        section: category.section,
        description: category.description,
        category_fallback,
        tds_rate: category.rate,
        basic_tds: finite_round2(basic_tds)?,
        surcharge: finite_round2(surcharge)?,
        cess: finite_round2(cess)?,
        total_tds: finite_round2(total_tds)?,
        net_amount: finite_round2(amount - total_tds)?,
        effective_rate: finite_round(effective_rate, 4)?,
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TdsInput {
    #[serde(default)]
    pub amount: NumberField,
    #[serde(default, alias = "type")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TdsCalculator;

impl Calculation for TdsCalculator {
    type Input = TdsInput;
    type Output = TdsBreakdown;

    fn name(&self) -> &'static str {
        "tds"
    }

    fn calculate(&self, input: TdsInput) -> Result<TdsBreakdown> {
        let amount = input.amount.require("amount")?;
        calculate(amount, input.category.as_deref())
    }
}
