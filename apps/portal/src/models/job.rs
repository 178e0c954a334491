use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::company::CompanyRef;

/// A job posting as the API returns it and as `PUT /jobs/{id}` expects it back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub location: String,
    #[serde(default)]
    pub min_salary: Option<f64>,
    #[serde(default)]
    pub max_salary: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<CompanyRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
    /// Server fields with no typed counterpart (`companyId`, `version`, ...),
    /// sent back untouched on update.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Job {
    /// "$90,000 – $120,000"; a missing bound shows as "-".
    pub fn salary_range(&self) -> String {
        let bound = |amount: Option<f64>| match amount {
            Some(amount) => format!("${}", format_amount(amount)),
            None => "-".to_string(),
        };
        format!("{} – {}", bound(self.min_salary), bound(self.max_salary))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub location: String,
    pub min_salary: f64,
    pub max_salary: f64,
    pub company: CompanyRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
}

/// Thousands-grouped amount with at most two decimals.
pub fn format_amount(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let mut out = if negative {
        format!("-{grouped}")
    } else {
        grouped
    };
    if fraction > 0 {
        let decimals = format!("{fraction:02}");
        out.push('.');
        out.push_str(decimals.trim_end_matches('0'));
    }
    out
}
