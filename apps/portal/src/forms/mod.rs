//! Form controllers.
//!
//! Each form holds its own field values and walks
//! `Idle → Submitting → Idle` (success, fields reset) or
//! `Idle → Submitting → Failed` (fields kept). Required-field checks run
//! before any network call and leave the status untouched.

use std::str::FromStr;

use thiserror::Error;

use crate::errors::ApiError;
use crate::notify::{Notice, Notifier};

pub mod company;
pub mod employee;
pub mod job;
pub mod review;

pub use company::{CompanyField, CompanyForm};
pub use employee::{EmployeeField, EmployeeForm};
pub use job::{JobField, JobForm};
pub use review::{ReviewForm, ReviewFormView};

pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
    /// Back to interactive, showing the last submission error.
    Failed(String),
}

impl FormStatus {
    pub fn is_submitting(&self) -> bool {
        matches!(self, FormStatus::Submitting)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FormStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum FormError {
    #[error("{}", REQUIRED_FIELDS_MESSAGE)]
    MissingFields(Vec<&'static str>),

    #[error("{field} must be a number")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Employee {0} is not eligible to review this job")]
    NotEligible(i64),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl FormError {
    pub fn is_validation(&self) -> bool {
        !matches!(self, FormError::Api(_))
    }
}

/// Fails with the labels of every blank field.
pub(crate) fn missing_fields<F: Copy>(
    fields: &[F],
    label: impl Fn(F) -> &'static str,
    filled: impl Fn(F) -> bool,
) -> Result<(), FormError> {
    let missing: Vec<&'static str> = fields
        .iter()
        .copied()
        .filter(|&f| !filled(f))
        .map(label)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(FormError::MissingFields(missing))
    }
}

pub(crate) fn parse_number<T: FromStr>(field: &'static str, raw: &str) -> Result<T, FormError> {
    raw.trim().parse().map_err(|_| FormError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}

/// Like [`parse_number`], but "NaN" and infinities are not amounts.
pub(crate) fn parse_amount(field: &'static str, raw: &str) -> Result<f64, FormError> {
    let amount: f64 = parse_number(field, raw)?;
    if amount.is_finite() {
        Ok(amount)
    } else {
        Err(FormError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
    }
}

/// Emits the validation notice and hands the error back.
pub(crate) fn reject(notifier: &dyn Notifier, err: FormError) -> FormError {
    notifier.notify(Notice::validation(err.to_string()));
    err
}

/// Records a failed submission: status keeps the message, notifier shows it.
pub(crate) fn fail(
    status: &mut FormStatus,
    notifier: &dyn Notifier,
    err: ApiError,
    fallback: &str,
) -> FormError {
    let message = err.message_or(fallback).to_string();
    tracing::warn!("Submission failed (status {}): {}", err.status, err.message);
    notifier.notify(Notice::error(message.clone()));
    *status = FormStatus::Failed(message);
    FormError::Api(err)
}
