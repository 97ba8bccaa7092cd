use std::borrow::Cow;

use chrono::{Datelike, NaiveDate};
use validator::{Validate, ValidationError};

use super::NewReport;
use crate::domain::{DomainError, DomainResult};

/// Date format accepted for `fecha` (HTML `<input type="date">`)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw report fields as submitted by a client
#[derive(Debug, Clone, Validate)]
pub struct CreateReportDto {
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    #[validate(custom(function = "not_blank"))]
    pub description: String,
    #[validate(custom(function = "calendar_date"))]
    pub date: String,
}

impl CreateReportDto {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            date: date.into(),
        }
    }

    /// Validate all fields and convert into a storable report.
    pub fn into_new_report(self) -> DomainResult<NewReport> {
        self.validate()?;

        let date = parse_date(&self.date).ok_or_else(|| {
            DomainError::Validation(format!("date: invalid calendar date '{}'", self.date))
        })?;

        Ok(NewReport {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            date,
        })
    }
}

/// Strict `YYYY-MM-DD`: four-digit year from 0001, zero-padded month and day.
fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let bytes = value.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return None;
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .filter(|date| date.year() >= 1)
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some(Cow::from("must not be empty"));
        return Err(err);
    }
    Ok(())
}

fn calendar_date(value: &str) -> Result<(), ValidationError> {
    if parse_date(value).is_none() {
        let mut err = ValidationError::new("date");
        err.message = Some(Cow::from("must be a calendar date in YYYY-MM-DD format"));
        return Err(err);
    }
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────
