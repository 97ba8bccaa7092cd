//! Report ("informe") domain entity

use chrono::NaiveDate;

/// Stored report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
}

/// Validated report fields, ready to be persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReport {
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
}
