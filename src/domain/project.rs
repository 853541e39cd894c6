// src/domain/project.rs

use crate::domain::tier::CommissionTier;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub created_at: i64,
    pub updated_at: i64,
    /// Ordered; the resolver takes the first matching range.
    pub tiers: Vec<CommissionTier>,
}

/// Name given to a lazily created project, e.g. "October 2026".
pub fn default_project_name(today: NaiveDate) -> String {
    today.format("%B %Y").to_string()
}
