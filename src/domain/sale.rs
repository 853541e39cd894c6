// src/domain/sale.rs

use crate::domain::money::{check_amount, round_cents};
use crate::errors::ServerError;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Last-name sentinel marking a tour that produced no sale.
pub const NO_SALE: &str = "NO SALE";

/// Manager placeholder stored on no-sale entries.
pub const NO_MANAGER: &str = "-";

/// Most tours a single entry may record.
pub const MAX_TOURS_PER_ENTRY: u32 = 1_000;

/// Entry dates must fall within these years.
pub const MIN_ENTRY_YEAR: i32 = 2000;
pub const MAX_ENTRY_YEAR: i32 = 2100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SaleType {
    Deed,
    Trust,
}

impl SaleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SaleType::Deed => "DEED",
            SaleType::Trust => "TRUST",
        }
    }
}

impl fmt::Display for SaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SaleType {
    type Err = ServerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEED" => Ok(SaleType::Deed),
            "TRUST" => Ok(SaleType::Trust),
            other => Err(ServerError::Validation(format!("unknown sale type '{other}'"))),
        }
    }
}

impl ToSql for SaleType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for SaleType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: ServerError| FromSqlError::Other(Box::new(e)))
    }
}

/// A stored sale (or no-sale) entry.
///
/// Commission and FDI fields are computed once when the entry is recorded and
/// are never recomputed when tiers change or later sales move the volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub id: i64,
    pub project_id: i64,
    pub date: NaiveDate,
    pub client_last_name: String,
    pub lead_number: String,
    pub manager_name: String,
    pub number_of_tours: u32,
    pub sale_amount: Decimal,
    pub sale_type: SaleType,
    pub commission_percentage: Decimal,
    pub commission_amount: Decimal,
    pub fdi_points: Decimal,
    pub fdi_given_points: Decimal,
    pub fdi_cost: Decimal,
    /// Volume per tour of this single entry, in cents.
    pub sale_vpg: Decimal,
    pub notes: String,
    pub is_cancelled: bool,
    pub created_at: i64,
}

impl SaleRecord {
    pub fn is_no_sale(&self) -> bool {
        self.client_last_name == NO_SALE
    }

    /// Counts toward volume, commission and sale totals.
    pub fn is_active(&self) -> bool {
        !self.is_cancelled && !self.is_no_sale()
    }
}

/// Raw user input for a new or edited entry, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleEntry {
    pub date: NaiveDate,
    pub client_last_name: String,
    pub lead_number: String,
    pub manager_name: String,
    pub number_of_tours: u32,
    pub sale_amount: Decimal,
    pub sale_type: SaleType,
    pub fdi_given_points: Decimal,
    pub notes: String,
    pub is_cancelled: bool,
    pub is_no_sale: bool,
}

impl SaleEntry {
    /// Boundary checks run before anything reaches the resolver.
    pub fn validate(&self) -> Result<(), ServerError> {
        let year = self.date.year();
        if !(MIN_ENTRY_YEAR..=MAX_ENTRY_YEAR).contains(&year) {
            return Err(ServerError::Validation(format!(
                "date {} is outside {MIN_ENTRY_YEAR}-{MAX_ENTRY_YEAR}",
                self.date
            )));
        }
        if self.number_of_tours > MAX_TOURS_PER_ENTRY {
            return Err(ServerError::Validation(format!(
                "number of tours must be at most {MAX_TOURS_PER_ENTRY}, got {}",
                self.number_of_tours
            )));
        }
        if self.is_no_sale {
            return Ok(());
        }
        check_amount("sale amount", self.sale_amount)?;
        check_amount("FDI given points", self.fdi_given_points)?;

        let last_name = self.client_last_name.trim();
        if last_name.is_empty() {
            return Err(ServerError::Validation("client last name is required".into()));
        }
        if last_name.eq_ignore_ascii_case(NO_SALE) {
            return Err(ServerError::Validation(format!(
                "'{NO_SALE}' is reserved for no-sale entries"
            )));
        }
        Ok(())
    }
}

/// Volume per tour, 0 when there were no tours. Unrounded.
pub fn volume_per_tour(volume: Decimal, tours: u64) -> Decimal {
    if tours > 0 {
        volume / Decimal::from(tours)
    } else {
        Decimal::ZERO
    }
}

/// Per-entry VPG as stored on the record, rounded to cents.
pub fn entry_vpg(amount: Decimal, tours: u32) -> Decimal {
    round_cents(volume_per_tour(amount, u64::from(tours)))
}
