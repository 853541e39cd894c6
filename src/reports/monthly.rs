// src/reports/monthly.rs

use crate::domain::sale::{volume_per_tour, SaleRecord};
use crate::errors::ServerError;
use crate::reports::daily::{aggregate_for_days, DailyMetric};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Calendar month key, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, ServerError> {
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(ServerError::Validation(format!(
                "invalid month {year:04}-{month:02}"
            )));
        }
        Ok(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        // Constructors guarantee a valid month.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// Every calendar day of the month, in order.
    pub fn days(&self) -> Vec<NaiveDate> {
        let month = self.month;
        self.first_day()
            .iter_days()
            .take_while(|d| d.month() == month)
            .collect()
    }

    /// Display title, e.g. "March 2024".
    pub fn title(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = ServerError;

    /// Parses `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ServerError::Validation(format!("expected YYYY-MM, got '{s}'"));
        let (year, month) = s.trim().split_once('-').ok_or_else(bad)?;
        let year = year.parse::<i32>().map_err(|_| bad())?;
        let month = month.parse::<u32>().map_err(|_| bad())?;
        Self::new(year, month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MonthlyTotals {
    pub total_sales: u32,
    pub total_volume: Decimal,
    pub total_commission: Decimal,
    pub total_tours: u64,
    /// Summed volume over summed tours; never an average of daily VPGs.
    pub vpg: Decimal,
}

impl MonthlyTotals {
    fn add_day(&mut self, day: &DailyMetric) {
        self.total_sales = self.total_sales.saturating_add(day.total_sales);
        self.total_volume += day.total_volume;
        self.total_commission += day.total_commission;
        self.total_tours = self.total_tours.saturating_add(day.total_tours);
        self.vpg = volume_per_tour(self.total_volume, self.total_tours);
    }

    /// Totals over `days` regardless of which month they fall in.
    pub fn from_days(days: &[DailyMetric]) -> Self {
        let mut totals = Self::default();
        for day in days {
            totals.add_day(day);
        }
        totals
    }
}

/// Sum daily metrics into per-month totals, keyed chronologically.
pub fn aggregate_by_month(days: &[DailyMetric]) -> BTreeMap<YearMonth, MonthlyTotals> {
    let mut months: BTreeMap<YearMonth, MonthlyTotals> = BTreeMap::new();
    for day in days {
        months.entry(YearMonth::of(day.date)).or_default().add_day(day);
    }
    months
}

/// Full-month view: one row per calendar day plus the month's totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyReport {
    pub month: YearMonth,
    pub days: Vec<DailyMetric>,
    pub totals: MonthlyTotals,
}

impl MonthlyReport {
    pub fn title(&self) -> String {
        self.month.title()
    }
}

pub fn monthly_report(sales: &[SaleRecord], month: YearMonth) -> MonthlyReport {
    let days = aggregate_for_days(sales, &month.days());
    let totals = MonthlyTotals::from_days(&days);
    MonthlyReport {
        month,
        days,
        totals,
    }
}
