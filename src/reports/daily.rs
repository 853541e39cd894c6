// src/reports/daily.rs

use crate::domain::sale::{volume_per_tour, SaleRecord};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Totals for one calendar day, with the raw entries that produced them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyMetric {
    pub date: NaiveDate,
    /// Active (not cancelled, not no-sale) entries.
    pub total_sales: u32,
    pub total_volume: Decimal,
    pub total_commission: Decimal,
    /// Tours over every entry of the day, cancelled and no-sale included.
    pub total_tours: u64,
    pub daily_vpg: Decimal,
    pub is_first_of_month: bool,
    pub entries: Vec<SaleRecord>,
}

impl DailyMetric {
    /// Build the metric for `date` from that day's entries.
    pub fn from_entries(date: NaiveDate, entries: Vec<SaleRecord>) -> Self {
        let mut total_sales = 0;
        let mut total_volume = Decimal::ZERO;
        let mut total_commission = Decimal::ZERO;
        let mut total_tours: u64 = 0;

        for sale in &entries {
            total_tours = total_tours.saturating_add(u64::from(sale.number_of_tours));
            if sale.is_active() {
                total_sales += 1;
                total_volume += sale.sale_amount;
                total_commission += sale.commission_amount;
            }
        }

        Self {
            date,
            total_sales,
            total_volume,
            total_commission,
            total_tours,
            daily_vpg: volume_per_tour(total_volume, total_tours),
            is_first_of_month: date.day() == 1,
            entries,
        }
    }

    pub fn has_entries(&self) -> bool {
        !self.entries.is_empty()
    }
}

/// One metric per day from the earliest to the latest sale date, gaps included.
/// Empty input yields no days.
pub fn aggregate_by_day(sales: &[SaleRecord]) -> Vec<DailyMetric> {
    let (Some(start), Some(end)) = (
        sales.iter().map(|s| s.date).min(),
        sales.iter().map(|s| s.date).max(),
    ) else {
        return Vec::new();
    };

    let days: Vec<NaiveDate> = start.iter_days().take_while(|d| *d <= end).collect();
    aggregate_for_days(sales, &days)
}

/// One metric per day of `days`, in chronological order.
/// Sales dated outside the grid are ignored.
pub fn aggregate_for_days(sales: &[SaleRecord], days: &[NaiveDate]) -> Vec<DailyMetric> {
    let mut by_date: BTreeMap<NaiveDate, Vec<SaleRecord>> =
        days.iter().map(|d| (*d, Vec::new())).collect();

    for sale in sales {
        if let Some(bucket) = by_date.get_mut(&sale.date) {
            bucket.push(sale.clone());
        }
    }

    by_date
        .into_iter()
        .map(|(date, entries)| DailyMetric::from_entries(date, entries))
        .collect()
}
