use crate::reports::{format_currency, MonthlyTotals};
use maud::{html, Markup};

/// Summary strip shown above daily and monthly tables.
pub fn metrics_summary(totals: &MonthlyTotals) -> Markup {
    html! {
        div class="metrics" {
            (metric("Total Volume", format_currency(totals.total_volume)))
            (metric("Total Commission", format_currency(totals.total_commission)))
            (metric("Sales", totals.total_sales.to_string()))
            (metric("Tours", totals.total_tours.to_string()))
            (metric("VPG", format_currency(totals.vpg)))
        }
    }
}

fn metric(label: &str, value: String) -> Markup {
    html! {
        div class="metric" {
            span class="metric-label" { (label) }
            strong class="metric-value" { (value) }
        }
    }
}
