use crate::domain::sale::SaleRecord;
use crate::reports::{format_currency, format_percent};
use crate::templates::{desktop_layout, sale_form};
use chrono::NaiveDate;
use maud::{html, Markup};

pub fn sale_edit_page(sale: &SaleRecord, today: NaiveDate) -> Markup {
    desktop_layout(
        "Edit Entry",
        html! {
            main class="container" {
                h1 { "Edit Entry" }
                p {
                    "Recorded commission: " strong { (format_percent(sale.commission_percentage)) }
                    " • FDI available: " (format!("{:.2}", sale.fdi_points))
                    " • FDI cost: " (format_currency(sale.fdi_cost))
                }
                (sale_form(&format!("/sales/{}", sale.id), today, Some(sale)))
            }
        },
    )
}
