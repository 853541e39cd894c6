use crate::domain::sale::{SaleRecord, SaleType};
use chrono::NaiveDate;
use maud::{html, Markup};

/// Entry form; pre-filled when editing an existing record.
pub fn sale_form(action: &str, today: NaiveDate, editing: Option<&SaleRecord>) -> Markup {
    let date = editing.map(|s| s.date).unwrap_or(today);
    let is_no_sale = editing.map(|s| s.is_no_sale()).unwrap_or(false);
    let sale_type = editing.map(|s| s.sale_type).unwrap_or(SaleType::Deed);
    let text = |f: fn(&SaleRecord) -> String| editing.map(f).unwrap_or_default();

    html! {
        form method="post" action=(action) class="sale-form" {
            label { "Date" input type="date" name="date" required value=(date.format("%Y-%m-%d").to_string()); }
            label {
                "Number of Tours"
                input type="number" name="number_of_tours" min="0" required
                    value=(editing.map(|s| s.number_of_tours).unwrap_or(0));
            }
            label {
                "Entry Type"
                select name="entry_type" {
                    option value="sale" selected[!is_no_sale] { "Sale" }
                    option value="no-sale" selected[is_no_sale] { "No Sale" }
                }
            }
            label { "Client Last Name" input type="text" name="client_last_name"
                value=(if is_no_sale { String::new() } else { text(|s| s.client_last_name.clone()) }); }
            label { "Lead Number" input type="text" name="lead_number" value=(text(|s| s.lead_number.clone())); }
            label { "Manager (T.O.)" input type="text" name="manager_name" value=(text(|s| s.manager_name.clone())); }
            label { "Sale Amount" input type="number" name="sale_amount" min="0" step="0.01"
                value=(text(|s| s.sale_amount.to_string())); }
            label {
                "Sale Type"
                select name="sale_type" {
                    @for t in [SaleType::Deed, SaleType::Trust] {
                        option value=(t.as_str()) selected[t == sale_type] { (t.as_str()) }
                    }
                }
            }
            label { "FDI Points Given" input type="number" name="fdi_given_points" min="0" step="0.01"
                value=(text(|s| s.fdi_given_points.to_string())); }
            label { "Cancelled" input type="checkbox" name="is_cancelled" value="on"
                checked[editing.map(|s| s.is_cancelled).unwrap_or(false)]; }
            label { "Notes" textarea name="notes" rows="3" { (text(|s| s.notes.clone())) } }
            button type="submit" class="btn" {
                @if editing.is_some() { "Update Entry" } @else { "Add Entry" }
            }
        }
    }
}
