use maud::{html, Markup};

pub mod card;
pub mod error;
pub mod metrics;
pub mod sale_form;

pub use card::card;
pub use error::error_page;
pub use metrics::metrics_summary;
pub use sale_form::sale_form;

pub fn button(label: &str) -> Markup {
    html! {
        button type="submit" class="btn" { (label) }
    }
}
