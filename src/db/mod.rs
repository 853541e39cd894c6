pub mod connection;
mod decimal;
pub mod projects;
pub mod reports;
pub mod sales;
pub mod tiers;

pub use connection::{init_db, Database};
