pub mod commission;
pub mod entry;
pub mod fdi;
pub mod money;
pub mod project;
pub mod sale;
pub mod tier;
