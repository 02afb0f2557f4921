//! Dataviz routes - Aggregate charts

pub mod api;
pub mod page;

pub use api::{api_charts, htmx_charts};
pub use page::page_dataviz;
