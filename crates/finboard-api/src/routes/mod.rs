//! Route modules for the dashboard server
//!
//! - records: history and admin tables, row edit/delete, categorization
//! - upload: transaction file upload
//! - dataviz: aggregate charts
//! - settings: configuration display
//!
//! Each module has the same layout:
//! - mod.rs: module declaration and exports
//! - api.rs: HTMX fragments and JSON endpoints
//! - page.rs: full page rendering

pub mod dataviz;
pub mod records;
pub mod settings;
pub mod upload;
