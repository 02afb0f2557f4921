//! Upload routes - Transaction file ingestion

pub mod api;
pub mod page;

pub use api::htmx_upload;
pub use page::page_upload;
