//! Record table routes, shared by the history and admin views

pub mod api;
pub mod page;

use std::sync::Arc;

use finboard_core::{TableState, ViewOptions};
use tokio::sync::RwLock;

use crate::AppState;

pub use api::{
    api_progress, api_records, htmx_admin_page, htmx_admin_search, htmx_categorize,
    htmx_delete_all, htmx_delete_record, htmx_edit_category, htmx_history_page,
    htmx_history_search, htmx_progress,
};
pub use page::{page_admin, page_history};

/// The two table views. They share one component and differ only in options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    History,
    Admin,
}

impl ViewKind {
    pub fn options(&self) -> ViewOptions {
        match self {
            ViewKind::History => ViewOptions::history(),
            ViewKind::Admin => ViewOptions::admin(),
        }
    }

    pub fn table<'a>(&self, state: &'a AppState) -> &'a Arc<RwLock<TableState>> {
        match self {
            ViewKind::History => &state.history,
            ViewKind::Admin => &state.admin,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ViewKind::History => "Transaction History",
            ViewKind::Admin => "Admin",
        }
    }
}
