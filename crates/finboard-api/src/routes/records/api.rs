//! Record table fragments and JSON endpoints
//!
//! Every handler calls the backend without holding the table lock, then takes
//! the write lock to mutate and render in one step.

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::Html;
use axum::Json;
use bytes::Bytes;
use finboard_core::render::{render_progress, render_records_panel, render_table};
use finboard_core::{Formatter, ProgressIndicator, RecordId, RecordsPage, TableState, TableView};
use finboard_utils::parse_query_pairs;
use serde::Deserialize;

use super::ViewKind;
use crate::{ApiError, AppState};

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecordsQuery {
    #[serde(default)]
    pub q: String,
    pub page: Option<usize>,
}

async fn search(state: &AppState, kind: ViewKind, query: &str) -> Html<String> {
    let mut table = kind.table(state).write().await;
    table.search(query);
    Html(render_records_panel(&table, kind.options()))
}

async fn go_to_page(state: &AppState, kind: ViewKind, page: usize) -> Html<String> {
    let mut table = kind.table(state).write().await;
    table.go_to_page(page);
    Html(render_records_panel(&table, kind.options()))
}

pub async fn htmx_history_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Html<String> {
    search(&state, ViewKind::History, &params.q).await
}

pub async fn htmx_history_page(
    State(state): State<AppState>,
    Path(page): Path<usize>,
) -> Html<String> {
    go_to_page(&state, ViewKind::History, page).await
}

pub async fn htmx_admin_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Html<String> {
    search(&state, ViewKind::Admin, &params.q).await
}

pub async fn htmx_admin_page(
    State(state): State<AppState>,
    Path(page): Path<usize>,
) -> Html<String> {
    go_to_page(&state, ViewKind::Admin, page).await
}

/// Text of a header value. Browsers write XHR headers one byte per char
/// (Latin-1); other clients may send UTF-8.
fn header_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}

/// New category from the `HX-Prompt` header, or a `category` form field
fn requested_category(headers: &HeaderMap, body: &[u8]) -> Option<String> {
    if let Some(value) = headers.get("hx-prompt") {
        return Some(header_text(value.as_bytes()));
    }
    parse_query_pairs(&String::from_utf8_lossy(body))
        .into_iter()
        .find(|(key, _)| key == "category")
        .map(|(_, value)| value)
}

/// Edit one row's category and re-render only the table
pub async fn htmx_edit_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Html<String> {
    let record_id = RecordId::parse(&id);
    // htmx aborts the request when the prompt is cancelled. An empty answer
    // still arrives here and is skipped, since the backend rejects it.
    let category = requested_category(&headers, &body).filter(|c| !c.is_empty());

    let updated = match category {
        Some(category) => match state.gateway.edit_category(&record_id, &category).await {
            Ok(record) => Some(record),
            Err(e) => {
                log::error!("Failed to edit category of record {}: {}", record_id, e);
                None
            }
        },
        None => {
            log::debug!("Empty category for record {}, nothing sent", record_id);
            None
        }
    };

    let mut table = state.admin.write().await;
    if let Some(record) = updated {
        if let Err(e) = table.apply_edit(record) {
            log::warn!("Edited record is not in the cached list: {}", e);
        }
    }
    Html(render_table(&TableView::build(&table, ViewKind::Admin.options())))
}

/// Delete one row and re-render the table with its pagination
pub async fn htmx_delete_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Html<String> {
    let record_id = RecordId::parse(&id);
    let deleted = match state.gateway.delete_one(&record_id).await {
        Ok(()) => true,
        Err(e) => {
            log::error!("Failed to delete record {}: {}", record_id, e);
            false
        }
    };

    let mut table = state.admin.write().await;
    if deleted {
        if let Err(e) = table.apply_delete(&record_id) {
            log::warn!("Deleted record is not in the cached list: {}", e);
        }
    }
    Html(render_records_panel(&table, ViewKind::Admin.options()))
}

pub async fn htmx_delete_all(State(state): State<AppState>) -> Html<String> {
    let cleared = match state.gateway.delete_all().await {
        Ok(()) => true,
        Err(e) => {
            log::error!("Failed to delete all records: {}", e);
            false
        }
    };

    let mut table = state.admin.write().await;
    if cleared {
        log::info!("Deleted all {} records", table.data().len());
        table.clear();
    }
    Html(render_records_panel(&table, ViewKind::Admin.options()))
}

/// Fire the categorization job and start polling its progress
pub async fn htmx_categorize(State(state): State<AppState>) -> Html<String> {
    let gateway = state.gateway.clone();
    tokio::spawn(async move {
        if let Err(e) = gateway.trigger_categorization().await {
            log::error!("Failed to start categorization: {}", e);
        }
    });

    let indicator = state.start_progress_poll().await;
    Html(render_progress(
        &indicator,
        state.config.progress.poll_interval_ms,
    ))
}

pub async fn htmx_progress(State(state): State<AppState>) -> Html<String> {
    let indicator = state.progress().await;
    Html(render_progress(
        &indicator,
        state.config.progress.poll_interval_ms,
    ))
}

/// Page of freshly fetched records as JSON
pub async fn api_records(
    State(state): State<AppState>,
    Query(params): Query<RecordsQuery>,
) -> Result<Json<RecordsPage>, ApiError> {
    let records = state.gateway.list().await?;

    let mut table = TableState::new(
        state.config.pagination.records_per_page,
        Formatter::from_config(&state.config.currency),
    );
    table.replace_data(records);
    table.search(&params.q);
    if let Some(page) = params.page {
        table.go_to_page(page);
    }
    Ok(Json(table.to_page()))
}

pub async fn api_progress(State(state): State<AppState>) -> Json<ProgressIndicator> {
    Json(state.progress().await)
}
