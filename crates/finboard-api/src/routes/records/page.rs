//! History and admin pages
//!
//! A full page load re-fetches the record list from the backend.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Html;
use finboard_core::render::{render_progress, render_records_panel, DELETE_ALL_CONFIRM};
use finboard_utils::escape_html;

use super::ViewKind;
use crate::AppState;

pub async fn page_history(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    render_records_page(&state, &headers, ViewKind::History).await
}

pub async fn page_admin(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    render_records_page(&state, &headers, ViewKind::Admin).await
}

async fn render_records_page(state: &AppState, headers: &HeaderMap, kind: ViewKind) -> Html<String> {
    let fetched = match state.gateway.list().await {
        Ok(records) => Some(records),
        Err(e) => {
            log::error!("Failed to load records: {}", e);
            None
        }
    };

    let options = kind.options();
    let (query, panel) = {
        let mut table = kind.table(state).write().await;
        if let Some(records) = fetched {
            table.replace_data(records);
        }
        (table.query().to_string(), render_records_panel(&table, options))
    };

    let admin_controls = match kind {
        ViewKind::Admin => format!(
            r#"<button hx-post='/admin/categorize' hx-target='#categorize-progress' hx-swap='outerHTML'
                    class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Categorize</button>
                <button hx-post='/admin/delete-all' hx-confirm='{}' hx-target='#records-panel' hx-swap='innerHTML'
                    class='px-4 py-2 bg-red-600 text-white rounded-lg hover:bg-red-700'>Delete All</button>"#,
            DELETE_ALL_CONFIRM
        ),
        ViewKind::History => String::new(),
    };
    let progress = match kind {
        ViewKind::Admin => render_progress(
            &state.progress().await,
            state.config.progress.poll_interval_ms,
        ),
        ViewKind::History => String::new(),
    };

    let inner_content = format!(
        r#"<div class='flex items-center justify-between mb-4'>
            <h2 class='text-2xl font-bold'>{}</h2>
            <div class='flex gap-2'>
                <input type='search' name='q' value='{}' placeholder='Search...'
                    hx-get='{}/records' hx-trigger='input changed delay:200ms, search' hx-target='#records-panel' hx-swap='innerHTML'
                    class='px-4 py-2 border rounded-lg w-64'>
                {}
            </div>
        </div>
        {}
        <div id='records-panel' class='bg-white rounded-xl shadow-sm p-6 mt-4'>{}</div>"#,
        kind.title(),
        escape_html(&query),
        options.base_path,
        admin_controls,
        progress,
        panel
    );

    Html(crate::page_response(
        headers,
        kind.title(),
        options.base_path,
        &inner_content,
    ))
}
