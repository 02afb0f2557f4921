//! HTML fragments for the record table, its pagination bar and the progress bar
//!
//! Element ids targeted by HTMX:
//! - `#records-panel`: table plus pagination, swapped on search, page change and delete
//! - `#records-table`: table only, swapped after an edit
//! - `#categorize-progress`: progress bar, polls itself while a job runs

use finboard_utils::{encode_component, escape_html};

use crate::models::{Column, RecordId};
use crate::pagination::{paginate, PageControl};
use crate::progress::ProgressIndicator;
use crate::table::TableState;

pub const EMPTY_MESSAGE: &str = "No matching records found.";
pub const EDIT_PROMPT: &str = "Enter new category:";
pub const DELETE_CONFIRM: &str = "Are you sure you want to delete this row?";
pub const DELETE_ALL_CONFIRM: &str =
    "Are you sure you want to delete all transactions? This action cannot be undone.";

/// Which row actions a view offers, and where its fragment routes live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    pub allow_edit: bool,
    pub allow_delete: bool,
    pub base_path: &'static str,
}

impl ViewOptions {
    /// Read-only listing
    pub fn history() -> Self {
        Self {
            allow_edit: false,
            allow_delete: false,
            base_path: "/history",
        }
    }

    pub fn admin() -> Self {
        Self {
            allow_edit: true,
            allow_delete: true,
            base_path: "/admin",
        }
    }

    pub fn has_actions(&self) -> bool {
        self.allow_edit || self.allow_delete
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub id: RecordId,
    pub cells: Vec<String>,
}

/// Display-ready table: header names, formatted rows and action flags
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub headers: Vec<&'static str>,
    pub rows: Vec<RowView>,
    pub options: ViewOptions,
}

impl TableView {
    pub fn build(state: &TableState, options: ViewOptions) -> Self {
        let formatter = state.formatter();
        let rows = state
            .page_slice()
            .iter()
            .map(|record| RowView {
                id: record.id.clone(),
                cells: Column::ORDER
                    .iter()
                    .map(|column| formatter.cell(*column, &record.field(*column)))
                    .collect(),
            })
            .collect();

        let mut headers: Vec<&'static str> = Column::ORDER.iter().map(|c| c.name()).collect();
        if options.has_actions() {
            headers.push("Actions");
        }

        Self {
            headers,
            rows,
            options,
        }
    }

    /// Width of the "no records" row
    pub fn colspan(&self) -> usize {
        self.headers.len()
    }
}

pub fn render_table(view: &TableView) -> String {
    let mut html = String::from(
        r#"<table class='min-w-full divide-y divide-gray-200 text-sm'>
            <thead class='bg-gray-50'><tr>"#,
    );
    for header in &view.headers {
        html.push_str(&format!(
            "<th class='px-4 py-2 text-left font-medium text-gray-600'>{}</th>",
            header
        ));
    }
    html.push_str("</tr></thead><tbody class='divide-y divide-gray-100'>");

    if view.rows.is_empty() {
        html.push_str(&format!(
            "<tr><td colspan='{}' class='px-4 py-6 text-center text-gray-500'>{}</td></tr>",
            view.colspan(),
            EMPTY_MESSAGE
        ));
    }

    for row in &view.rows {
        html.push_str("<tr class='hover:bg-gray-50'>");
        for cell in &row.cells {
            html.push_str(&format!("<td class='px-4 py-2'>{}</td>", escape_html(cell)));
        }
        if view.options.has_actions() {
            html.push_str(&render_actions(&row.id, &view.options));
        }
        html.push_str("</tr>");
    }

    html.push_str("</tbody></table>");
    html
}

fn render_actions(id: &RecordId, options: &ViewOptions) -> String {
    let record_path = format!(
        "{}/records/{}",
        options.base_path,
        encode_component(&id.to_string())
    );
    let mut html = String::from("<td class='px-4 py-2 whitespace-nowrap'>");
    if options.allow_edit {
        html.push_str(&format!(
            r#"<button hx-post='{}/category' hx-prompt='{}' hx-target='#records-table' hx-swap='innerHTML'
                class='px-3 py-1 mr-2 text-indigo-600 border border-indigo-200 rounded hover:bg-indigo-50'>Edit</button>"#,
            escape_html(&record_path),
            EDIT_PROMPT
        ));
    }
    if options.allow_delete {
        html.push_str(&format!(
            r#"<button hx-delete='{}' hx-confirm='{}' hx-target='#records-panel' hx-swap='innerHTML'
                class='px-3 py-1 text-red-600 border border-red-200 rounded hover:bg-red-50'>Delete</button>"#,
            escape_html(&record_path),
            DELETE_CONFIRM
        ));
    }
    html.push_str("</td>");
    html
}

/// Pagination bar, empty when everything fits on one page
pub fn render_pagination(state: &TableState, options: &ViewOptions) -> String {
    let controls = paginate(
        state.filtered().len(),
        state.rows_per_page(),
        state.current_page(),
    );
    if controls.is_empty() {
        return String::new();
    }

    let current = state.current_page();
    let page_button = |page: usize, label: &str, disabled: bool, active: bool| {
        let style = if active {
            "bg-indigo-600 text-white border-indigo-600"
        } else if disabled {
            "text-gray-400 cursor-not-allowed"
        } else {
            "hover:bg-gray-100"
        };
        let disabled_attr = if disabled { " disabled" } else { "" };
        format!(
            r#"<button hx-get='{}/page/{}' hx-target='#records-panel' hx-swap='innerHTML'{} class='px-3 py-1 border rounded {}'>{}</button>"#,
            options.base_path, page, disabled_attr, style, label
        )
    };

    let mut html = String::from("<div class='flex items-center justify-center gap-1 mt-4'>");
    for control in controls {
        let button = match control {
            PageControl::Previous { disabled } => {
                page_button(current.saturating_sub(1).max(1), "Previous", disabled, false)
            }
            PageControl::Page { number, active } => {
                page_button(number, &number.to_string(), active, active)
            }
            PageControl::Ellipsis => "<span class='px-2 text-gray-400'>...</span>".to_string(),
            PageControl::Next { disabled } => page_button(current + 1, "Next", disabled, false),
        };
        html.push_str(&button);
    }
    html.push_str("</div>");
    html
}

/// Inner content of `#records-panel`
pub fn render_records_panel(state: &TableState, options: ViewOptions) -> String {
    let view = TableView::build(state, options);
    format!(
        r#"<div id='records-table' class='overflow-x-auto'>{}</div>
        <div id='records-pagination'>{}</div>"#,
        render_table(&view),
        render_pagination(state, &options)
    )
}

/// Progress bar element. While polling it re-requests itself every `interval_ms`.
pub fn render_progress(indicator: &ProgressIndicator, interval_ms: u64) -> String {
    let trigger = if indicator.is_polling() {
        format!(
            " hx-get='/admin/progress' hx-trigger='every {}ms' hx-swap='outerHTML'",
            interval_ms
        )
    } else {
        String::new()
    };
    let hidden = if indicator.visible { "" } else { " hidden" };

    format!(
        r#"<div id='categorize-progress'{} class='w-full mt-4{}'>
            <div class='w-full bg-gray-200 rounded-full h-4'>
                <div class='bg-indigo-600 h-4 rounded-full text-xs text-white text-center leading-4' style='width: {:.0}%'>{}</div>
            </div>
        </div>"#,
        trigger,
        hidden,
        indicator.percent,
        indicator.label()
    )
}
