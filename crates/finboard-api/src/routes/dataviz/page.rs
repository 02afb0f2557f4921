//! Dataviz page rendering - chart filter form

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Html;
use finboard_config::GroupBy;
use finboard_core::TransactionType;
use finboard_utils::escape_html;

use crate::AppState;

pub async fn page_dataviz(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let dataviz = &state.config.dataviz;

    let group_options: String = GroupBy::ALL
        .iter()
        .map(|g| {
            format!(
                "<option value='{}'{}>{}</option>",
                g,
                if *g == dataviz.default_group_by { " selected" } else { "" },
                g.label()
            )
        })
        .collect();

    let type_boxes: String = TransactionType::ALL
        .iter()
        .map(|t| {
            format!(
                "<label class='flex items-center gap-1'><input type='checkbox' name='transaction_type' value='{}'>{}</label>",
                t,
                t.label()
            )
        })
        .collect();

    let source_boxes: String = dataviz
        .transaction_sources
        .iter()
        .map(|s| {
            let source = escape_html(s);
            format!(
                "<label class='flex items-center gap-1'><input type='checkbox' name='transaction_source' value='{}'>{}</label>",
                source, source
            )
        })
        .collect();

    let inner_content = format!(
        r#"<script src="https://cdn.plot.ly/plotly-2.27.0.min.js"></script>
        <div class='mb-6'><h2 class='text-2xl font-bold'>Charts</h2></div>
        <form hx-get='/dataviz/charts' hx-target='#charts' hx-swap='innerHTML'
            class='bg-white rounded-xl shadow-sm p-6 mb-6 grid grid-cols-1 md:grid-cols-2 gap-4'>
            <label class='flex flex-col text-sm text-gray-600'>Start date
                <input type='date' name='start_date' class='px-3 py-2 border rounded-lg'>
            </label>
            <label class='flex flex-col text-sm text-gray-600'>End date
                <input type='date' name='end_date' class='px-3 py-2 border rounded-lg'>
            </label>
            <label class='flex flex-col text-sm text-gray-600'>Group by
                <select name='group_by' class='px-3 py-2 border rounded-lg bg-white'>{}</select>
            </label>
            <div class='text-sm text-gray-600'>
                <p class='mb-1'>Transaction type</p>
                <div class='flex gap-3'>{}</div>
                <p class='mt-3 mb-1'>Source</p>
                <div class='flex gap-3'>{}</div>
            </div>
            <div class='md:col-span-2'>
                <button type='submit' class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Show charts</button>
            </div>
        </form>
        <div id='charts'></div>"#,
        group_options, type_boxes, source_boxes
    );

    Html(crate::page_response(&headers, "Charts", "/dataviz", &inner_content))
}
