//! Settings page rendering - Full page endpoints

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Html;
use finboard_utils::escape_html;

use crate::AppState;

fn setting(label: &str, value: &str) -> String {
    format!(
        "<div><p class='text-sm text-gray-500'>{}</p><p class='font-medium'>{}</p></div>",
        label,
        escape_html(value)
    )
}

fn section(title: &str, items: &[String]) -> String {
    format!(
        r#"<div class='bg-white rounded-xl shadow-sm p-6 mb-6'>
            <h3 class='text-lg font-semibold mb-4'>{}</h3>
            <div class='grid grid-cols-2 gap-4'>{}</div>
        </div>"#,
        title,
        items.concat()
    )
}

pub async fn page_settings(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let config = &state.config;

    let sections = [
        section(
            "Server",
            &[
                setting("Host", &config.server.host),
                setting("Port", &config.server.port.to_string()),
            ],
        ),
        section("Backend", &[setting("Backend URL", &config.backend.base_url)]),
        section(
            "Records",
            &[
                setting(
                    "Records per page",
                    &config.pagination.records_per_page.to_string(),
                ),
                setting(
                    "Progress poll interval",
                    &format!("{} ms", config.progress.poll_interval_ms),
                ),
            ],
        ),
        section(
            "Currency",
            &[
                setting("Symbol", &config.currency.symbol),
                setting(
                    "Decimal places",
                    &config.currency.decimal_places.to_string(),
                ),
                setting(
                    "Thousands separator",
                    &format!("'{}'", config.currency.thousands_separator),
                ),
                setting(
                    "Decimal separator",
                    &format!("'{}'", config.currency.decimal_separator),
                ),
            ],
        ),
        section(
            "Charts",
            &[
                setting("Default grouping", config.dataviz.default_group_by.label()),
                setting("Sources", &config.dataviz.transaction_sources.join(", ")),
            ],
        ),
        section("Logging", &[setting("Level", &config.logging.level)]),
    ];

    let inner_content = format!(
        "<div class='mb-6'><h2 class='text-2xl font-bold'>Settings</h2></div>{}",
        sections.concat()
    );

    Html(crate::page_response(&headers, "Settings", "/settings", &inner_content))
}
