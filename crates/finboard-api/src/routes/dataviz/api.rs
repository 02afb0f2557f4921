//! Chart fragment and JSON endpoint

use axum::extract::{RawQuery, State};
use axum::response::Html;
use axum::Json;
use finboard_core::charts::Figure;
use finboard_core::{build_charts, AggregateQuery, DashboardCharts};
use finboard_utils::{escape_html, parse_query_pairs};
use serde::Serialize;

use crate::{ApiError, AppState};

fn parse_query(raw: Option<String>) -> Result<AggregateQuery, finboard_core::CoreError> {
    AggregateQuery::from_pairs(&parse_query_pairs(raw.as_deref().unwrap_or_default()))
}

/// JSON safe to inline in a `<script>` element
fn script_json<T: Serialize>(value: &T) -> String {
    match serde_json::to_string(value) {
        Ok(json) => json.replace("</", "<\\/"),
        Err(e) => {
            log::error!("Failed to serialize chart: {}", e);
            "null".to_string()
        }
    }
}

fn plot_call<T: Serialize>(element_id: &str, figure: &Figure<T>) -> String {
    format!(
        "Plotly.newPlot('{}', {}, {});",
        element_id,
        script_json(&figure.data),
        script_json(&figure.layout)
    )
}

pub fn render_charts(charts: &DashboardCharts) -> String {
    format!(
        r#"<div class='grid grid-cols-1 lg:grid-cols-2 gap-6'>
            <div id='chart-sum' class='bg-white rounded-xl shadow-sm p-4'></div>
            <div id='chart-count' class='bg-white rounded-xl shadow-sm p-4'></div>
            <div id='chart-sum-pie' class='bg-white rounded-xl shadow-sm p-4'></div>
            <div id='chart-count-pie' class='bg-white rounded-xl shadow-sm p-4'></div>
        </div>
        <script>
        {}
        {}
        {}
        {}
        </script>"#,
        plot_call("chart-sum", &charts.sum),
        plot_call("chart-count", &charts.count),
        plot_call("chart-sum-pie", &charts.sum_pie),
        plot_call("chart-count-pie", &charts.count_pie)
    )
}

pub async fn htmx_charts(State(state): State<AppState>, RawQuery(raw): RawQuery) -> Html<String> {
    let query = match parse_query(raw) {
        Ok(query) => query,
        Err(e) => {
            log::debug!("Rejected chart request: {}", e);
            return Html(format!(
                "<p class='text-red-600'>{}</p>",
                escape_html(&e.to_string())
            ));
        }
    };

    match state.gateway.aggregates(&query).await {
        Ok(rows) => Html(render_charts(&build_charts(
            &rows,
            &state.config.currency.symbol,
        ))),
        Err(e) => {
            log::error!("Failed to load aggregates: {}", e);
            Html(String::new())
        }
    }
}

pub async fn api_charts(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Json<DashboardCharts>, ApiError> {
    let query = parse_query(raw)?;
    let rows = state.gateway.aggregates(&query).await?;
    Ok(Json(build_charts(&rows, &state.config.currency.symbol)))
}

#[cfg(test)]
mod tests {
    use crate::tests::{get, send, test_state, FakeGateway};
    use axum::http::StatusCode;
    use finboard_config::GroupBy;
    use finboard_core::TransactionType;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_missing_dates_message() {
        let gateway = Arc::new(FakeGateway::default());
        let state = test_state(gateway.clone());

        let (_, body) = send(&state, get("/dataviz/charts?start_date=2024-01-01&end_date=")).await;
        assert!(body.contains("Please select both start and end dates."));
        assert!(gateway.aggregate_queries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_charts_fragment() {
        let gateway = Arc::new(FakeGateway::default());
        let state = test_state(gateway.clone());

        let uri = "/dataviz/charts?start_date=2024-01-01&end_date=2024-02-29&group_by=trimester\
                   &transaction_type=credit&transaction_type=debit&transaction_source=checking";
        let (_, body) = send(&state, get(uri)).await;

        assert!(body.contains("Plotly.newPlot('chart-sum', [{"));
        assert!(body.contains("\"name\":\"Uncategorized\""));
        assert!(body.contains("Total Count Per Category"));

        let queries = gateway.aggregate_queries.lock().unwrap();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].group_by, GroupBy::Trimester);
        assert_eq!(
            queries[0].transaction_types,
            vec![TransactionType::Credit, TransactionType::Debit]
        );
        assert_eq!(queries[0].transaction_sources, vec!["checking".to_string()]);
    }

    #[tokio::test]
    async fn test_api_charts_json() {
        let state = test_state(Arc::new(FakeGateway::default()));

        let (status, body) = send(&state, get("/api/charts?group_by=month")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["details"]["code"], "MISSING_DATES");
        assert_eq!(json["details"]["severity"], "warning");

        let (status, body) = send(
            &state,
            get("/api/charts?start_date=2024-01-01&end_date=2024-03-31&group_by=fortnight"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["details"]["code"], "INVALID_PARAMETER");
        assert_eq!(json["details"]["parameter"], "group_by");

        let (status, body) = send(&state, get("/api/charts?start_date=2024-01-01&end_date=2024-03-31")).await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["sum_pie"]["data"][0]["values"][0], 120.0);
        assert_eq!(json["count"]["layout"]["yaxis"]["title"], "Transaction Count");
    }

    #[tokio::test]
    async fn test_dataviz_form_options() {
        let state = test_state(Arc::new(FakeGateway::default()));
        let (_, body) = send(&state, get("/dataviz")).await;

        assert!(body.contains("<option value='month' selected>Month</option>"));
        assert!(body.contains("name='transaction_type' value='both'"));
        assert!(body.contains("name='transaction_source' value='credit_card'"));
        assert!(body.contains("hx-get='/dataviz/charts'"));
    }
}
