//! Plotly figures built from aggregation rows

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::AggregateRow;

pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarTrace {
    pub x: Vec<NaiveDate>,
    pub y: Vec<f64>,
    pub name: String,
    #[serde(rename = "type")]
    pub trace_type: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieTrace {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    #[serde(rename = "type")]
    pub trace_type: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barmode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
}

/// Arguments for one `Plotly.newPlot` call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure<T> {
    pub data: Vec<T>,
    pub layout: Layout,
}

/// The four dashboard charts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardCharts {
    pub sum: Figure<BarTrace>,
    pub count: Figure<BarTrace>,
    pub sum_pie: Figure<PieTrace>,
    pub count_pie: Figure<PieTrace>,
}

struct CategorySeries {
    name: String,
    dates: Vec<NaiveDate>,
    sums: Vec<f64>,
    counts: Vec<f64>,
}

/// Group rows by category (first appearance order) into bar and pie charts.
///
/// Rows whose date is not "DD/MM/YYYY" are skipped.
pub fn build_charts(rows: &[AggregateRow], currency_symbol: &str) -> DashboardCharts {
    let mut series: Vec<CategorySeries> = Vec::new();

    for row in rows {
        let date = match NaiveDate::parse_from_str(row.date.trim(), "%d/%m/%Y") {
            Ok(date) => date,
            Err(e) => {
                log::warn!("Skipping aggregate row with date '{}': {}", row.date, e);
                continue;
            }
        };
        let name = row.category.as_deref().unwrap_or(UNCATEGORIZED);

        let index = match series.iter().position(|s| s.name == name) {
            Some(index) => index,
            None => {
                series.push(CategorySeries {
                    name: name.to_string(),
                    dates: Vec::new(),
                    sums: Vec::new(),
                    counts: Vec::new(),
                });
                series.len() - 1
            }
        };
        let entry = &mut series[index];
        entry.dates.push(date);
        entry.sums.push(row.sum);
        entry.counts.push(row.count as f64);
    }

    let labels: Vec<String> = series.iter().map(|s| s.name.clone()).collect();

    DashboardCharts {
        sum: Figure {
            data: bar_traces(&series, Measure::Sum),
            layout: bar_layout(
                "Transaction Data (Sum)",
                &format!("Amount ({})", currency_symbol),
            ),
        },
        count: Figure {
            data: bar_traces(&series, Measure::Count),
            layout: bar_layout("Transaction Data (Count)", "Transaction Count"),
        },
        sum_pie: Figure {
            data: vec![PieTrace {
                labels: labels.clone(),
                values: series
                    .iter()
                    .map(|s| s.sums.iter().map(|v| v.abs()).sum())
                    .collect(),
                trace_type: "pie",
            }],
            layout: pie_layout("Total Sum Per Category"),
        },
        count_pie: Figure {
            data: vec![PieTrace {
                labels,
                values: series.iter().map(|s| s.counts.iter().sum()).collect(),
                trace_type: "pie",
            }],
            layout: pie_layout("Total Count Per Category"),
        },
    }
}

#[derive(Clone, Copy)]
enum Measure {
    Sum,
    Count,
}

fn bar_traces(series: &[CategorySeries], measure: Measure) -> Vec<BarTrace> {
    series
        .iter()
        .map(|s| BarTrace {
            x: s.dates.clone(),
            y: match measure {
                Measure::Sum => s.sums.clone(),
                Measure::Count => s.counts.clone(),
            },
            name: s.name.clone(),
            trace_type: "bar",
        })
        .collect()
}

fn bar_layout(title: &str, y_title: &str) -> Layout {
    Layout {
        title: title.to_string(),
        barmode: Some("group"),
        xaxis: Some(Axis {
            title: "Date".to_string(),
        }),
        yaxis: Some(Axis {
            title: y_title.to_string(),
        }),
    }
}

fn pie_layout(title: &str) -> Layout {
    Layout {
        title: title.to_string(),
        barmode: None,
        xaxis: None,
        yaxis: None,
    }
}
