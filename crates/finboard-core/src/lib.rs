//! Dashboard core: record models, cell formatting, table state, pagination,
//! HTML fragments, chart building and categorization progress.

pub mod charts;
pub mod error;
pub mod format;
pub mod models;
pub mod pagination;
pub mod progress;
pub mod render;
pub mod table;

pub use charts::{build_charts, DashboardCharts};
pub use error::{CoreError, CoreResult, ErrorCode, ErrorSeverity};
pub use format::Formatter;
pub use models::{
    AggregateQuery, AggregateRow, Amount, Column, DataEnvelope, ProgressSnapshot, Record, RecordId,
    RecordsPage, TransactionType,
};
pub use pagination::{paginate, PageControl};
pub use progress::{PollState, PollStep, ProgressIndicator};
pub use render::{TableView, ViewOptions};
pub use table::{filter_records, TableState};
