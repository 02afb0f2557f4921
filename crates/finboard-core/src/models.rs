//! Data models shared by the gateway, the table state and the API

use finboard_config::GroupBy;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{CoreError, CoreResult};

/// Record identifier as the backend sends it: an integer key or an opaque string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl RecordId {
    /// Integer ids come back as `Int`, anything else is kept as text
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<i64>() {
            Ok(n) => RecordId::Int(n),
            Err(_) => RecordId::Text(raw.to_string()),
        }
    }

    /// JSON value used when the id takes part in search matching
    pub fn to_value(&self) -> Value {
        match self {
            RecordId::Int(n) => Value::from(*n),
            RecordId::Text(s) => Value::from(s.as_str()),
        }
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl std::str::FromStr for RecordId {
    type Err = std::convert::Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(RecordId::parse(s))
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Int(n)
    }
}

/// Table columns in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    Date,
    Description,
    Source,
    Category,
    Id,
    Value,
}

impl Column {
    /// Fixed column order, independent of the key order in the JSON payload
    pub const ORDER: [Column; 6] = [
        Column::Date,
        Column::Description,
        Column::Source,
        Column::Category,
        Column::Id,
        Column::Value,
    ];

    /// Header text, which is also the JSON field name
    pub fn name(&self) -> &'static str {
        match self {
            Column::Date => "date",
            Column::Description => "description",
            Column::Source => "source",
            Column::Category => "category",
            Column::Id => "id",
            Column::Value => "value",
        }
    }
}

/// One financial transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Display date, "DD/MM/YYYY"
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub description: String,
    /// Missing from the backend's edit response
    #[serde(default)]
    pub source: Option<String>,
    /// `None` until the record has been categorized
    #[serde(default)]
    pub category: Option<String>,
    pub id: RecordId,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub value: Option<Amount>,
}

impl Record {
    /// Raw JSON value of one column
    pub fn field(&self, column: Column) -> Value {
        match column {
            Column::Date => Value::from(self.date.as_str()),
            Column::Description => Value::from(self.description.as_str()),
            Column::Source => optional_text(&self.source),
            Column::Category => optional_text(&self.category),
            Column::Id => self.id.to_value(),
            Column::Value => self
                .value
                .as_ref()
                .map(Amount::to_value)
                .unwrap_or(Value::Null),
        }
    }

    /// Numeric amount, if the backend sent one
    pub fn amount(&self) -> Option<f64> {
        self.value.as_ref().and_then(Amount::as_f64)
    }
}

fn optional_text(value: &Option<String>) -> Value {
    match value {
        Some(s) => Value::from(s.as_str()),
        None => Value::Null,
    }
}

/// Transaction amount. Text that is not a number is kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl Amount {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Amount::Number(n) => Some(*n),
            Amount::Text(_) => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Amount::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Amount::Text(s) => Value::from(s.as_str()),
        }
    }
}

impl From<f64> for Amount {
    fn from(n: f64) -> Self {
        Amount::Number(n)
    }
}

/// Amounts arrive as JSON numbers or as numeric strings
fn deserialize_amount<'de, D>(deserializer: D) -> Result<Option<Amount>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::Number(n)) => n.as_f64().map(Amount::Number),
        Some(Value::String(s)) => Some(parse_amount(s)),
        _ => None,
    })
}

fn parse_amount(s: String) -> Amount {
    let trimmed = s.trim();
    if let Ok(n) = trimmed.parse::<f64>() {
        return Amount::Number(n);
    }
    match trimmed.replace('.', "").replace(',', ".").parse::<f64>() {
        Ok(n) => Amount::Number(n),
        Err(_) => {
            log::debug!("Keeping non-numeric amount '{}' as text", s);
            Amount::Text(s)
        }
    }
}

/// Envelope used by `/data` and `/agg_data`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: Vec<T>,
}

/// One bucket of the aggregation endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRow {
    #[serde(default)]
    pub category: Option<String>,
    /// Bucket date, "DD/MM/YYYY"
    pub date: String,
    #[serde(default)]
    pub sum: f64,
    #[serde(default)]
    pub count: u64,
}

/// Categorization job progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub current: u64,
    pub total: u64,
}

/// Transaction direction filter for the charts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Credit,
    Debit,
    Both,
}

impl TransactionType {
    pub const ALL: [TransactionType; 3] = [
        TransactionType::Credit,
        TransactionType::Debit,
        TransactionType::Both,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Credit => "Credit",
            TransactionType::Debit => "Debit",
            TransactionType::Both => "Both",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "credit" => Ok(TransactionType::Credit),
            "debit" => Ok(TransactionType::Debit),
            "both" => Ok(TransactionType::Both),
            _ => Err(CoreError::InvalidParameter {
                name: "transaction_type".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Credit => write!(f, "credit"),
            TransactionType::Debit => write!(f, "debit"),
            TransactionType::Both => write!(f, "both"),
        }
    }
}

/// Parameters of one chart request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateQuery {
    /// ISO date from the date input, "YYYY-MM-DD"
    pub start_date: String,
    pub end_date: String,
    pub group_by: GroupBy,
    pub transaction_types: Vec<TransactionType>,
    pub transaction_sources: Vec<String>,
}

impl AggregateQuery {
    /// Build from form pairs, keeping repeated `transaction_type`/`transaction_source` keys
    pub fn from_pairs(pairs: &[(String, String)]) -> CoreResult<Self> {
        let mut start_date = String::new();
        let mut end_date = String::new();
        let mut group_by = GroupBy::default();
        let mut transaction_types = Vec::new();
        let mut transaction_sources = Vec::new();

        for (key, value) in pairs {
            match key.as_str() {
                "start_date" => start_date = value.trim().to_string(),
                "end_date" => end_date = value.trim().to_string(),
                "group_by" => {
                    group_by = value.parse().map_err(|_| CoreError::InvalidParameter {
                        name: "group_by".to_string(),
                        value: value.clone(),
                    })?
                }
                "transaction_type" => transaction_types.push(value.parse()?),
                "transaction_source" => transaction_sources.push(value.clone()),
                _ => {}
            }
        }

        if start_date.is_empty() || end_date.is_empty() {
            return Err(CoreError::MissingDates);
        }
        for date in [&start_date, &end_date] {
            if chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
                return Err(CoreError::InvalidDate {
                    value: date.clone(),
                    expected: "YYYY-MM-DD".to_string(),
                });
            }
        }

        Ok(Self {
            start_date,
            end_date,
            group_by,
            transaction_types,
            transaction_sources,
        })
    }

    /// Query string pairs for `/agg_data`
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("start_date", self.start_date.clone()),
            ("end_date", self.end_date.clone()),
            ("group_by", self.group_by.to_string()),
        ];
        pairs.extend(
            self.transaction_types
                .iter()
                .map(|t| ("transaction_type", t.to_string())),
        );
        pairs.extend(
            self.transaction_sources
                .iter()
                .map(|s| ("transaction_source", s.clone())),
        );
        pairs
    }
}

/// Page of filtered records for the JSON API
#[derive(Debug, Clone, Serialize)]
pub struct RecordsPage {
    pub records: Vec<Record>,
    pub total_count: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub query: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_accepts_numeric_and_string_ids() {
        let int: Record = serde_json::from_str(
            r#"{"id": 42, "date": "01/02/2024", "description": "Coffee", "source": "checking", "category": null, "value": -12.5}"#,
        )
        .unwrap();
        assert_eq!(int.id, RecordId::Int(42));
        assert_eq!(int.amount(), Some(-12.5));
        assert_eq!(int.category, None);

        let text: Record = serde_json::from_str(r#"{"id": "a-1", "value": "1234.50"}"#).unwrap();
        assert_eq!(text.id, RecordId::Text("a-1".to_string()));
        assert_eq!(text.amount(), Some(1234.5));
        assert_eq!(text.source, None);
        assert_eq!(text.date, "");
    }

    #[test]
    fn test_record_accepts_comma_decimal_string() {
        let record: Record = serde_json::from_str(r#"{"id": 1, "value": "1.234,50"}"#).unwrap();
        assert_eq!(record.amount(), Some(1234.5));
    }

    #[test]
    fn test_non_numeric_amount_kept_as_text() {
        let record: Record = serde_json::from_str(r#"{"id": 1, "value": "n/a"}"#).unwrap();
        assert_eq!(record.value, Some(Amount::Text("n/a".to_string())));
        assert_eq!(record.amount(), None);
        assert_eq!(record.field(Column::Value), Value::from("n/a"));

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["value"], "n/a");
    }

    #[test]
    fn test_field_follows_column() {
        let record = Record {
            date: "01/02/2024".to_string(),
            description: "Rent".to_string(),
            source: None,
            category: Some("Housing".to_string()),
            id: RecordId::Int(7),
            value: Some(Amount::from(1500.0)),
        };

        assert_eq!(record.field(Column::Source), Value::Null);
        assert_eq!(record.field(Column::Category), Value::from("Housing"));
        assert_eq!(record.field(Column::Id), Value::from(7));
        assert_eq!(record.field(Column::Value).as_f64(), Some(1500.0));
    }

    #[test]
    fn test_record_id_from_path_segment() {
        assert_eq!("42".parse::<RecordId>().unwrap(), RecordId::Int(42));
        assert_eq!("abc".parse::<RecordId>().unwrap(), RecordId::Text("abc".to_string()));
        assert_eq!(RecordId::Int(42).to_string(), "42");
    }

    #[test]
    fn test_aggregate_query_from_pairs() {
        let pairs = vec![
            ("start_date".to_string(), "2024-01-01".to_string()),
            ("end_date".to_string(), "2024-03-31".to_string()),
            ("group_by".to_string(), "week".to_string()),
            ("transaction_type".to_string(), "credit".to_string()),
            ("transaction_type".to_string(), "debit".to_string()),
            ("transaction_source".to_string(), "checking".to_string()),
        ];
        let query = AggregateQuery::from_pairs(&pairs).unwrap();

        assert_eq!(query.group_by, GroupBy::Week);
        assert_eq!(
            query.transaction_types,
            vec![TransactionType::Credit, TransactionType::Debit]
        );

        let out = query.to_query_pairs();
        assert_eq!(out.iter().filter(|(k, _)| *k == "transaction_type").count(), 2);
        assert!(out.contains(&("transaction_source", "checking".to_string())));
    }

    #[test]
    fn test_aggregate_query_requires_both_dates() {
        let pairs = vec![("start_date".to_string(), "2024-01-01".to_string())];
        assert_eq!(AggregateQuery::from_pairs(&pairs), Err(CoreError::MissingDates));
    }

    #[test]
    fn test_aggregate_query_rejects_bad_values() {
        let pairs = vec![
            ("start_date".to_string(), "2024-01-01".to_string()),
            ("end_date".to_string(), "31/03/2024".to_string()),
        ];
        assert!(matches!(
            AggregateQuery::from_pairs(&pairs),
            Err(CoreError::InvalidDate { .. })
        ));

        let pairs = vec![("transaction_type".to_string(), "sideways".to_string())];
        assert!(matches!(
            AggregateQuery::from_pairs(&pairs),
            Err(CoreError::InvalidParameter { .. })
        ));
    }
}
