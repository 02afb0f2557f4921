//! Cell value formatting

use finboard_config::CurrencyConfig;
use finboard_utils::format_grouped;
use serde_json::Value;

use crate::models::Column;

/// Locale-style number formatter used for table cells and search matching
#[derive(Debug, Clone, PartialEq)]
pub struct Formatter {
    decimals: usize,
    thousands_separator: String,
    decimal_separator: String,
}

impl Default for Formatter {
    /// pt-BR: "1.234,50"
    fn default() -> Self {
        Self::new(2, ".", ",")
    }
}

impl Formatter {
    pub fn new(decimals: usize, thousands_separator: &str, decimal_separator: &str) -> Self {
        Self {
            decimals,
            thousands_separator: thousands_separator.to_string(),
            decimal_separator: decimal_separator.to_string(),
        }
    }

    pub fn from_config(config: &CurrencyConfig) -> Self {
        Self::new(
            config.decimal_places as usize,
            &config.thousands_separator,
            &config.decimal_separator,
        )
    }

    /// Format any JSON value for display. Only numbers are transformed.
    pub fn format(&self, value: &Value) -> String {
        match value {
            Value::Null => String::new(),
            Value::Number(n) => match n.as_f64() {
                Some(f) => self.format_amount(f),
                None => n.to_string(),
            },
            Value::String(s) => s.clone(),
            Value::Bool(b) => b.to_string(),
            other => other.to_string(),
        }
    }

    pub fn format_amount(&self, amount: f64) -> String {
        format_grouped(
            amount,
            self.decimals,
            &self.thousands_separator,
            &self.decimal_separator,
        )
    }

    /// Table cell text; ids are shown as-is
    pub fn cell(&self, column: Column, value: &Value) -> String {
        match (column, value) {
            (Column::Id, Value::Number(n)) => n.to_string(),
            _ => self.format(value),
        }
    }
}
