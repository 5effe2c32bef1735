// Table domain model - raw rows for one metric, newest first
use super::record::Row;
use serde::Serialize;

pub const VALUE_PLACEHOLDER: &str = "-";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub date: String,
    pub url: String,
    pub metric: String,
    pub value: Option<f64>,
}

impl TableRow {
    /// Display text for the value cell.
    pub fn value_text(&self, placeholder: &str) -> String {
        match self.value {
            Some(v) => v.to_string(),
            None => placeholder.to_string(),
        }
    }
}

impl From<&Row> for TableRow {
    fn from(row: &Row) -> Self {
        Self {
            date: row.date.clone(),
            url: row.url.clone(),
            metric: row.metric.clone(),
            value: row.value,
        }
    }
}

/// Rows for `metric` (nulls included), sorted by date descending.
pub fn build_table(rows: &[Row], metric: &str) -> Vec<TableRow> {
    let mut table: Vec<TableRow> = rows
        .iter()
        .filter(|r| r.metric == metric)
        .map(TableRow::from)
        .collect();
    table.sort_by(|a, b| b.date.cmp(&a.date));
    table
}
