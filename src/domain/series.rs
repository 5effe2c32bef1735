// Series domain model - chartable per-metric time series
use super::record::Row;
use serde::Serialize;

const RANGE_PADDING: f64 = 0.15;

/// Dates and values for one metric, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Series {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Suggested axis bounds for a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl Series {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn axis_range(&self) -> AxisRange {
        compute_axis_range(&self.values)
    }
}

/// Non-null rows for `metric`, sorted by date ascending.
///
/// Dates compare as plain strings, which only orders correctly for
/// fixed-width `YYYY-MM-DD` keys. Rows sharing a date keep source order.
pub fn extract_series(rows: &[Row], metric: &str) -> Series {
    let mut points: Vec<(&str, f64)> = rows
        .iter()
        .filter(|r| r.metric == metric)
        .filter_map(|r| r.value.map(|v| (r.date.as_str(), v)))
        .collect();
    points.sort_by(|a, b| a.0.cmp(b.0));

    let (labels, values) = points
        .into_iter()
        .map(|(date, value)| (date.to_string(), value))
        .unzip();
    Series { labels, values }
}

/// Min/max padded by 15% of the spread. A flat series is padded by its own
/// magnitude (or 1 around zero) so the plot never collapses to a line.
pub fn compute_axis_range(values: &[f64]) -> AxisRange {
    let (min_v, max_v) = if values.is_empty() {
        (0.0, 0.0)
    } else {
        values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    };

    let range = max_v - min_v;
    let pad = if range == 0.0 {
        if min_v == 0.0 { 1.0 } else { min_v.abs() }
    } else {
        range * RANGE_PADDING
    };

    AxisRange {
        min: min_v - pad,
        max: max_v + pad,
    }
}
