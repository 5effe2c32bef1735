// Chart domain models - what the presentation layer draws for a selection
use super::record::Row;
use super::series::{extract_series, AxisRange, Series};
use serde::Serialize;

pub const PRIMARY_COLOR: &str = "#2563eb";
pub const SECONDARY_COLOR: &str = "#f97316";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub metric: String,
    pub axis: Axis,
    pub color: String,
    pub series: Series,
    pub range: AxisRange,
}

/// One chart: a series per selected metric, primary first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    pub primary: String,
    pub series: Vec<ChartSeries>,
}

impl ChartSeries {
    pub fn new(metric: String, axis: Axis, series: Series) -> Self {
        let color = match axis {
            Axis::Left => PRIMARY_COLOR,
            Axis::Right => SECONDARY_COLOR,
        };
        let range = series.axis_range();
        Self {
            metric,
            axis,
            color: color.to_string(),
            series,
            range,
        }
    }
}

impl ChartView {
    /// Chart for the selected metrics. Returns `None` for an empty selection.
    pub fn build(rows: &[Row], selected: &[String]) -> Option<Self> {
        let primary = selected.first()?.clone();
        let series = selected
            .iter()
            .zip([Axis::Left, Axis::Right])
            .map(|(metric, axis)| ChartSeries::new(metric.clone(), axis, extract_series(rows, metric)))
            .collect();

        Some(Self { primary, series })
    }

    pub fn is_dual(&self) -> bool {
        self.series.len() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<Row> {
        vec![
            Row::new("2024-01-02", "u", "Weight", Some(71.0)),
            Row::new("2024-01-01", "u", "Weight", Some(70.0)),
            Row::new("2024-01-01", "u", "Score", Some(80.0)),
        ]
    }

    #[test]
    fn test_build_single() {
        let chart = ChartView::build(&rows(), &["Weight".to_string()]).unwrap();
        assert_eq!(chart.primary, "Weight");
        assert!(!chart.is_dual());
        assert_eq!(chart.series[0].axis, Axis::Left);
        assert_eq!(chart.series[0].color, PRIMARY_COLOR);
        assert_eq!(chart.series[0].series.labels, vec!["2024-01-01", "2024-01-02"]);
    }

    #[test]
    fn test_build_dual_assigns_right_axis() {
        let selected = vec!["Score".to_string(), "Weight".to_string()];
        let chart = ChartView::build(&rows(), &selected).unwrap();

        assert!(chart.is_dual());
        assert_eq!(chart.primary, "Score");
        assert_eq!(chart.series[1].metric, "Weight");
        assert_eq!(chart.series[1].axis, Axis::Right);
        assert_eq!(chart.series[1].color, SECONDARY_COLOR);
        assert_eq!(chart.series[0].range, AxisRange { min: 0.0, max: 160.0 });
    }

    #[test]
    fn test_build_empty_selection() {
        assert!(ChartView::build(&rows(), &[]).is_none());
    }
}
