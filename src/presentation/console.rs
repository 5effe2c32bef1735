// Console presenter - renders catalog, chart payloads and tables as text
use crate::application::presenter::{ChartHandle, DashboardPresenter};
use crate::domain::catalog::{GroupedMetrics, OTHER_GROUP, OTHER_ICON};
use crate::domain::chart::ChartView;
use crate::domain::table::TableRow;
use std::io::Write;

pub struct ConsolePresenter<W: Write> {
    out: W,
    placeholder: String,
    charts_created: usize,
}

/// Stand-in for a drawn chart. Redraws in place while the number of
/// series (and so the axis layout) stays the same.
#[derive(Debug)]
pub struct ConsoleChart {
    id: usize,
    series_count: usize,
}

impl<W: Write> ConsolePresenter<W> {
    pub fn new(out: W, placeholder: String) -> Self {
        Self {
            out,
            placeholder,
            charts_created: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, line: &str) {
        if let Err(e) = writeln!(self.out, "{}", line) {
            tracing::warn!("Failed to write dashboard output: {}", e);
        }
    }
}

impl ChartHandle for ConsoleChart {
    fn update(&mut self, chart: &ChartView) -> bool {
        if chart.series.len() != self.series_count {
            return false;
        }
        tracing::debug!("Chart #{} redrawn in place", self.id);
        true
    }

    fn release(self) {
        tracing::debug!("Chart #{} released", self.id);
    }
}

impl<W: Write> DashboardPresenter for ConsolePresenter<W> {
    type Chart = ConsoleChart;

    fn on_metric_catalog_ready(&mut self, grouped: &[GroupedMetrics], ungrouped: &[String]) {
        self.emit("Metrics");
        for group in grouped {
            let line = format!("  [{}] {}: {}", group.icon, group.name, group.metrics.join(", "));
            self.emit(&line);
        }
        if !ungrouped.is_empty() {
            let line = format!("  [{}] {}: {}", OTHER_ICON, OTHER_GROUP, ungrouped.join(", "));
            self.emit(&line);
        }
    }

    fn create_chart(&mut self, chart: &ChartView) -> ConsoleChart {
        self.charts_created += 1;
        tracing::debug!(
            "Chart #{} created with {} series",
            self.charts_created,
            chart.series.len()
        );
        ConsoleChart {
            id: self.charts_created,
            series_count: chart.series.len(),
        }
    }

    fn on_selection_changed(&mut self, primary: &str, chart: &ChartView) {
        match serde_json::to_string(chart) {
            Ok(json) => self.emit(&format!("Chart {}: {}", primary, json)),
            Err(e) => tracing::error!("Failed to serialize chart for {}: {}", primary, e),
        }
    }

    fn on_selection_cleared(&mut self) {
        self.emit("Chart cleared");
    }

    fn on_table_data_ready(&mut self, metric: &str, rows: &[TableRow]) {
        self.emit(&format!("Table {} ({} rows)", metric, rows.len()));
        for row in rows {
            let line = format!(
                "  {} | {} | {}",
                row.date,
                row.value_text(&self.placeholder),
                row.url
            );
            self.emit(&line);
        }
    }

    fn on_status(&mut self, message: &str) {
        self.emit(&format!("Status: {}", message));
    }
}
