// Rendering boundary between the dashboard core and whatever draws it
use crate::domain::catalog::GroupedMetrics;
use crate::domain::chart::ChartView;
use crate::domain::table::TableRow;

/// A live chart owned by the presentation layer.
pub trait ChartHandle {
    /// Redraw in place. Returns `false` when the chart has to be recreated.
    fn update(&mut self, chart: &ChartView) -> bool;

    /// Free the underlying drawing resources.
    fn release(self);
}

pub trait DashboardPresenter {
    type Chart: ChartHandle;

    /// The selectable metric list is known. `grouped` excludes the
    /// trailing "Other" bucket, whose members are `ungrouped`.
    fn on_metric_catalog_ready(&mut self, grouped: &[GroupedMetrics], ungrouped: &[String]);

    fn create_chart(&mut self, chart: &ChartView) -> Self::Chart;

    fn on_selection_changed(&mut self, primary: &str, chart: &ChartView);

    /// Nothing is selected any more; the chart has been released.
    fn on_selection_cleared(&mut self) {}

    /// Rows for the primary metric only, newest first.
    fn on_table_data_ready(&mut self, metric: &str, rows: &[TableRow]);

    /// Load failures and the empty-dataset notice.
    fn on_status(&mut self, message: &str);
}
