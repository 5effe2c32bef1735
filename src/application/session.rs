// Dashboard session - owns the live selection and the rendered chart
use crate::application::dashboard_service::{DashboardError, DashboardService};
use crate::application::presenter::{ChartHandle, DashboardPresenter};
use crate::domain::dashboard::Dashboard;
use crate::domain::metric_info::{MetricDescription, MetricDescriptions};
use crate::domain::selection::{toggle, SelectionChange, SelectionMode, SelectionState};

pub struct DashboardSession<P: DashboardPresenter> {
    dashboard: Dashboard,
    selection: SelectionState,
    descriptions: MetricDescriptions,
    presenter: P,
    chart: Option<P::Chart>,
}

impl<P: DashboardPresenter> DashboardSession<P> {
    /// Load the dataset and announce the metric catalog. Failures are
    /// reported to the presenter as a status line before being returned.
    pub async fn open(
        service: &DashboardService,
        mut presenter: P,
        mode: SelectionMode,
    ) -> Result<Self, DashboardError> {
        match service.load_dashboard().await {
            Ok(dashboard) => {
                let descriptions = service.metrics_config().metric_descriptions();
                Ok(Self::new(dashboard, descriptions, presenter, mode))
            }
            Err(e) => {
                presenter.on_status(&e.status_message());
                Err(e)
            }
        }
    }

    pub fn new(
        dashboard: Dashboard,
        descriptions: MetricDescriptions,
        mut presenter: P,
        mode: SelectionMode,
    ) -> Self {
        let catalog = dashboard.catalog();
        presenter.on_metric_catalog_ready(&catalog.groups, &catalog.ungrouped);

        Self {
            dashboard,
            selection: SelectionState::new(mode),
            descriptions,
            presenter,
            chart: None,
        }
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn describe_metric(&self, metric: &str) -> Option<&MetricDescription> {
        self.descriptions.get(metric)
    }

    pub fn description_text(&self, metric: &str) -> &str {
        self.descriptions.description_or_fallback(metric)
    }

    /// Single entry point for a click on a metric. Returns `None` when the
    /// click was ignored.
    pub fn select(&mut self, metric: &str) -> Option<SelectionChange> {
        if !self.dashboard.catalog().contains(metric) {
            tracing::warn!("Ignoring selection of unknown metric {}", metric);
            return None;
        }

        match toggle(metric, &self.selection) {
            Ok((next, change)) => {
                tracing::debug!(
                    "Selection {:?} on {}: {:?} -> {:?}",
                    change,
                    metric,
                    self.selection.selected(),
                    next.selected()
                );
                self.selection = next;
                self.render();
                Some(change)
            }
            Err(e) => {
                tracing::error!("Selection state inconsistent, ignoring {}: {}", metric, e);
                None
            }
        }
    }

    /// Switch mode. Any change of mode clears the selection.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        if mode == self.selection.mode() {
            return;
        }
        tracing::debug!("Selection mode {:?} -> {:?}", self.selection.mode(), mode);
        self.selection = self.selection.with_mode(mode);
        self.render();
    }

    pub fn toggle_mode(&mut self) {
        self.set_mode(self.selection.mode().toggled());
    }

    fn render(&mut self) {
        let Some(view) = self.dashboard.chart(self.selection.selected()) else {
            self.release_chart();
            self.presenter.on_selection_cleared();
            return;
        };

        let updated = self.chart.as_mut().is_some_and(|chart| chart.update(&view));
        if !updated {
            self.release_chart();
            tracing::debug!("Creating chart for {} series", view.series.len());
            self.chart = Some(self.presenter.create_chart(&view));
        }

        self.presenter.on_selection_changed(&view.primary, &view);
        let table = self.dashboard.table(&view.primary);
        self.presenter.on_table_data_ready(&view.primary, &table);
    }

    fn release_chart(&mut self) {
        if let Some(chart) = self.chart.take() {
            chart.release();
        }
    }
}

impl<P: DashboardPresenter> Drop for DashboardSession<P> {
    fn drop(&mut self) {
        self.release_chart();
    }
}
