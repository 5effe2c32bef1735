// Dashboard domain model - the loaded dataset in its cached, flat form
use super::catalog::MetricCatalog;
use super::chart::ChartView;
use super::record::Row;
use super::series::{extract_series, Series};
use super::table::{build_table, TableRow};

#[derive(Debug, Clone)]
pub struct Dashboard {
    rows: Vec<Row>,
    catalog: MetricCatalog,
}

impl Dashboard {
    pub fn new(rows: Vec<Row>, catalog: MetricCatalog) -> Self {
        Self { rows, catalog }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn catalog(&self) -> &MetricCatalog {
        &self.catalog
    }

    pub fn series(&self, metric: &str) -> Series {
        extract_series(&self.rows, metric)
    }

    pub fn table(&self, metric: &str) -> Vec<TableRow> {
        build_table(&self.rows, metric)
    }

    pub fn chart(&self, selected: &[String]) -> Option<ChartView> {
        ChartView::build(&self.rows, selected)
    }
}
