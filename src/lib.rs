// Body-composition dashboard core: dataset loading, metric catalog,
// chart series, raw-data table and the metric selection state machine.
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
