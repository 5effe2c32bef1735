// Domain layer - dataset shape and the pure dashboard transforms
pub mod catalog;
pub mod chart;
pub mod dashboard;
pub mod metric_info;
pub mod record;
pub mod selection;
pub mod series;
pub mod table;
