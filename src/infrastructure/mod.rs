// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod dataset_builder;
pub mod file_dataset;
pub mod http_dataset;
pub mod report_reader;
pub mod report_urls;
