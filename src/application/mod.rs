// Application layer - use cases and the rendering boundary
pub mod dashboard_service;
pub mod dataset_repository;
pub mod presenter;
pub mod session;
