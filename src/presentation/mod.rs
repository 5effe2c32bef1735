// Presentation layer - headless rendering of the dashboard
pub mod console;
