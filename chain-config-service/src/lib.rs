// Export modules for testing
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod representation;
pub mod store;
