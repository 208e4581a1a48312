//! Data models used throughout the application
//!
//! `records` holds the stored configuration as it is loaded from the fixture,
//! `chain` holds the shapes returned to API clients.

// Stored chain, gas price, wallet and feature records
pub mod records;

// Client-facing representations
pub mod chain;
