pub mod adapters;
pub mod config;
pub mod dashboard;
pub mod error;
