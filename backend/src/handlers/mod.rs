//! HTTP request handlers

pub mod health;
pub mod weather;

pub use health::health_check;
