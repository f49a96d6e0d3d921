//! Shared types and engine logic for the Golf Club Operations Platform
//!
//! This crate contains the weather-driven demand forecasting engine: domain
//! models plus the pure computation stages (playability scoring, demand
//! prediction, alert generation, automation matching and historical
//! analytics). Everything here is deterministic and free of I/O; the backend
//! crate wires these stages to the weather provider and the database.

pub mod alerts;
pub mod analytics;
pub mod automation;
pub mod demand;
pub mod demo;
pub mod models;
pub mod scoring;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
