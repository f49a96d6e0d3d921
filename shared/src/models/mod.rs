//! Domain models for the Golf Club Operations Platform

pub mod alert;
pub mod automation;
pub mod demand;
pub mod field;
pub mod history;
pub mod weather;

pub use alert::*;
pub use automation::*;
pub use demand::*;
pub use field::*;
pub use history::*;
pub use weather::*;
