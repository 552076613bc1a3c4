//! Core domain types for the alarm insights pipeline.
//!
//! Holds the alarm record and summary models, the keyword categorizer, the
//! shared error type, CLI settings and small formatting helpers.

pub mod categories;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;

pub use error::{InsightsError, Result};
