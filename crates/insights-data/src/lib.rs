//! Data layer for alarm insights.
//!
//! Reads the alarm sheet from a workbook, aggregates the categorized records
//! and runs the top-level analysis pipeline.

pub mod aggregator;
pub mod analysis;
pub mod reader;

#[cfg(test)]
mod fixtures;

pub use insights_core as core;
