//! Report output for alarm insights: the JSON summary file and the charts.

pub mod charts;
pub mod summary;

pub use charts::render_charts;
pub use summary::write_summary;
