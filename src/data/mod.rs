//! Data structures for bsdfetch

pub mod report;
pub mod variant;

pub use report::{Report, ReportLine};
pub use variant::{OsVariant, TemperatureSource, VariantPolicy};
