//! Fact probes, one module per topic

pub mod hardware;
pub mod packages;
pub mod sensors;
pub mod system;
