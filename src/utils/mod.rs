//! Utility functions for bsdfetch

pub mod command;
pub mod file;
pub mod parsing;
