//! Utility modules: build info, logging setup, JSON persistence.

pub mod build_info;
pub mod logging;
pub mod persistence;

pub use build_info::{version_line, BUILD_COMMIT, BUILD_DATE};
