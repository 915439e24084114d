//! Shared utilities for Sofa binaries.

pub mod logger;
pub mod time;
