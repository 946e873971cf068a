//! Utility modules for common functionality
//!
//! This module provides logging and progress display used throughout the application.

pub mod logger;
pub(crate) mod progress;
