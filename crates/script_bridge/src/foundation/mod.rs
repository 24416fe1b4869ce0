//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the bridge:
//! - Math types and the script vector kernel
//! - Frame timing
//! - Logging utilities

pub mod math;
pub mod vector;
pub mod time;
pub mod logging;

pub use vector::{Vector, VectorError};
