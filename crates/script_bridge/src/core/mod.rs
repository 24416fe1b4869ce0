//! # Core Module
//!
//! Shared configuration for the bridge and its reference host.
//!
//! ## Organization
//!
//! - **Config**: Per-subsystem settings loaded through [`crate::config::Config`]

pub mod config;

// Re-export commonly used config types
pub use config::{
    BridgeConfig,
    FlyCameraConfig,
    HostConfig,
    LoggingConfig,
    Config,
    ConfigError,
};
