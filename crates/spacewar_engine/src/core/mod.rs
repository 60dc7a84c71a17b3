//! # Core Engine Module
//!
//! Shared configuration types used by every subsystem.

pub mod config;

// Re-export commonly used config types
pub use config::{EngineConfig, FrameConfig, LoggingConfig, WindowConfig};
pub use crate::config::{Config, ConfigError};
