//! # Engine Configuration
//!
//! Settings for the window host, the frame loop and logging. Every section
//! has serde defaults, so a config file only needs the keys it changes:
//!
//! ```toml
//! [window]
//! title = "Space War Supreme"
//! width = 1920
//! height = 1080
//!
//! [frame]
//! idle_timeout_ms = 16
//! ```

use crate::config::Config;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Top-level engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    /// Window configuration
    pub window: WindowConfig,
    /// Frame loop configuration
    pub frame: FrameConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Config for EngineConfig {}

/// Window configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Client area width
    pub width: u32,
    /// Client area height
    pub height: u32,
    /// Whether window is resizable
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Space War Supreme".to_string(),
            width: 1280,
            height: 720,
            resizable: true,
        }
    }
}

/// Frame loop configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// How long to wait for a window message before running a frame
    pub idle_timeout_ms: u64,
    /// Upper bound on the simulated time step after a stall
    pub max_delta_ms: u64,
    /// Run the simulation with this constant step instead of wall-clock time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_delta_ms: Option<u64>,
    /// RGBA colour the back buffer is cleared to
    pub clear_color: [f32; 4],
}

impl FrameConfig {
    /// Idle timeout as a duration
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_timeout_ms)
    }

    /// Maximum frame delta as a duration
    pub fn max_delta(&self) -> Duration {
        Duration::from_millis(self.max_delta_ms)
    }

    /// Fixed simulation step, if configured
    pub fn fixed_delta(&self) -> Option<Duration> {
        self.fixed_delta_ms.map(Duration::from_millis)
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            idle_timeout_ms: 30,
            max_delta_ms: 250,
            fixed_delta_ms: None,
            clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset, e.g. `info` or `spacewar_engine=debug`
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
