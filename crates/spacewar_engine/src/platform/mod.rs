//! Window host abstraction
//!
//! The engine never talks to an OS windowing API directly. A [`WindowHost`]
//! owns the window and its message queue and hands the engine one raw
//! [`PlatformMessage`] at a time; the [`crate::input::InputRouter`] turns those
//! into typed events.

mod headless;

pub use headless::{HeadlessWindow, ScriptStep};

use crate::input::{KeyCode, MouseButton};
use std::time::Duration;
use thiserror::Error;

/// Why a window changed size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeKind {
    /// Normal resize or restore from minimised/maximised
    Restored,
    /// Window was minimised; the surface has no area
    Minimized,
    /// Window was maximised
    Maximized,
}

/// Raw message from the host's message queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformMessage {
    /// The window was destroyed; the application should quit
    Destroy,
    /// A mouse button changed state
    MouseButton {
        /// Button that changed
        button: MouseButton,
        /// Cursor X in client pixels
        x: i32,
        /// Cursor Y in client pixels
        y: i32,
        /// `true` on press
        pressed: bool,
    },
    /// The cursor moved
    MouseMove {
        /// Cursor X in client pixels
        x: i32,
        /// Cursor Y in client pixels
        y: i32,
    },
    /// A key changed state; OS auto-repeat arrives as repeated presses
    Key {
        /// Key that changed
        key: KeyCode,
        /// `true` on press
        pressed: bool,
    },
    /// The client area changed size
    Size {
        /// Kind of size change
        kind: SizeKind,
        /// New client width
        width: u32,
        /// New client height
        height: u32,
    },
}

/// Window host errors
#[derive(Error, Debug)]
pub enum PlatformError {
    /// The window could not be created
    #[error("window creation failed: {0}")]
    CreationFailed(String),

    /// The host stopped delivering messages
    #[error("window host lost: {0}")]
    HostLost(String),
}

/// Owner of the OS window and its message queue
pub trait WindowHost {
    /// Return the next pending message, waiting at most `timeout` for one
    ///
    /// `Ok(None)` means the queue stayed empty, which is the engine's cue to
    /// run a frame.
    fn poll_event(&mut self, timeout: Duration) -> Result<Option<PlatformMessage>, PlatformError>;

    /// Current drawable size in pixels
    fn surface_size(&self) -> (u32, u32);
}
