//! # Space War Engine
//!
//! Game skeleton for Space War: a scene graph of nodes with exclusive
//! parent/child ownership, typed input routing and a poll-or-tick frame loop
//! over pluggable window hosts and render devices.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use spacewar_engine::prelude::*;
//!
//! struct MyGame;
//!
//! impl Application for MyGame {
//!     fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
//!         let ship = engine.scene_mut().create_node();
//!         engine.scene_mut().set_velocity(ship, Vec3::new(1.0, 0.0, 0.0))?;
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, _engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
//!         Ok(())
//!     }
//!
//!     fn cleanup(&mut self, _engine: &mut Engine) {}
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig::default();
//!     let mut window = HeadlessWindow::new(&config.window)?;
//!     let mut device = HeadlessDevice::new(config.window.width, config.window.height);
//!     Engine::run(config, &mut window, &mut device, &mut MyGame)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod core;

pub mod foundation;
pub mod config;
pub mod scene;
pub mod events;
pub mod input;
pub mod platform;
pub mod render;

mod application;
mod engine;

pub use application::{Application, AppError};
pub use engine::{Engine, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Application, AppError,
        Engine, EngineError,
        foundation::math::{Vec3, Mat4, Quat, Transform},
        scene::{SceneGraph, NodeId, Renderable, SharedRenderable, MeshId, MaterialId, SceneError},
        events::{InputEvent, KeyboardEvent, MouseEvent, EventHandler, EventKind},
        input::{KeyCode, MouseButton, Modifiers, KeyBinding},
        platform::{WindowHost, HeadlessWindow, ScriptStep, PlatformMessage},
        render::{RenderDevice, HeadlessDevice, FrameStats},
        core::{Config, EngineConfig},
    };
}
