//! Application trait and lifecycle management

use crate::engine::{Engine, EngineError};
use crate::events::InputEvent;
use crate::render::{RenderDevice, RenderError};
use crate::scene::SceneError;
use thiserror::Error;

/// Application lifecycle trait
///
/// Implement this trait to create your game using the engine. The application
/// passed to [`Engine::run`] is the single receiver of every input event that
/// no registered [`crate::events::EventHandler`] consumed.
pub trait Application {
    /// Initialize the application
    ///
    /// Called once before the first frame. Use this to build the initial scene.
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError>;

    /// Update the application
    ///
    /// Called every frame tick, before node velocities are integrated.
    ///
    /// # Arguments
    /// * `engine` - Mutable reference to the engine
    /// * `delta_time` - Time since last frame in seconds
    fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError>;

    /// Render the application
    ///
    /// Called after update. The default submits the scene as-is.
    fn render(
        &mut self,
        engine: &mut Engine,
        device: &mut dyn RenderDevice,
    ) -> Result<(), AppError> {
        engine.render_frame(device)?;
        Ok(())
    }

    /// Handle an input event
    ///
    /// The engine has already applied resizes to the render device and stops
    /// the loop after a [`InputEvent::CloseRequested`] has been delivered here.
    fn handle_event(&mut self, engine: &mut Engine, event: &InputEvent) -> Result<(), AppError> {
        let _ = (engine, event);
        Ok(())
    }

    /// Cleanup the application
    ///
    /// Called once after the loop ends.
    fn cleanup(&mut self, engine: &mut Engine);
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Engine error propagated to application level
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Scene graph operation failed
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// Render device failure
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Custom application error
    #[error("Application error: {0}")]
    Custom(String),
}
