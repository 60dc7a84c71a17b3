//! Core engine implementation

use crate::{
    application::Application,
    config::ConfigError,
    core::config::EngineConfig,
    events::{EventQueue, InputEvent},
    foundation::time::Timer,
    input::{InputRouter, InputState},
    platform::{PlatformError, PlatformMessage, WindowHost},
    render::{ClearColor, FrameRenderer, FrameStats, RenderDevice, RenderError},
    scene::{renderable_channel, RenderableInbox, RenderableSender, SceneGraph},
};
use thiserror::Error;

/// Main engine struct
///
/// Owns the scene and drives the frame loop: poll the window host with a
/// timeout, route any message to the application, and when the queue is
/// empty run one frame tick (update, simulate, render).
pub struct Engine {
    /// Scene graph holding every game object
    scene: SceneGraph,

    /// Platform message translation
    input: InputRouter,

    /// Pending events and registered handlers
    events: EventQueue,

    /// Scene submission to the device
    renderer: FrameRenderer,

    /// Renderables delivered from loader threads
    inbox: RenderableInbox,
    loader: RenderableSender,

    /// Frame timing
    timer: Timer,

    /// Engine configuration
    config: EngineConfig,

    /// Whether the engine should continue running
    running: bool,

    /// The window host reported a close; the loop ends after delivery
    closing: bool,

    last_frame: FrameStats,
}

impl Engine {
    /// Create a new engine instance
    pub fn new(config: EngineConfig) -> Self {
        log::info!("Initializing engine...");

        let (loader, inbox) = renderable_channel();
        let renderer = FrameRenderer::new(
            ClearColor(config.frame.clear_color),
            config.window.width,
            config.window.height,
        );

        Self {
            scene: SceneGraph::new(),
            input: InputRouter::new(),
            events: EventQueue::new(),
            renderer,
            inbox,
            loader,
            timer: Timer::new(config.frame.max_delta()),
            config,
            running: true,
            closing: false,
            last_frame: FrameStats::default(),
        }
    }

    /// Run the engine main loop with the given application
    pub fn run<T: Application>(
        config: EngineConfig,
        host: &mut dyn WindowHost,
        device: &mut dyn RenderDevice,
        app: &mut T,
    ) -> Result<(), EngineError> {
        let mut engine = Self::new(config);
        let (width, height) = host.surface_size();
        engine.renderer.set_surface(width, height);

        // Initialize application
        app.initialize(&mut engine)
            .map_err(|e| EngineError::ApplicationError(format!("App initialization: {e}")))?;

        log::info!("Starting main loop...");
        let idle_timeout = engine.config.frame.idle_timeout();

        while engine.running {
            match host.poll_event(idle_timeout)? {
                Some(message) => engine.route(message, device)?,
                None => engine.tick(app, device)?,
            }
            engine.deliver_events(app)?;
        }

        // Cleanup
        app.cleanup(&mut engine);

        log::info!("Engine shutdown complete after {} frames", engine.frame_count());
        Ok(())
    }

    /// Translate a platform message and queue the resulting event
    fn route(
        &mut self,
        message: PlatformMessage,
        device: &mut dyn RenderDevice,
    ) -> Result<(), EngineError> {
        let Some(event) = self.input.translate(message) else {
            return Ok(());
        };

        match event {
            InputEvent::Resize { width, height } => {
                device.resize(width, height)?;
                self.renderer.set_surface(width, height);
            }
            InputEvent::CloseRequested => self.closing = true,
            _ => {}
        }

        self.events.send(event);
        Ok(())
    }

    /// Advance time, update the application, integrate velocities and render
    fn tick<T: Application>(
        &mut self,
        app: &mut T,
        device: &mut dyn RenderDevice,
    ) -> Result<(), EngineError> {
        match self.config.frame.fixed_delta() {
            Some(step) => self.timer.advance_by(step),
            None => self.timer.update(),
        }
        let delta_time = self.timer.delta_time();
        self.events.update_time(f64::from(self.timer.total_time()));

        let loaded = self.inbox.apply(&mut self.scene);
        if loaded > 0 {
            log::debug!("Attached {loaded} loaded renderable(s)");
        }

        app.update(self, delta_time)
            .map_err(|e| EngineError::ApplicationError(format!("App update: {e}")))?;

        self.scene.advance(delta_time);

        app.render(self, device)
            .map_err(|e| EngineError::ApplicationError(format!("App render: {e}")))?;

        Ok(())
    }

    /// Hand queued events to registered handlers, then to the application
    ///
    /// A close always reaches the application, even when a handler consumed
    /// it, and ends the loop once delivered.
    fn deliver_events<T: Application>(&mut self, app: &mut T) -> Result<(), EngineError> {
        let mut unconsumed = self.events.dispatch();
        if self.closing && !unconsumed.contains(&InputEvent::CloseRequested) {
            unconsumed.push(InputEvent::CloseRequested);
        }

        for event in unconsumed {
            app.handle_event(self, &event)
                .map_err(|e| EngineError::ApplicationError(format!("App event: {e}")))?;

            if event == InputEvent::CloseRequested {
                self.closing = true;
            }
        }

        if self.closing {
            log::info!("Window close requested");
            self.running = false;
        }
        Ok(())
    }

    /// Render the current scene to `device`
    pub fn render_frame(
        &mut self,
        device: &mut dyn RenderDevice,
    ) -> Result<FrameStats, RenderError> {
        let stats = self.renderer.render(&mut self.scene, device)?;
        self.last_frame = stats;
        Ok(stats)
    }

    /// Request engine shutdown
    pub fn quit(&mut self) {
        log::info!("Engine shutdown requested");
        self.running = false;
    }

    /// Whether the loop will keep running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Get the scene graph
    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    /// Get mutable access to the scene graph
    pub fn scene_mut(&mut self) -> &mut SceneGraph {
        &mut self.scene
    }

    /// Get the current input state
    pub fn input(&self) -> &InputState {
        self.input.state()
    }

    /// Get the event queue, to register handlers or post deferred events
    pub fn events_mut(&mut self) -> &mut EventQueue {
        &mut self.events
    }

    /// Sender for handing renderables in from other threads
    pub fn renderable_sender(&self) -> RenderableSender {
        self.loader.clone()
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get the current frame delta time
    pub fn delta_time(&self) -> f32 {
        self.timer.delta_time()
    }

    /// Simulated seconds since the loop started
    pub fn total_time(&self) -> f32 {
        self.timer.total_time()
    }

    /// Number of frame ticks run
    pub fn frame_count(&self) -> u64 {
        self.timer.frame_count()
    }

    /// Stats of the last rendered frame
    pub fn last_frame_stats(&self) -> FrameStats {
        self.last_frame
    }
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Rendering error
    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),

    /// Window host error
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Application error
    #[error("Application error: {0}")]
    ApplicationError(String),
}
