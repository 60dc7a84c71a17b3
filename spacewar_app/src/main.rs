//! Space War Supreme demo
//!
//! Plays a scripted session of the game on the headless window host and
//! render device. An optional first argument names a TOML or RON config file;
//! without one, `spacewar.toml` is used when present.

mod game;

use game::{Controls, SpaceWar};
use spacewar_engine::core::{Config, ConfigError, EngineConfig};
use spacewar_engine::foundation::logging;
use spacewar_engine::input::{BindingParseError, KeyCode, MouseButton};
use spacewar_engine::platform::{
    HeadlessWindow, PlatformError, PlatformMessage, ScriptStep, SizeKind,
};
use spacewar_engine::render::HeadlessDevice;
use spacewar_engine::{Engine, EngineError};
use thiserror::Error;

const DEFAULT_CONFIG: &str = "spacewar.toml";

#[derive(Error, Debug)]
enum LaunchError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Key binding error: {0}")]
    Binding(#[from] BindingParseError),
    #[error("Window error: {0}")]
    Platform(#[from] PlatformError),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

fn load_config() -> Result<EngineConfig, ConfigError> {
    match std::env::args().nth(1) {
        Some(path) => EngineConfig::load_from_file(path),
        None => Ok(EngineConfig::load_or_default(DEFAULT_CONFIG)),
    }
}

fn key(key: KeyCode, pressed: bool) -> ScriptStep {
    ScriptStep::Message(PlatformMessage::Key { key, pressed })
}

/// A short session: fly, aim, shoot, drop an asteroid, reset, resize
fn demo_script() -> Vec<ScriptStep> {
    vec![
        ScriptStep::Idle(5),
        key(KeyCode::Up, true),
        ScriptStep::Idle(10),
        key(KeyCode::Up, false),
        ScriptStep::Message(PlatformMessage::MouseMove { x: 900, y: 200 }),
        ScriptStep::Idle(2),
        key(KeyCode::Space, true),
        key(KeyCode::Space, true),
        key(KeyCode::Space, false),
        ScriptStep::Idle(20),
        ScriptStep::Message(PlatformMessage::MouseButton {
            button: MouseButton::Left,
            x: 200,
            y: 500,
            pressed: true,
        }),
        ScriptStep::Message(PlatformMessage::MouseButton {
            button: MouseButton::Left,
            x: 200,
            y: 500,
            pressed: false,
        }),
        ScriptStep::Idle(10),
        key(KeyCode::Control, true),
        key(KeyCode::R, true),
        key(KeyCode::R, false),
        key(KeyCode::Control, false),
        ScriptStep::Message(PlatformMessage::Size {
            kind: SizeKind::Maximized,
            width: 1920,
            height: 1080,
        }),
        ScriptStep::Idle(10),
        ScriptStep::Message(PlatformMessage::Size {
            kind: SizeKind::Minimized,
            width: 0,
            height: 0,
        }),
        ScriptStep::Idle(2),
        ScriptStep::Message(PlatformMessage::Size {
            kind: SizeKind::Restored,
            width: 1280,
            height: 720,
        }),
        ScriptStep::Idle(30),
    ]
}

fn run() -> Result<(), LaunchError> {
    let config = load_config()?;
    logging::init(&config.logging.level);
    let controls = Controls::parse("SPACE", "CTRL+R", "ESCAPE")?;
    let mut window = HeadlessWindow::new(&config.window)?.with_script(demo_script());
    log::info!("Starting {}", window.title());
    let mut device = HeadlessDevice::new(config.window.width, config.window.height);
    let mut game = SpaceWar::new(controls);

    Engine::run(config, &mut window, &mut device, &mut game)?;

    log::info!(
        "Presented {} frames ({} bytes of instance data); \
         {} shots, {} missiles in flight, {} asteroids left",
        device.frames_presented(),
        device.uploaded_bytes(),
        game.shots_fired(),
        game.missiles_in_flight(),
        game.asteroid_count()
    );
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        // Config errors happen before logging is configured
        logging::init("info");
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}
