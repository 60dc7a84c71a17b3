//! Scripted window host for tests and headless runs

use super::{PlatformError, PlatformMessage, SizeKind, WindowHost};
use crate::core::config::WindowConfig;
use std::collections::VecDeque;
use std::time::Duration;

/// One entry of a headless script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptStep {
    /// Deliver a message
    Message(PlatformMessage),
    /// Report an empty queue this many times, letting the engine run frames
    Idle(u32),
}

/// Window host that replays a script instead of reading an OS queue
///
/// Once the script runs out the window reports [`PlatformMessage::Destroy`]
/// exactly once, so every run terminates. Polling a destroyed window fails
/// with [`PlatformError::HostLost`]. A window that is not resizable never
/// reports restored or maximised size changes; scripted ones are dropped.
#[derive(Debug)]
pub struct HeadlessWindow {
    title: String,
    size: (u32, u32),
    resizable: bool,
    script: VecDeque<ScriptStep>,
    destroyed: bool,
    polls: u64,
}

impl HeadlessWindow {
    /// Create a headless window matching `config`
    pub fn new(config: &WindowConfig) -> Result<Self, PlatformError> {
        if config.width == 0 || config.height == 0 {
            return Err(PlatformError::CreationFailed(format!(
                "invalid size {}x{}",
                config.width, config.height
            )));
        }
        log::info!(
            "Created headless window '{}' ({}x{})",
            config.title,
            config.width,
            config.height
        );
        Ok(Self {
            title: config.title.clone(),
            size: (config.width, config.height),
            resizable: config.resizable,
            script: VecDeque::new(),
            destroyed: false,
            polls: 0,
        })
    }

    /// Append steps to the script, builder style
    pub fn with_script(mut self, steps: impl IntoIterator<Item = ScriptStep>) -> Self {
        self.script.extend(steps);
        self
    }

    /// Append one step to the script
    pub fn push(&mut self, step: ScriptStep) {
        self.script.push_back(step);
    }

    /// Window title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Number of times the engine polled this window
    pub fn polls(&self) -> u64 {
        self.polls
    }
}

impl WindowHost for HeadlessWindow {
    fn poll_event(
        &mut self,
        _timeout: Duration,
    ) -> Result<Option<PlatformMessage>, PlatformError> {
        self.polls += 1;
        loop {
            return match self.script.pop_front() {
                Some(ScriptStep::Idle(remaining)) => {
                    if remaining > 1 {
                        self.script.push_front(ScriptStep::Idle(remaining - 1));
                    }
                    Ok(None)
                }
                Some(ScriptStep::Message(PlatformMessage::Size { kind, width, height }))
                    if kind != SizeKind::Minimized =>
                {
                    if !self.resizable {
                        log::debug!("Dropped {width}x{height} resize of a fixed-size window");
                        continue;
                    }
                    self.size = (width, height);
                    Ok(Some(PlatformMessage::Size { kind, width, height }))
                }
                Some(ScriptStep::Message(message)) => Ok(Some(message)),
                None if !self.destroyed => {
                    self.destroyed = true;
                    Ok(Some(PlatformMessage::Destroy))
                }
                None => Err(PlatformError::HostLost(format!(
                    "window '{}' was destroyed",
                    self.title
                ))),
            };
        }
    }

    fn surface_size(&self) -> (u32, u32) {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> WindowConfig {
        WindowConfig {
            width: 320,
            height: 200,
            ..WindowConfig::default()
        }
    }

    #[test]
    fn replays_script_then_destroys_once() {
        let mut window = HeadlessWindow::new(&config()).unwrap().with_script([
            ScriptStep::Idle(2),
            ScriptStep::Message(PlatformMessage::MouseMove { x: 3, y: 4 }),
        ]);
        let tick = Duration::ZERO;

        assert_eq!(window.poll_event(tick).unwrap(), None);
        assert_eq!(window.poll_event(tick).unwrap(), None);
        assert_eq!(
            window.poll_event(tick).unwrap(),
            Some(PlatformMessage::MouseMove { x: 3, y: 4 })
        );
        assert_eq!(window.poll_event(tick).unwrap(), Some(PlatformMessage::Destroy));
        assert!(matches!(
            window.poll_event(tick),
            Err(PlatformError::HostLost(_))
        ));
        assert_eq!(window.polls(), 5);
    }

    #[test]
    fn fixed_size_window_drops_scripted_resizes() {
        let fixed = WindowConfig {
            title: "Fixed".to_string(),
            resizable: false,
            ..config()
        };
        let mut window = HeadlessWindow::new(&fixed).unwrap().with_script([
            ScriptStep::Message(PlatformMessage::Size {
                kind: SizeKind::Maximized,
                width: 1024,
                height: 768,
            }),
            ScriptStep::Message(PlatformMessage::Size {
                kind: SizeKind::Minimized,
                width: 0,
                height: 0,
            }),
        ]);

        assert_eq!(
            window.poll_event(Duration::ZERO).unwrap(),
            Some(PlatformMessage::Size {
                kind: SizeKind::Minimized,
                width: 0,
                height: 0,
            })
        );
        assert_eq!(window.surface_size(), (320, 200));
        assert_eq!(window.title(), "Fixed");
    }

    #[test]
    fn tracks_surface_size() {
        let mut window = HeadlessWindow::new(&config()).unwrap();
        window.push(ScriptStep::Message(PlatformMessage::Size {
            kind: SizeKind::Maximized,
            width: 1024,
            height: 768,
        }));
        window.poll_event(Duration::ZERO).unwrap();
        assert_eq!(window.surface_size(), (1024, 768));
    }

    #[test]
    fn zero_sized_window_is_rejected() {
        let bad = WindowConfig {
            width: 0,
            ..WindowConfig::default()
        };
        assert!(matches!(
            HeadlessWindow::new(&bad),
            Err(PlatformError::CreationFailed(_))
        ));
    }
}
