//! Typed input events and their delivery queue
//!
//! Key principles:
//! - One enum variant per event kind, no untyped payloads
//! - Handler returns bool (true = consumed, stops forwarding)
//! - Registration per kind (only notify interested handlers)
//! - Queuing support (immediate + deferred delivery)
//!
//! Events nobody consumes are handed back to the caller, which delivers them
//! to the application last.

use crate::input::{KeyCode, Modifiers, MouseButton};
use std::collections::HashMap;

/// Mouse button press or release at a cursor position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// Pixels from the left edge of the client area
    pub x: i32,
    /// Pixels from the top edge of the client area
    pub y: i32,
    /// Which button changed
    pub button: MouseButton,
    /// `true` on press, `false` on release
    pub pressed: bool,
}

/// Key press or release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardEvent {
    /// Which key changed
    pub key: KeyCode,
    /// `true` on press, `false` on release
    pub pressed: bool,
    /// Modifier keys held when the event happened
    pub modifiers: Modifiers,
}

/// Event delivered to handlers and the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Keyboard input
    Keyboard(KeyboardEvent),
    /// Mouse button input
    Mouse(MouseEvent),
    /// Cursor moved to a new position
    MouseMoved {
        /// New X coordinate
        x: i32,
        /// New Y coordinate
        y: i32,
    },
    /// Drawable surface changed size
    Resize {
        /// New surface width
        width: u32,
        /// New surface height
        height: u32,
    },
    /// The window is being closed
    CloseRequested,
}

/// Event kind used for handler registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// [`InputEvent::Keyboard`]
    Keyboard,
    /// [`InputEvent::Mouse`]
    Mouse,
    /// [`InputEvent::MouseMoved`]
    MouseMoved,
    /// [`InputEvent::Resize`]
    Resize,
    /// [`InputEvent::CloseRequested`]
    CloseRequested,
}

impl InputEvent {
    /// Kind of this event
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Keyboard(_) => EventKind::Keyboard,
            Self::Mouse(_) => EventKind::Mouse,
            Self::MouseMoved { .. } => EventKind::MouseMoved,
            Self::Resize { .. } => EventKind::Resize,
            Self::CloseRequested => EventKind::CloseRequested,
        }
    }
}

/// Event handler trait
/// Returns true if event was consumed (stops forwarding)
/// Returns false to allow forwarding to other handlers
pub trait EventHandler {
    /// Handle an event, return true if consumed
    fn on_event(&mut self, event: &InputEvent) -> bool;
}

/// Event queue with registration and deferred delivery
/// Follows chain of responsibility pattern
#[derive(Default)]
pub struct EventQueue {
    immediate_queue: Vec<InputEvent>,
    deferred_queue: Vec<(f64, InputEvent)>,
    handlers: HashMap<EventKind, Vec<Box<dyn EventHandler>>>,
    current_time: f64,
}

impl EventQueue {
    /// Create a new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Update current time (seconds since start)
    pub fn update_time(&mut self, time: f64) {
        self.current_time = time;
    }

    /// Register a handler for a specific event kind
    pub fn register_handler(&mut self, kind: EventKind, handler: Box<dyn EventHandler>) {
        self.handlers.entry(kind).or_default().push(handler);
    }

    /// Queue event for delivery on the next dispatch
    pub fn send(&mut self, event: InputEvent) {
        self.immediate_queue.push(event);
    }

    /// Queue event for delivery once the clock reaches `delivery_time`
    pub fn post(&mut self, delivery_time: f64, event: InputEvent) {
        self.deferred_queue.push((delivery_time, event));
    }

    /// Number of events waiting in either queue
    pub fn pending(&self) -> usize {
        self.immediate_queue.len() + self.deferred_queue.len()
    }

    /// Offer pending events to registered handlers
    ///
    /// Immediate events go first, then due deferred events, each in the order
    /// they were queued. Returns the events no handler consumed.
    pub fn dispatch(&mut self) -> Vec<InputEvent> {
        let mut due = std::mem::take(&mut self.immediate_queue);

        let now = self.current_time;
        let (ready, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.deferred_queue)
            .into_iter()
            .partition(|(time, _)| *time <= now);
        self.deferred_queue = waiting;
        due.extend(ready.into_iter().map(|(_, event)| event));

        due.into_iter()
            .filter(|event| !self.offer(event))
            .collect()
    }

    /// Drop every queued event (useful for state transitions)
    pub fn clear(&mut self) {
        self.immediate_queue.clear();
        self.deferred_queue.clear();
    }

    fn offer(&mut self, event: &InputEvent) -> bool {
        self.handlers
            .get_mut(&event.kind())
            .is_some_and(|handlers| handlers.iter_mut().any(|handler| handler.on_event(event)))
    }
}
