//! Rendering
//!
//! ```text
//! SceneGraph ── visible_renderables ──> FrameRenderer ──> dyn RenderDevice
//!                                                          └─ HeadlessDevice
//! ```
//!
//! GPU backends implement [`RenderDevice`]; the engine only ever sees the trait.

mod device;
mod frame;
mod headless;

pub use device::{ClearColor, DrawInstance, RenderDevice, RenderError, RenderResult};
pub use frame::{FrameRenderer, FrameStats};
pub use headless::{HeadlessDevice, RecordedDraw, RecordedFrame};
