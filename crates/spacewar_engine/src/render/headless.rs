//! Render device that records frames in memory

use super::device::{ClearColor, DrawInstance, RenderDevice, RenderError, RenderResult};
use crate::scene::Renderable;

/// One draw as seen by the device
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedDraw {
    /// Instance record that would be uploaded
    pub instance: DrawInstance,
    /// Label of the renderable drawn
    pub label: String,
}

/// Everything submitted between a begin and a present
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordedFrame {
    /// Colour the frame was cleared to
    pub clear: ClearColor,
    /// Draws in submission order
    pub draws: Vec<RecordedDraw>,
}

/// Device without a GPU; keeps the last presented frame for inspection
#[derive(Debug, Default)]
pub struct HeadlessDevice {
    size: (u32, u32),
    in_progress: Option<RecordedFrame>,
    last_frame: Option<RecordedFrame>,
    frames_presented: u64,
    uploaded_bytes: usize,
}

impl HeadlessDevice {
    /// Create a device with a back buffer of the given size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            ..Self::default()
        }
    }

    /// Back buffer size
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Most recently presented frame
    pub fn last_frame(&self) -> Option<&RecordedFrame> {
        self.last_frame.as_ref()
    }

    /// Number of frames presented so far
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Total bytes of instance data submitted
    pub fn uploaded_bytes(&self) -> usize {
        self.uploaded_bytes
    }
}

impl RenderDevice for HeadlessDevice {
    fn begin_frame(&mut self, clear: ClearColor) -> RenderResult<()> {
        if self.in_progress.is_some() {
            return Err(RenderError::FrameInProgress);
        }
        self.in_progress = Some(RecordedFrame {
            clear,
            draws: Vec::new(),
        });
        Ok(())
    }

    fn draw(&mut self, instance: &DrawInstance, renderable: &Renderable) -> RenderResult<()> {
        let frame = self.in_progress.as_mut().ok_or(RenderError::FrameNotStarted)?;
        self.uploaded_bytes += bytemuck::bytes_of(instance).len();
        frame.draws.push(RecordedDraw {
            instance: *instance,
            label: renderable.label.clone(),
        });
        Ok(())
    }

    fn present(&mut self) -> RenderResult<()> {
        let frame = self.in_progress.take().ok_or(RenderError::FrameNotStarted)?;
        log::trace!("Presented frame {} with {} draws", self.frames_presented, frame.draws.len());
        self.last_frame = Some(frame);
        self.frames_presented += 1;
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) -> RenderResult<()> {
        log::debug!("Resizing headless back buffer to {width}x{height}");
        self.size = (width, height);
        Ok(())
    }
}
