use crate::platform_layer::FrameRenderer;

/// Idle-frame work for a build without a rendering backend.
///
/// Nothing is simulated or drawn. `present` counts the frame and gives up the
/// rest of the time slice so an idle window does not keep a core fully busy.
#[derive(Debug, Default)]
pub struct NullRenderer {
    frames: u64,
}

impl NullRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames presented so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl FrameRenderer for NullRenderer {
    fn update(&mut self) {}

    fn render(&mut self) {}

    fn present(&mut self) {
        self.frames += 1;
        std::thread::yield_now();
    }
}
