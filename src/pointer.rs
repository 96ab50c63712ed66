//! Exponential pointer smoothing.

/// Fraction of the remaining distance covered each frame.
///
/// Not delta-time compensated: effective responsiveness varies with the
/// achieved frame rate; the value is part of the tuned look.
pub const SMOOTHING: f32 = 0.1;

/// Smoothed pointer position in device pixels. Raw input events move the
/// target; `step` eases the reported position toward it once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    x: f32,
    y: f32,
    target_x: f32,
    target_y: f32,
}

impl PointerState {
    /// Start with position and target collapsed onto one point.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            target_x: x,
            target_y: y,
        }
    }

    pub fn set_target(&mut self, x: f32, y: f32) {
        self.target_x = x;
        self.target_y = y;
    }

    /// Advance the low-pass filter by one frame.
    pub fn step(&mut self) {
        self.x += (self.target_x - self.x) * SMOOTHING;
        self.y += (self.target_y - self.y) * SMOOTHING;
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn target(&self) -> (f32, f32) {
        (self.target_x, self.target_y)
    }
}
