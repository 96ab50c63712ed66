//! Backing-store bookkeeping and the coordinate mapping shared by the field
//! math and its tests.

/// Tracks the surface's pixel dimensions so resize handling stays idempotent:
/// `apply` reports whether anything actually changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Record new dimensions. Returns `false` when they match the current
    /// ones, in which case the caller must not touch the backing store.
    pub fn apply(&mut self, width: u32, height: u32) -> bool {
        if self.width == width && self.height == height {
            return false;
        }
        self.width = width;
        self.height = height;
        true
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Map a pixel coordinate into the aspect-preserving field space the shader
/// works in: the shorter viewport dimension spans `[-1, 1]`, the longer one
/// extends proportionally beyond.
pub fn to_field_space(x: f32, y: f32, width: f32, height: f32) -> (f32, f32) {
    let m = width.min(height);
    ((x * 2.0 - width) / m, (y * 2.0 - height) / m)
}
