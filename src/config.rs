//! Live-adjustable parameters for the liquid background.
//!
//! The host UI owns the knobs; the renderer re-reads a snapshot of this
//! struct at the top of every frame. Out-of-range values are clamped at the
//! setter boundary so a misconfigured host degrades gracefully instead of
//! crashing the animation loop.

use crate::field::MAX_EMITTERS;

pub const SPEED_RANGE: (f32, f32) = (0.2, 2.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    count: u32,
    speed: f32,
    color_bias: f32,
    follow: f32,
    reduce_motion: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            count: 8,
            speed: 1.0,
            color_bias: 0.0,
            follow: 1.0,
            reduce_motion: false,
        }
    }
}

impl RenderConfig {
    /// Number of field emitters, always within `1..=MAX_EMITTERS`.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Time-dilation factor applied to the elapsed clock.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Palette phase shift in `[-1, 1]`.
    pub fn color_bias(&self) -> f32 {
        self.color_bias
    }

    /// Pointer-attraction weight in `[0, 2]`.
    pub fn follow(&self) -> f32 {
        self.follow
    }

    /// Manual reduced-motion override.
    pub fn reduce_motion(&self) -> bool {
        self.reduce_motion
    }

    pub fn set_count(&mut self, count: u32) {
        self.count = count.clamp(1, MAX_EMITTERS);
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.clamp(SPEED_RANGE.0, SPEED_RANGE.1);
    }

    pub fn set_color_bias(&mut self, bias: f32) {
        self.color_bias = bias.clamp(-1.0, 1.0);
    }

    pub fn set_follow(&mut self, follow: f32) {
        self.follow = follow.clamp(0.0, 2.0);
    }

    pub fn set_reduce_motion(&mut self, on: bool) {
        self.reduce_motion = on;
    }

    /// Whether the loop keeps scheduling frames, given the system-level
    /// reduced-motion preference. Either source halts the loop after the
    /// next drawn frame.
    pub fn animating(&self, prefers_reduced: bool) -> bool {
        !(self.reduce_motion || prefers_reduced)
    }
}
