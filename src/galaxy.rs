//! Layout and animation math for the rotating skill galaxy.
//!
//! Star placement is a deterministic function of `(index, label count)`;
//! only size and hue are randomized, once, through an injectable source so
//! tests can substitute a fixed sequence.

use std::f32::consts::PI;

/// Per-frame advance of the global rotation accumulator. One tick per
/// rendered frame, so apparent speed tracks the achieved frame rate; the
/// value is part of the tuned look.
pub const TIME_STEP: f32 = 0.002;

/// Size multiplier applied to the hovered star.
pub const HOVER_SIZE: f32 = 3.5;

/// Alpha for stars that are not hovered.
pub const BASE_ALPHA: f32 = 0.8;

/// Number of static decorative stars behind the labeled ones.
pub const BACKGROUND_STAR_COUNT: usize = 100;

/// Uniform random values in `[0, 1)`. Implemented over `Math.random` in the
/// browser and over fixed sequences in tests.
pub trait RandomSource {
    fn next(&mut self) -> f32;
}

/// One labeled particle. Everything here is assigned at construction and
/// immutable afterwards; only the shared time accumulator moves stars.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub label: String,
    pub base_radius: f32,
    pub base_angle: f32,
    pub size: f32,
    pub hue: f32,
}

/// Decorative background star; `x` and `y` are offsets in `[-1, 1]` from the
/// surface center, scaled by the full width/height at draw time (so part of
/// the backdrop deliberately lands off-surface).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundStar {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub alpha: f32,
}

/// Fibonacci-sphere angles collapsed to 2D, with a rank-based radius so
/// later-indexed labels sit farther from center. Pure in `(i, n)`.
pub fn base_layout(i: usize, n: usize) -> (f32, f32) {
    let phi = (-1.0 + 2.0 * i as f32 / n as f32).acos();
    let theta = (n as f32 * PI).sqrt() * phi;
    let radius = (i as f32 / n as f32) * 0.8;
    (radius, theta)
}

pub fn build_stars(labels: &[String], rng: &mut dyn RandomSource) -> Vec<Star> {
    let n = labels.len();
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let (base_radius, base_angle) = base_layout(i, n);
            Star {
                label: label.clone(),
                base_radius,
                base_angle,
                size: rng.next() * 2.0 + 1.0,
                hue: rng.next() * 60.0 + 280.0,
            }
        })
        .collect()
}

pub fn build_background(rng: &mut dyn RandomSource) -> Vec<BackgroundStar> {
    (0..BACKGROUND_STAR_COUNT)
        .map(|_| BackgroundStar {
            x: (rng.next() - 0.5) * 2.0,
            y: (rng.next() - 0.5) * 2.0,
            size: rng.next(),
            alpha: rng.next() * 0.5,
        })
        .collect()
}

/// Project a background star to surface coordinates. Offsets span the full
/// width/height around the center, not the half-extents, which thins the
/// backdrop toward the edges.
pub fn background_position(
    star: &BackgroundStar,
    cx: f32,
    cy: f32,
    width: f32,
    height: f32,
) -> (f32, f32) {
    (cx + star.x * width, cy + star.y * height)
}

/// Index of the star matching the hovered label. Labels are unique, so at
/// most one star is ever highlighted.
pub fn hovered_index(stars: &[Star], hovered: Option<&str>) -> Option<usize> {
    let hovered = hovered?;
    stars.iter().position(|s| s.label == hovered)
}

/// Project a star to surface coordinates at the given accumulator value.
/// Center and scale come from the current surface size, so resizes re-center
/// the layout on the next frame with no extra bookkeeping.
pub fn star_position(star: &Star, time: f32, cx: f32, cy: f32, half_min_dim: f32) -> (f32, f32) {
    let angle = star.base_angle + time;
    (
        cx + angle.cos() * star.base_radius * half_min_dim,
        cy + angle.sin() * star.base_radius * half_min_dim,
    )
}
