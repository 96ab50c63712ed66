//! Host-side tests for input sampling: pointer smoothing, resize
//! idempotence, and the reduced-motion scheduling decision.

use liquid_viz::config::RenderConfig;
use liquid_viz::pointer::{PointerState, SMOOTHING};
use liquid_viz::surface::{to_field_space, Viewport};

#[test]
fn pointer_covers_a_fixed_fraction_per_step() {
    let mut pointer = PointerState::new(0.0, 0.0);
    pointer.set_target(100.0, -40.0);
    pointer.step();
    let (x, y) = pointer.position();
    assert!((x - 100.0 * SMOOTHING).abs() < 1e-4);
    assert!((y + 40.0 * SMOOTHING).abs() < 1e-4);
}

#[test]
fn pointer_converges_to_a_stationary_target() {
    let mut pointer = PointerState::new(0.0, 0.0);
    pointer.set_target(640.0, 360.0);
    for _ in 0..200 {
        pointer.step();
    }
    let (x, y) = pointer.position();
    assert!((x - 640.0).abs() < 1e-2);
    assert!((y - 360.0).abs() < 1e-2);
}

#[test]
fn pointer_starts_collapsed_on_its_target() {
    let mut pointer = PointerState::new(10.0, 20.0);
    pointer.step();
    assert_eq!(pointer.position(), (10.0, 20.0));
    assert_eq!(pointer.target(), (10.0, 20.0));
}

#[test]
fn resize_is_idempotent_for_equal_dimensions() {
    let mut viewport = Viewport::default();
    assert!(viewport.apply(800, 600));
    // Same dimensions again: must report "no change" so the caller leaves
    // the backing store alone.
    assert!(!viewport.apply(800, 600));
    assert_eq!((viewport.width(), viewport.height()), (800, 600));

    assert!(viewport.apply(801, 600));
    assert_eq!(viewport.width(), 801);
}

#[test]
fn field_space_is_aspect_preserving() {
    // Center maps to the origin regardless of aspect.
    assert_eq!(to_field_space(960.0, 540.0, 1920.0, 1080.0), (0.0, 0.0));

    // The shorter dimension spans [-1, 1]; the longer extends past it.
    let (x, y) = to_field_space(0.0, 0.0, 1920.0, 1080.0);
    assert_eq!(y, -1.0);
    assert!((x + 1920.0 / 1080.0).abs() < 1e-6);

    // Same canonical point, different aspect, same field-space position.
    let wide = to_field_space(960.0, 270.0, 1920.0, 1080.0);
    let tall = to_field_space(540.0, 480.0, 1080.0, 1920.0);
    assert!((wide.1 - (-0.5)).abs() < 1e-6);
    assert!((tall.0 - 0.0).abs() < 1e-6);
}

#[test]
fn reduced_motion_halts_from_either_source() {
    let mut cfg = RenderConfig::default();
    assert!(cfg.animating(false));

    // System preference alone halts.
    assert!(!cfg.animating(true));

    // Manual override alone halts.
    cfg.set_reduce_motion(true);
    assert!(!cfg.animating(false));

    // Clearing the override resumes only if the system agrees.
    cfg.set_reduce_motion(false);
    assert!(cfg.animating(false));
    assert!(!cfg.animating(true));
}
