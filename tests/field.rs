//! Host-side tests for the scalar-field math. These exercise the CPU
//! reference in `liquid_viz::field`, which mirrors the fragment shader term
//! for term; pixel output itself is never asserted.

use std::f32::consts::TAU;

use liquid_viz::config::RenderConfig;
use liquid_viz::field::{
    emitter_position, field_at, palette, palette_phase, shade, BACKGROUND, MAX_EMITTERS, THRESHOLD,
};

fn config(count: u32, follow: f32, bias: f32) -> RenderConfig {
    let mut cfg = RenderConfig::default();
    cfg.set_count(count);
    cfg.set_follow(follow);
    cfg.set_color_bias(bias);
    cfg
}

const NO_POINTER: (f32, f32) = (0.0, 0.0);

#[test]
fn field_sums_exactly_count_contributions() {
    let time = 0.37;
    let uv = (0.1, -0.2);
    for count in 1..=MAX_EMITTERS {
        let cfg = config(count, 0.0, 0.0);
        let mut expected = 0.0f32;
        for i in 0..count {
            let (ex, ey) = emitter_position(time, i);
            let (dx, dy) = (uv.0 - ex, uv.1 - ey);
            expected += 0.08 / (dx * dx + dy * dy).sqrt().powf(1.2);
        }
        let actual = field_at(uv, NO_POINTER, time, &cfg);
        assert!(
            (actual - expected).abs() < 1e-5,
            "count={count}: {actual} vs {expected}"
        );
    }
}

#[test]
fn field_grows_strictly_with_emitter_count() {
    // Every kernel contribution is positive, so adding an emitter must
    // raise the field everywhere.
    let time = 0.9;
    let uv = (0.0, 0.0);
    let mut previous = 0.0f32;
    for count in 1..=MAX_EMITTERS {
        let value = field_at(uv, NO_POINTER, time, &config(count, 0.0, 0.0));
        assert!(value > previous, "count={count}");
        previous = value;
    }
}

#[test]
fn count_clamps_to_iteration_bound() {
    let mut cfg = RenderConfig::default();
    cfg.set_count(99);
    assert_eq!(cfg.count(), MAX_EMITTERS);
    cfg.set_count(0);
    assert_eq!(cfg.count(), 1);

    let at_bound = field_at((0.2, 0.3), NO_POINTER, 1.1, &config(16, 0.0, 0.0));
    let clamped = field_at((0.2, 0.3), NO_POINTER, 1.1, &config(99, 0.0, 0.0));
    assert_eq!(at_bound, clamped);
}

#[test]
fn lone_emitter_is_inside_its_own_blob() {
    // A sample point just under the single emitter must clear the
    // threshold: the kernel diverges as distance goes to zero.
    let cfg = config(1, 0.0, 0.0);
    let time = 1.7;
    let (ex, ey) = emitter_position(time, 0);
    let value = field_at((ex + 1e-3, ey), NO_POINTER, time, &cfg);
    assert!(value > THRESHOLD, "field at emitter was {value}");
}

#[test]
fn follow_blends_emitters_toward_pointer() {
    let time = 0.6;
    let pointer = (0.5, -0.5);
    let cfg = config(1, 2.0, 0.0);
    let (ex, ey) = emitter_position(time, 0);
    // follow = 2.0 means an 0.8 blend toward the pointer.
    let blended = (ex + (pointer.0 - ex) * 0.8, ey + (pointer.1 - ey) * 0.8);
    let at_blended = field_at(blended, pointer, time, &cfg);
    let at_original = field_at((ex, ey), pointer, time, &cfg);
    assert!(at_blended > at_original);
}

#[test]
fn zero_follow_leaves_orbits_untouched() {
    let time = 2.3;
    let uv = (0.1, 0.4);
    let near = field_at(uv, (0.0, 0.0), time, &config(4, 0.0, 0.0));
    let far = field_at(uv, (50.0, -50.0), time, &config(4, 0.0, 0.0));
    assert_eq!(near, far);
}

#[test]
fn palette_baseline_at_zero_bias() {
    assert_eq!(palette_phase(0.0), [0.263, 0.416, 0.557]);
    let t = 0.42;
    let rgb = palette(t, 0.0);
    for (k, d) in [0.263f32, 0.416, 0.557].iter().enumerate() {
        let expected = 0.5 + 0.5 * (TAU * (t + d)).cos();
        assert!((rgb[k] - expected).abs() < 1e-6);
    }
}

#[test]
fn palette_phase_shifts_monotonically_with_bias() {
    let mut previous = palette_phase(-1.0);
    for step in 1..=20 {
        let bias = -1.0 + step as f32 * 0.1;
        let phase = palette_phase(bias);
        for k in 0..3 {
            assert!(phase[k] > previous[k], "bias={bias} channel={k}");
        }
        previous = phase;
    }
    // Shift is linear in bias with slope 0.2 per channel.
    let lo = palette_phase(-0.5);
    let hi = palette_phase(0.5);
    for k in 0..3 {
        assert!((hi[k] - lo[k] - 0.2).abs() < 1e-6);
    }
}

#[test]
fn palette_hue_rotates_continuously() {
    let t = 0.3;
    let base = palette(t, 0.0);
    let nudged = palette(t, 1e-3);
    for k in 0..3 {
        assert!((nudged[k] - base[k]).abs() < 1e-2);
    }
}

#[test]
fn below_threshold_pixels_keep_the_background() {
    // Emitter sits at (0, 1) when time is zero; both samples are far
    // outside its blob, so only the vignette acts on the background.
    let cfg = config(1, 0.0, 0.0);
    let uv = (0.0f32, -0.2f32);
    let out = shade(uv, NO_POINTER, 0.0, &cfg);
    let len = (uv.0 * uv.0 + uv.1 * uv.1).sqrt();
    for k in 0..3 {
        let expected = BACKGROUND[k] * (1.0 - len * 0.5);
        assert!((out[k] - expected).abs() < 1e-6);
    }
}

#[test]
fn vignette_darkens_away_from_center() {
    let cfg = config(1, 0.0, 0.0);
    let near = shade((0.0, -0.2), NO_POINTER, 0.0, &cfg);
    let far = shade((0.0, -0.8), NO_POINTER, 0.0, &cfg);
    for k in 0..3 {
        assert!(far[k] < near[k]);
    }
}

#[test]
fn threshold_edge_is_smoothed_not_hard() {
    // Pick a sample whose field value lands mid-way through the 0.6..0.65
    // anti-alias band; its color must sit strictly between background and
    // blob rather than snapping.
    let cfg = config(1, 0.0, 0.0);
    let time = 0.0;
    let (ex, ey) = emitter_position(time, 0);
    let d = (0.08f32 / 0.625).powf(1.0 / 1.2);
    let uv = (ex, ey - d);

    let value = field_at(uv, NO_POINTER, time, &cfg);
    assert!(value > 0.6 && value < 0.65, "field was {value}");

    let out = shade(uv, NO_POINTER, time, &cfg);
    let len = (uv.0 * uv.0 + uv.1 * uv.1).sqrt();
    let background_only: Vec<f32> = BACKGROUND.iter().map(|c| c * (1.0 - len * 0.5)).collect();
    let deviates = (0..3).any(|k| (out[k] - background_only[k]).abs() > 1e-4);
    assert!(deviates, "edge pixel still pure background");
}

#[test]
fn config_clamps_out_of_range_values() {
    let mut cfg = RenderConfig::default();
    cfg.set_speed(9.0);
    assert_eq!(cfg.speed(), 2.0);
    cfg.set_speed(0.0);
    assert_eq!(cfg.speed(), 0.2);
    cfg.set_color_bias(5.0);
    assert_eq!(cfg.color_bias(), 1.0);
    cfg.set_color_bias(-5.0);
    assert_eq!(cfg.color_bias(), -1.0);
    cfg.set_follow(-3.0);
    assert_eq!(cfg.follow(), 0.0);
    cfg.set_follow(7.5);
    assert_eq!(cfg.follow(), 2.0);
}
