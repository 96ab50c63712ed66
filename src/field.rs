//! Scalar-field ("metaball") math for the liquid background.
//!
//! The fragment shader below is the production path; the functions here
//! mirror it term for term so the field math can be exercised on the host
//! without a GL context. Keep the two in sync when touching constants.
//!
//! Emitters carry no state between frames: each position is a pure function
//! of `(time, index)`, which keeps the motion drift-free and lets tests
//! assert exact positions at any instant.

use std::f32::consts::TAU;

use crate::config::RenderConfig;

/// Fixed iteration bound of the shader loop; `RenderConfig::count` can never
/// exceed it.
pub const MAX_EMITTERS: u32 = 16;

/// Field strength at which a pixel counts as inside a blob.
pub const THRESHOLD: f32 = 0.6;

/// Deep slate backdrop behind the blobs.
pub const BACKGROUND: [f32; 3] = [0.02, 0.04, 0.08];

const PALETTE_D: [f32; 3] = [0.263, 0.416, 0.557];

/// Orbit of emitter `i` at the given (already speed-scaled) time.
///
/// Each index gets a distinct frequency and phase, so no two emitters trace
/// the same Lissajous path over a short window.
pub fn emitter_position(time: f32, i: u32) -> (f32, f32) {
    let t = time * (0.5 + i as f32 * 0.05);
    let fi = i as f32;
    ((t * 0.9 + fi).sin(), (t * 1.2 + fi * 1.5).cos())
}

/// Phase vector fed to the cosine palette; `bias` rotates the hue cycle and
/// is its only effect.
pub fn palette_phase(bias: f32) -> [f32; 3] {
    [
        PALETTE_D[0] + bias * 0.2,
        PALETTE_D[1] + bias * 0.2,
        PALETTE_D[2] + bias * 0.2,
    ]
}

/// Cosine palette after Inigo Quilez: `a + b*cos(2π(c·t + d))` with
/// `a = b = 0.5` and `c = 1`.
pub fn palette(t: f32, bias: f32) -> [f32; 3] {
    let d = palette_phase(bias);
    let mut rgb = [0.0; 3];
    for k in 0..3 {
        rgb[k] = 0.5 + 0.5 * (TAU * (t + d[k])).cos();
    }
    rgb
}

/// Accumulated field strength at `uv`, summing the inverse-distance kernel
/// over exactly `config.count()` emitters (capped at the shader's bound).
///
/// The 1.2 exponent, rather than a pure inverse square, gives the blobs
/// their soft, liquid merges.
pub fn field_at(uv: (f32, f32), pointer: (f32, f32), time: f32, config: &RenderConfig) -> f32 {
    let count = config.count().min(MAX_EMITTERS);
    let follow = config.follow() * 0.4;
    let mut total = 0.0;
    for i in 0..count {
        let (ex, ey) = emitter_position(time, i);
        let px = ex + (pointer.0 - ex) * follow;
        let py = ey + (pointer.1 - ey) * follow;
        let dx = uv.0 - px;
        let dy = uv.1 - py;
        let dist = (dx * dx + dy * dy).sqrt();
        total += 0.08 / dist.powf(1.2);
    }
    total
}

/// Full per-pixel shading: threshold the field, color via the palette,
/// anti-alias the edge, add the rim band, darken with the vignette.
pub fn shade(uv: (f32, f32), pointer: (f32, f32), time: f32, config: &RenderConfig) -> [f32; 3] {
    let mut color = BACKGROUND;
    let total = field_at(uv, pointer, time, config);

    if total > THRESHOLD {
        let blob = palette(total * 0.5 + time * 0.2, config.color_bias());
        let alpha = smoothstep(0.6, 0.65, total);
        for k in 0..3 {
            color[k] += (blob[k] - color[k]) * alpha;
        }
        let rim = smoothstep(0.65, 0.8, total) - smoothstep(0.8, 1.2, total);
        for k in 0..3 {
            color[k] += rim * 0.2;
        }
    }

    let vignette = (uv.0 * uv.0 + uv.1 * uv.1).sqrt();
    for k in 0..3 {
        color[k] *= 1.0 - vignette * 0.5;
    }
    color
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

pub const VERTEX_SHADER: &str = r#"#version 300 es
in vec2 a_position;
void main() {
    gl_Position = vec4(a_position, 0.0, 1.0);
}
"#;

pub const FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

uniform float u_time;
uniform vec2 u_resolution;
uniform vec2 u_mouse;
uniform float u_count;
uniform float u_bias;
uniform float u_follow;

out vec4 outColor;

// Cosine palette; u_bias shifts the phase vector, rotating the hue cycle.
vec3 palette(in float t) {
    vec3 a = vec3(0.5);
    vec3 b = vec3(0.5);
    vec3 c = vec3(1.0);
    vec3 d = vec3(0.263, 0.416, 0.557) + (u_bias * 0.2);
    return a + b * cos(6.28318 * (c * t + d));
}

void main() {
    // Shorter viewport dimension spans [-1, 1]; aspect preserved.
    vec2 uv = (gl_FragCoord.xy * 2.0 - u_resolution.xy) / min(u_resolution.x, u_resolution.y);
    vec2 mouse = (u_mouse * 2.0 - u_resolution.xy) / min(u_resolution.x, u_resolution.y);

    vec3 finalColor = vec3(0.02, 0.04, 0.08);
    float totalField = 0.0;

    for (float i = 0.0; i < 16.0; i++) {
        if (i >= u_count) {
            break;
        }
        float t = u_time * (0.5 + i * 0.05);
        vec2 pos = vec2(sin(t * 0.9 + i), cos(t * 1.2 + i * 1.5));
        pos = mix(pos, mouse, u_follow * 0.4);
        float dist = length(uv - pos);
        // Inverse-distance kernel; the 1.2 exponent keeps the merges soft.
        totalField += 0.08 / pow(dist, 1.2);
    }

    if (totalField > 0.6) {
        vec3 blobColor = palette(totalField * 0.5 + u_time * 0.2);
        float alpha = smoothstep(0.6, 0.65, totalField);
        finalColor = mix(finalColor, blobColor, alpha);
        float rim = smoothstep(0.65, 0.8, totalField) - smoothstep(0.8, 1.2, totalField);
        finalColor += vec3(1.0) * rim * 0.2;
    }

    float vign = length(uv);
    finalColor *= 1.0 - vign * 0.5;

    outColor = vec4(finalColor, 1.0);
}
"#;
