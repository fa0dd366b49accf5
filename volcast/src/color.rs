use nalgebra::{vector, Vector4};

/// Color with opacity, all components in <0;1>
pub type RGBA = Vector4<f32>;

pub fn new(r: f32, g: f32, b: f32, a: f32) -> RGBA {
    vector![r, g, b, a]
}

pub fn zero() -> RGBA {
    vector![0.0, 0.0, 0.0, 0.0]
}

pub fn mono(v: f32, opacity: f32) -> RGBA {
    vector![v, v, v, opacity]
}

/// Color from 8-bit channels (0;255) and opacity (0;1).
/// Channels get normalized, opacity is kept.
pub fn from_rgb8(r: f32, g: f32, b: f32, a: f32) -> RGBA {
    vector![r / 255.0, g / 255.0, b / 255.0, a]
}

/// Clamp every component into <0;1>
pub fn clip(color: RGBA) -> RGBA {
    color.map(|c| c.clamp(0.0, 1.0))
}

/// Cheap brightness measure, sum of color channels
pub fn luminance(color: &RGBA) -> f32 {
    color.x + color.y + color.z
}
