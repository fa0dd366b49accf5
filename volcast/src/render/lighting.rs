//! Gradient shading, ambient and diffuse terms only

use nalgebra::{vector, Point3, Vector3};

use crate::{
    color::{self, RGBA},
    config::LightingOptions,
    volumetric::Volume,
};

/// Direction towards the light (normalized).
/// Single static light.
pub const LIGHT_DIR: Vector3<f32> = vector![-0.74278, -0.55708, -0.37139];

/// Normal estimate from central differences of raw intensity.
///
/// Points towards lower intensity. Neighbours outside the volume read as 0.
/// Flat neighbourhood yields the zero vector.
pub fn normal_at(volume: &Volume, x: usize, y: usize, z: usize) -> Vector3<f32> {
    let sample = |x: Option<usize>, y: Option<usize>, z: Option<usize>| -> f32 {
        match (x, y, z) {
            (Some(x), Some(y), Some(z)) => volume.get_data(x, y, z).unwrap_or(0) as f32,
            _ => 0.0,
        }
    };
    let (xs, ys, zs) = (Some(x), Some(y), Some(z));

    let grad = vector![
        sample(x.checked_sub(1), ys, zs) - sample(x.checked_add(1), ys, zs),
        sample(xs, y.checked_sub(1), zs) - sample(xs, y.checked_add(1), zs),
        sample(xs, ys, z.checked_sub(1)) - sample(xs, ys, z.checked_add(1))
    ];

    grad.try_normalize(f32::EPSILON).unwrap_or(grad)
}

#[derive(Debug, Clone, Copy)]
pub struct Lighting {
    options: LightingOptions,
    light_dir: Vector3<f32>,
}

impl Lighting {
    pub fn new(options: LightingOptions) -> Lighting {
        Lighting {
            options,
            light_dir: LIGHT_DIR,
        }
    }

    pub fn with_light_dir(options: LightingOptions, light_dir: Vector3<f32>) -> Lighting {
        Lighting {
            options,
            light_dir: light_dir.normalize(),
        }
    }

    /// Shade `sample` taken at `pos`.
    /// Normal comes from the voxel nearest to `pos`. Opacity is kept.
    pub fn apply(&self, volume: &Volume, sample: RGBA, pos: Point3<f32>) -> RGBA {
        let upper = volume.get_size().map(|v| v - 1);
        let voxel = |coord: f32, upper: usize| (coord.round().max(0.0) as usize).min(upper);

        let normal = normal_at(
            volume,
            voxel(pos.x, upper.x),
            voxel(pos.y, upper.y),
            voxel(pos.z, upper.z),
        );

        let opts = &self.options;
        let n_dot_l = f32::max(normal.dot(&self.light_dir), 0.0);
        let factor = opts.k_diffuse * n_dot_l * opts.diffuse_color + opts.k_ambient * opts.ambient_color;

        let rgb = sample.xyz().component_mul(&factor);
        let shaded = color::clip(color::new(rgb.x, rgb.y, rgb.z, 0.0));
        color::new(shaded.x, shaded.y, shaded.z, sample.w)
    }
}
