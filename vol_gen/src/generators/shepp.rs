use nalgebra::{vector, Vector3};

use crate::config::Config;

use super::SampleGenerator;

/// One ellipsoid of the phantom, in coordinates normalized to <-1;1>
struct Ellipsoid {
    intensity: f32,
    semi_axes: [f32; 3],
    center: [f32; 3],
    /// Rotation around z axis, in degrees
    phi: f32,
}

const fn ellipsoid(intensity: f32, semi_axes: [f32; 3], center: [f32; 3], phi: f32) -> Ellipsoid {
    Ellipsoid {
        intensity,
        semi_axes,
        center,
        phi,
    }
}

/// Modified Shepp-Logan head phantom
const PHANTOM: [Ellipsoid; 10] = [
    ellipsoid(1.0, [0.69, 0.92, 0.81], [0.0, 0.0, 0.0], 0.0),
    ellipsoid(-0.8, [0.6624, 0.874, 0.78], [0.0, -0.0184, 0.0], 0.0),
    ellipsoid(-0.2, [0.11, 0.31, 0.22], [0.22, 0.0, 0.0], -18.0),
    ellipsoid(-0.2, [0.16, 0.41, 0.28], [-0.22, 0.0, 0.0], 18.0),
    ellipsoid(0.1, [0.21, 0.25, 0.41], [0.0, 0.35, -0.15], 0.0),
    ellipsoid(0.1, [0.046, 0.046, 0.05], [0.0, 0.1, 0.25], 0.0),
    ellipsoid(0.1, [0.046, 0.046, 0.05], [0.0, -0.1, 0.25], 0.0),
    ellipsoid(0.1, [0.046, 0.023, 0.05], [-0.08, -0.605, 0.0], 0.0),
    ellipsoid(0.1, [0.023, 0.023, 0.02], [0.0, -0.606, 0.0], 0.0),
    ellipsoid(0.1, [0.023, 0.046, 0.02], [0.06, -0.605, 0.0], 0.0),
];

impl Ellipsoid {
    fn contains(&self, p: Vector3<f32>) -> bool {
        let d = p - Vector3::from(self.center);
        let (sin, cos) = self.phi.to_radians().sin_cos();
        let rotated = vector![d.x * cos + d.y * sin, -d.x * sin + d.y * cos, d.z];

        rotated
            .component_div(&Vector3::from(self.semi_axes))
            .norm_squared()
            <= 1.0
    }
}

/// 3D Shepp-Logan phantom filling the whole volume
pub struct SheppLoganGenerator {
    dims: Vector3<f32>,
    max_sample: f32,
}

impl SheppLoganGenerator {
    pub fn from_config(config: &Config) -> SheppLoganGenerator {
        SheppLoganGenerator {
            dims: config.dims.cast::<f32>(),
            max_sample: config.max_sample() as f32,
        }
    }

    /// Phantom density at `coords`, in <0;1>
    fn density(&self, coords: Vector3<u32>) -> f32 {
        let p = (coords.cast::<f32>().add_scalar(0.5) * 2.0)
            .component_div(&self.dims)
            .add_scalar(-1.0);

        let density: f32 = PHANTOM
            .iter()
            .filter(|e| e.contains(p))
            .map(|e| e.intensity)
            .sum();
        density.clamp(0.0, 1.0)
    }
}

impl SampleGenerator for SheppLoganGenerator {
    fn sample_at(&self, coords: Vector3<u32>) -> u16 {
        (self.density(coords) * self.max_sample).round() as u16
    }
}
