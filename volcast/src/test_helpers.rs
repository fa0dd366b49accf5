//! Module with helper functions
//! Saves repetition in unit tests, integration tests and benchmarks

use nalgebra::{vector, Vector3};

use crate::volumetric::Volume;

/// Volume with sample `f(x, y, z)` in every voxel
pub fn volume_from_fn<F>(size: Vector3<usize>, f: F) -> Volume
where
    F: Fn(usize, usize, usize) -> u16,
{
    let mut data = Vec::with_capacity(size.x * size.y * size.z);
    for z in 0..size.z {
        for y in 0..size.y {
            for x in 0..size.x {
                data.push(f(x, y, z));
            }
        }
    }
    Volume::from_samples(size, data).unwrap()
}

pub fn solid_volume(size: Vector3<usize>, value: u16) -> Volume {
    volume_from_fn(size, |_, _, _| value)
}

/// Intensity `start + step * x`, saturating
pub fn ramp_volume(size: Vector3<usize>, start: u16, step: u16) -> Volume {
    volume_from_fn(size, |x, _, _| {
        start.saturating_add(step.saturating_mul(x as u16))
    })
}

/// `front` in the first half of slices (lower `z`), `back` in the rest
pub fn split_volume(size: Vector3<usize>, front: u16, back: u16) -> Volume {
    volume_from_fn(size, |_, _, z| if z < size.z / 2 { front } else { back })
}

/// Cube with side `side`, ball of value `inside` touching the faces, `outside` around it
pub fn sphere_volume(side: usize, inside: u16, outside: u16) -> Volume {
    let center = (side as f32 - 1.0) / 2.0;
    let radius = side as f32 / 2.0 - 1.0;

    volume_from_fn(vector![side, side, side], |x, y, z| {
        let offset = vector![x as f32, y as f32, z as f32].add_scalar(-center);
        if offset.magnitude() <= radius {
            inside
        } else {
            outside
        }
    })
}
