use nalgebra::{point, Point3, Vector3};
use rayon::prelude::*;

use crate::{
    color::{self, RGBA},
    common::BoundBox,
    error::{Result, VolcastError},
    TransferFunction,
};

use super::{linear_index, voxel_count, Volume};

/// Volume after classification, one RGBA sample per voxel.
///
/// Same dimensions and storage order as the source [`Volume`].
/// Read-only while rendering, shared by all render workers.
pub struct ColoredVolume {
    bound_box: BoundBox,
    size: Vector3<usize>,
    data: Vec<RGBA>,
}

impl std::fmt::Debug for ColoredVolume {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColoredVolume")
            .field("box", &self.bound_box)
            .field("size", &self.size)
            .field("data len", &self.data.len())
            .finish()
    }
}

impl ColoredVolume {
    /// Apply `tf` to every voxel of `volume`
    pub fn classify(volume: &Volume, tf: TransferFunction) -> ColoredVolume {
        let data: Vec<RGBA> = volume
            .samples()
            .par_iter()
            .map(|&sample| tf.classify(sample))
            .collect();

        let visible = data.iter().filter(|c| c.w > 0.0).count();
        log::info!(
            "Classified {} voxels with `{tf}`, {visible} visible",
            data.len()
        );

        ColoredVolume {
            bound_box: volume.get_bound_box(),
            size: volume.get_size(),
            data,
        }
    }

    /// Classify using transfer function looked up by name.
    ///
    /// Unknown name is not fatal, it is reported and the result is fully transparent.
    pub fn classify_named(volume: &Volume, name: &str) -> ColoredVolume {
        match name.parse::<TransferFunction>() {
            Ok(tf) => ColoredVolume::classify(volume, tf),
            Err(err) => {
                log::warn!("{err}, volume left unclassified");
                ColoredVolume::transparent(volume)
            }
        }
    }

    /// Fully transparent volume of the same shape as `volume`
    pub fn transparent(volume: &Volume) -> ColoredVolume {
        ColoredVolume {
            bound_box: volume.get_bound_box(),
            size: volume.get_size(),
            data: vec![color::zero(); volume.samples().len()],
        }
    }

    /// Build from already classified samples, in `z`, `y`, `x` order
    pub fn from_colors(size: Vector3<usize>, data: Vec<RGBA>) -> Result<ColoredVolume> {
        let voxel_count = voxel_count(size)?;
        if voxel_count == 0 || data.len() != voxel_count {
            return Err(VolcastError::InvalidConfig(format!(
                "colored volume {}x{}x{} got {} samples",
                size.x,
                size.y,
                size.z,
                data.len()
            )));
        }

        Ok(ColoredVolume {
            bound_box: Self::bound_box_of(size),
            size,
            data,
        })
    }

    fn bound_box_of(size: Vector3<usize>) -> BoundBox {
        let upper = size.map(|v| v.saturating_sub(1) as f32);
        BoundBox::new(point![0.0, 0.0, 0.0], upper.into())
    }

    pub fn get_size(&self) -> Vector3<usize> {
        self.size
    }

    pub fn get_bound_box(&self) -> BoundBox {
        self.bound_box
    }

    pub fn get_data(&self, x: usize, y: usize, z: usize) -> Option<RGBA> {
        if x >= self.size.x || y >= self.size.y || z >= self.size.z {
            return None;
        }
        self.data.get(linear_index(self.size, x, y, z)).copied()
    }

    /// All samples, in storage order
    pub fn colors(&self) -> &[RGBA] {
        &self.data
    }

    fn voxel(&self, x: usize, y: usize, z: usize) -> RGBA {
        self.data[linear_index(self.size, x, y, z)]
    }

    /// Trilinear interpolation sample.
    ///
    /// `pos` in volume coordinates. Positions slightly outside the volume are clamped onto it.
    /// At the far faces the missing `+1` neighbour is replaced by the voxel itself.
    pub fn sample_at(&self, pos: Point3<f32>) -> RGBA {
        let (x0, x1, x_t) = axis_neighbours(pos.x, self.size.x - 1);
        let (y0, y1, y_t) = axis_neighbours(pos.y, self.size.y - 1);
        let (z0, z1, z_t) = axis_neighbours(pos.z, self.size.z - 1);

        // along x, four edges
        let c00 = lerp(self.voxel(x0, y0, z0), self.voxel(x1, y0, z0), x_t);
        let c10 = lerp(self.voxel(x0, y1, z0), self.voxel(x1, y1, z0), x_t);
        let c01 = lerp(self.voxel(x0, y0, z1), self.voxel(x1, y0, z1), x_t);
        let c11 = lerp(self.voxel(x0, y1, z1), self.voxel(x1, y1, z1), x_t);

        // along y
        let c0 = lerp(c00, c10, y_t);
        let c1 = lerp(c01, c11, y_t);

        // along z
        color::clip(lerp(c0, c1, z_t))
    }
}

/// Floor coordinate, its `+1` neighbour and the fraction between them.
/// Neighbour past `upper` falls back to the floor coordinate.
fn axis_neighbours(coord: f32, upper: usize) -> (usize, usize, f32) {
    let coord = coord.clamp(0.0, upper as f32);
    let floor = coord.floor();
    let t = coord - floor;

    let c0 = floor as usize;
    let c1 = if c0 + 1 > upper { c0 } else { c0 + 1 };
    (c0, c1, t)
}

fn lerp(a: RGBA, b: RGBA, t: f32) -> RGBA {
    a * (1.0 - t) + b * t
}
