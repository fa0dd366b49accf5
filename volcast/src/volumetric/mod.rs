mod colored_volume;
pub mod parse;
mod vol_builder;
mod vol_reader;
mod volume;

pub use colored_volume::ColoredVolume;
pub use vol_builder::{build_volume, DataSource, SampleWidth, VolumeMetadata};
pub use vol_reader::{from_file, from_raw_file};
pub use volume::Volume;

use nalgebra::Vector3;

use crate::error::{Result, VolcastError};

/// Position of voxel `(x, y, z)` in linear storage.
///
/// Slices along `z` are stored one after another, rows along `y` inside a slice.
/// Shared by every reader and writer of volume data.
#[inline]
pub fn linear_index(size: Vector3<usize>, x: usize, y: usize, z: usize) -> usize {
    z * size.x * size.y + y * size.x + x
}

/// Number of voxels in a volume of `size`.
///
/// Dimensions whose product does not fit `usize` are a configuration error.
pub fn voxel_count(size: Vector3<usize>) -> Result<usize> {
    size.x
        .checked_mul(size.y)
        .and_then(|xy| xy.checked_mul(size.z))
        .ok_or_else(|| {
            VolcastError::InvalidConfig(format!(
                "volume {}x{}x{} is too large",
                size.x, size.y, size.z
            ))
        })
}
