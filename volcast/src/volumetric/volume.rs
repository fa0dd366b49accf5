use nalgebra::{point, Vector3};

use crate::{
    common::BoundBox,
    error::{Result, VolcastError},
};

use super::{linear_index, voxel_count};

/// Scalar volume, one 16-bit intensity per voxel.
///
/// Samples are stored slice by slice (`z`), then rows (`y`), `x` is the fastest growing axis.
/// Immutable once built.
pub struct Volume {
    bound_box: BoundBox,
    size: Vector3<usize>,
    data: Vec<u16>,
}

impl std::fmt::Debug for Volume {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Volume")
            .field("box", &self.bound_box)
            .field("size", &self.size)
            .field("data len", &self.data.len())
            .finish()
    }
}

impl Volume {
    /// Build volume from samples in `z`, `y`, `x` order.
    /// Number of samples must match `size`.
    pub fn from_samples(size: Vector3<usize>, data: Vec<u16>) -> Result<Volume> {
        if size.iter().any(|&dim| dim == 0) {
            return Err(VolcastError::InvalidConfig(format!(
                "volume dimensions must be positive, got {}x{}x{}",
                size.x, size.y, size.z
            )));
        }

        let voxel_count = voxel_count(size)?;
        if data.len() != voxel_count {
            return Err(VolcastError::InvalidConfig(format!(
                "volume {}x{}x{} needs {voxel_count} samples, got {}",
                size.x,
                size.y,
                size.z,
                data.len()
            )));
        }

        // Voxel centers span from 0 to size - 1 on each axis
        let upper = size.map(|v| (v - 1) as f32);
        let bound_box = BoundBox::new(point![0.0, 0.0, 0.0], upper.into());

        Ok(Volume {
            bound_box,
            size,
            data,
        })
    }

    pub fn get_size(&self) -> Vector3<usize> {
        self.size
    }

    pub fn get_bound_box(&self) -> BoundBox {
        self.bound_box
    }

    pub fn get_data(&self, x: usize, y: usize, z: usize) -> Option<u16> {
        if x >= self.size.x || y >= self.size.y || z >= self.size.z {
            return None;
        }
        self.data.get(linear_index(self.size, x, y, z)).copied()
    }

    /// All samples, in storage order
    pub fn samples(&self) -> &[u16] {
        &self.data
    }

    /// Lowest and highest intensity in the volume
    pub fn value_range(&self) -> (u16, u16) {
        self.data
            .iter()
            .fold((u16::MAX, u16::MIN), |(low, high), &v| {
                (low.min(v), high.max(v))
            })
    }
}

#[cfg(test)]
mod test {

    use nalgebra::vector;

    use super::*;

    #[test]
    fn index_order() {
        // value encodes its own coordinates
        let size = vector![4, 3, 2];
        let data = (0..2)
            .flat_map(|z| (0..3).flat_map(move |y| (0..4).map(move |x| x + 10 * y + 100 * z)))
            .collect();
        let volume = Volume::from_samples(size, data).unwrap();

        assert_eq!(volume.get_data(0, 0, 0), Some(0));
        assert_eq!(volume.get_data(3, 0, 0), Some(3));
        assert_eq!(volume.get_data(1, 2, 0), Some(21));
        assert_eq!(volume.get_data(3, 2, 1), Some(123));
        assert_eq!(volume.get_data(4, 0, 0), None);
        assert_eq!(volume.get_data(0, 0, 2), None);
    }

    #[test]
    fn bound_box_spans_voxel_centers() {
        let volume = Volume::from_samples(vector![4, 3, 2], vec![0; 24]).unwrap();
        let bbox = volume.get_bound_box();

        assert_eq!(bbox.lower, point![0.0, 0.0, 0.0]);
        assert_eq!(bbox.upper, point![3.0, 2.0, 1.0]);
    }

    #[test]
    fn wrong_sample_count() {
        let res = Volume::from_samples(vector![2, 2, 2], vec![0; 7]);
        assert!(matches!(res, Err(VolcastError::InvalidConfig(_))));

        let res = Volume::from_samples(vector![2, 0, 2], vec![]);
        assert!(matches!(res, Err(VolcastError::InvalidConfig(_))));

        // product wraps to zero without overflow check
        let res = Volume::from_samples(vector![1 << 22, 1 << 21, 1 << 21], vec![]);
        assert!(matches!(res, Err(VolcastError::InvalidConfig(_))));
    }

    #[test]
    fn value_range() {
        let volume = Volume::from_samples(vector![2, 2, 1], vec![7, 300, 12, 9]).unwrap();
        assert_eq!(volume.value_range(), (7, 300));
    }
}
