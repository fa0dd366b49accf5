use nalgebra::Vector3;

use super::SampleGenerator;

/// Generate solid volume
/// All samples inside the padding have the same value
pub struct SolidGenerator {
    /// The sample value
    sample: u16,
    /// Empty voxels on each side
    pad: u32,
    dims: Vector3<u32>,
}

impl SolidGenerator {
    pub fn new(dims: Vector3<u32>, sample: u16, pad: u32) -> SolidGenerator {
        SolidGenerator { sample, pad, dims }
    }

    fn inside(&self, coord: u32, dim: u32) -> bool {
        coord >= self.pad && coord < dim.saturating_sub(self.pad)
    }
}

impl SampleGenerator for SolidGenerator {
    fn sample_at(&self, coords: Vector3<u32>) -> u16 {
        if self.inside(coords.x, self.dims.x)
            && self.inside(coords.y, self.dims.y)
            && self.inside(coords.z, self.dims.z)
        {
            self.sample
        } else {
            0
        }
    }
}
