use std::ops::RangeInclusive;

use nalgebra::{vector, Vector3};

use super::SampleGenerator;

/// Generate volume with a number of randomly placed shapes
pub struct ShapesGenerator {
    shapes: Vec<ShapeInfo>,
}

impl ShapesGenerator {
    pub fn new(
        dims: Vector3<u32>,
        n_of_shapes: usize,
        sample: u16,
        obj_size: u32,
        seed: Option<u64>,
    ) -> ShapesGenerator {
        let size = vector![obj_size, obj_size, obj_size];
        let variance = obj_size / 10;
        let size_variance = vector![variance, variance, variance];
        let sample_variance = sample / 10;

        let random_shape_gen =
            ShapeInfoGenerator::new(dims, size, size_variance, sample, sample_variance, seed);
        let shapes = random_shape_gen.get_shapes(n_of_shapes);
        log::debug!("Generated {} shapes", shapes.len());

        ShapesGenerator { shapes }
    }
}

impl SampleGenerator for ShapesGenerator {
    fn sample_at(&self, coords: Vector3<u32>) -> u16 {
        // First shape containing the voxel wins
        self.shapes
            .iter()
            .filter(|shape| shape.contains(coords))
            .find_map(|shape| shape.render_at(coords - shape.position_low))
            .unwrap_or(0)
    }
}

// # of enum ShapeType variants
const N_OF_SHAPE_KINDS: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeType {
    Cuboid,
    Sphere,
}

/// One shape in volume
#[derive(Debug)]
pub struct ShapeInfo {
    pub position_low: Vector3<u32>,
    pub position_high: Vector3<u32>,
    pub shape_type: ShapeType,
    pub sample: u16,
}

impl ShapeInfo {
    #[must_use]
    pub fn new(
        position_low: Vector3<u32>,
        position_high: Vector3<u32>,
        shape_type: ShapeType,
        sample: u16,
    ) -> Self {
        Self {
            position_low,
            position_high,
            shape_type,
            sample,
        }
    }

    fn contains(&self, coords: Vector3<u32>) -> bool {
        (0..3).all(|i| coords[i] >= self.position_low[i] && coords[i] < self.position_high[i])
    }

    /// `None` if offset lies outside of the shape
    fn render_at(&self, offset: Vector3<u32>) -> Option<u16> {
        match self.shape_type {
            ShapeType::Cuboid => Some(self.sample),
            ShapeType::Sphere => self.render_sphere(offset),
        }
    }

    fn render_sphere(&self, offset: Vector3<u32>) -> Option<u16> {
        let extent = (self.position_high - self.position_low).cast::<f32>();
        let center = extent / 2.0;
        let r = extent.min() / 2.0;

        let voxel_center = offset.cast::<f32>().add_scalar(0.5);
        if (voxel_center - center).magnitude() <= r {
            Some(self.sample)
        } else {
            None
        }
    }
}

/// Generate shapes
/// Helper type
pub struct ShapeInfoGenerator {
    rng: fastrand::Rng,
    vol_dims: Vector3<u32>,
    size: Vector3<u32>,
    size_variance: Vector3<u32>,
    sample: u16,
    sample_variance: u16,
}

impl ShapeInfoGenerator {
    #[must_use]
    pub fn new(
        vol_dims: Vector3<u32>,
        size: Vector3<u32>,
        size_variance: Vector3<u32>,
        sample: u16,
        sample_variance: u16,
        seed: Option<u64>,
    ) -> Self {
        let rng = fastrand::Rng::new();
        if let Some(seed) = seed {
            rng.seed(seed);
        }

        Self {
            rng,
            vol_dims,
            size,
            size_variance,
            sample,
            sample_variance,
        }
    }

    fn random_shape(&self) -> ShapeType {
        match self.rng.u8(0..N_OF_SHAPE_KINDS) {
            0 => ShapeType::Cuboid,
            _ => ShapeType::Sphere,
        }
    }

    fn random_vector(&self, ranges: [RangeInclusive<u32>; 3]) -> Vector3<u32> {
        let [x, y, z] = ranges;
        vector![self.rng.u32(x), self.rng.u32(y), self.rng.u32(z)]
    }

    pub fn get_shapes(&self, n: usize) -> Vec<ShapeInfo> {
        (0..n).map(|_| self.get_shape()).collect()
    }

    pub fn get_shape(&self) -> ShapeInfo {
        let shape_type = self.random_shape();

        // Shapes never exceed the volume and are at least one voxel big
        let size_range = |i: usize| {
            let max = (self.size[i] + self.size_variance[i]).min(self.vol_dims[i]).max(1);
            let min = self.size[i].saturating_sub(self.size_variance[i]).clamp(1, max);
            min..=max
        };
        let size = self.random_vector([size_range(0), size_range(1), size_range(2)]);

        // Spawn shape in positions it fits
        let pos_range = |i: usize| 0..=self.vol_dims[i].saturating_sub(size[i]);
        let position_low = self.random_vector([pos_range(0), pos_range(1), pos_range(2)]);

        let position_high = position_low + size;

        let sample = self.random_sample();

        ShapeInfo::new(position_low, position_high, shape_type, sample)
    }

    fn random_sample(&self) -> u16 {
        // Saturating, there is no overflow
        let low = self.sample.saturating_sub(self.sample_variance);
        let high = self.sample.saturating_add(self.sample_variance);
        self.rng.u16(low..=high)
    }
}
