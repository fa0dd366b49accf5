use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{
    camera::ViewTransform,
    color::{self, RGBA},
    common::Ray,
    config::RenderConfig,
    volumetric::{ColoredVolume, Volume},
};

use super::{
    compositor::{composite, is_saturated},
    lighting::Lighting,
};

/// Casts orthographic rays through a classified volume.
///
/// Shared by all render workers, only the hit counter is mutated while casting.
pub struct RayCaster<'a> {
    colored: &'a ColoredVolume,
    /// Raw intensities, for lighting normals
    volume: &'a Volume,
    lighting: Option<Lighting>,
    sampling_delta: f32,
    background: RGBA,
    show_progress: bool,
    rays_hit: AtomicUsize,
}

impl<'a> RayCaster<'a> {
    pub fn new(colored: &'a ColoredVolume, volume: &'a Volume, config: &RenderConfig) -> Self {
        RayCaster {
            colored,
            volume,
            lighting: config.lighting.map(Lighting::new),
            sampling_delta: config.sampling_delta,
            background: config.background,
            show_progress: config.show_progress,
            rays_hit: AtomicUsize::new(0),
        }
    }

    /// Color of pixel in column `u`, row `v`
    pub fn cast_pixel(&self, u: usize, v: usize, view: &ViewTransform) -> RGBA {
        let ray = view.get_ray(u as f32, v as f32);
        self.collect_light(&ray).unwrap_or(self.background)
    }

    /// Cast every pixel of `row`, `out` holds one pixel per column
    pub fn cast_row(&self, row: usize, view: &ViewTransform, out: &mut [RGBA]) {
        for (col, pixel) in out.iter_mut().enumerate() {
            *pixel = self.cast_pixel(col, row, view);
        }
    }

    /// March along `ray`, compositing samples front to back.
    ///
    /// Returns `None` if the ray misses the volume.
    /// Marching stops once the position leaves the volume or opacity saturates.
    pub fn collect_light(&self, ray: &Ray) -> Option<RGBA> {
        let bbox = self.colored.get_bound_box();
        let intersection = bbox.intersect(ray)?;

        self.rays_hit.fetch_add(1, Ordering::Relaxed);

        let step = ray.direction * self.sampling_delta;
        let mut pos = intersection.entry;
        let mut accum = color::zero();

        while bbox.contains(&pos) {
            let mut sample = self.colored.sample_at(pos);

            if sample.w > 0.0 {
                if let Some(lighting) = &self.lighting {
                    sample = lighting.apply(self.volume, sample, pos);
                }

                accum = composite(accum, sample);

                // early ray termination
                if is_saturated(&accum) {
                    break;
                }
            }

            pos += step;
        }

        Some(color::clip(accum))
    }

    /// Rays that hit the volume since last [`RayCaster::reset`]
    pub fn rays_hit(&self) -> usize {
        self.rays_hit.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.rays_hit.store(0, Ordering::Relaxed);
    }

    pub fn show_progress(&self) -> bool {
        self.show_progress
    }
}

#[cfg(test)]
mod test {

    use approx::assert_relative_eq;
    use nalgebra::{point, vector};

    use super::*;
    use crate::{test_helpers::*, TransferFunction};

    fn config() -> RenderConfig {
        RenderConfig::builder()
            .resolution(8, 8)
            .transfer_function(TransferFunction::SheppLogan)
            .build()
            .unwrap()
    }

    #[test]
    fn miss_gives_background() {
        let volume = solid_volume(vector![4, 4, 4], 60);
        let colored = ColoredVolume::classify(&volume, TransferFunction::SheppLogan);
        let background = color::new(0.0, 0.0, 1.0, 1.0);
        let config = RenderConfig::builder()
            .background(background)
            .build()
            .unwrap();
        let caster = RayCaster::new(&colored, &volume, &config);

        // plane next to the volume
        let pixel = caster.cast_pixel(6, 1, &ViewTransform::identity());

        assert_eq!(pixel, background);
        assert_eq!(caster.rays_hit(), 0);
    }

    #[test]
    fn constant_column_accumulates() {
        // 4 samples of alpha 0.1 along z
        let volume = solid_volume(vector![2, 2, 4], 60);
        let colored = ColoredVolume::classify(&volume, TransferFunction::SheppLogan);
        let caster = RayCaster::new(&colored, &volume, &config());

        let pixel = caster.cast_pixel(1, 1, &ViewTransform::identity());

        let expected_alpha = 1.0 - 0.9_f32.powi(4);
        assert_relative_eq!(pixel.w, expected_alpha, epsilon = 1e-5);
        assert_relative_eq!(pixel.x, 0.9 * expected_alpha, epsilon = 1e-5);
        assert_eq!(caster.rays_hit(), 1);
    }

    #[test]
    fn transparent_volume_stays_transparent() {
        let volume = solid_volume(vector![3, 3, 3], 1000);
        let colored = ColoredVolume::classify(&volume, TransferFunction::SheppLogan);
        let caster = RayCaster::new(&colored, &volume, &config());

        let ray = Ray::new(point![1.0, 1.0, -5.0], vector![0.0, 0.0, 1.0]);

        assert_eq!(caster.collect_light(&ray), Some(color::zero()));
    }

    #[test]
    fn origin_inside_starts_there() {
        // front half opaque, ray starts in the back half
        let volume = split_volume(vector![3, 3, 6], 255, 0);
        let colored = ColoredVolume::classify(&volume, TransferFunction::SheppLogan);
        let caster = RayCaster::new(&colored, &volume, &config());

        let from_outside = Ray::new(point![1.0, 1.0, -2.0], vector![0.0, 0.0, 1.0]);
        let from_inside = Ray::new(point![1.0, 1.0, 4.0], vector![0.0, 0.0, 1.0]);

        let outside = caster.collect_light(&from_outside).unwrap();
        let inside = caster.collect_light(&from_inside).unwrap();

        assert!(outside.w > 0.5);
        // only the white low intensity part is seen
        assert_relative_eq!(inside.w, 1.0 - 0.95_f32.powi(2), epsilon = 1e-5);
    }

    #[test]
    fn counter_resets() {
        let volume = solid_volume(vector![2, 2, 2], 10);
        let colored = ColoredVolume::classify(&volume, TransferFunction::SheppLogan);
        let caster = RayCaster::new(&colored, &volume, &config());
        let mut row = vec![color::zero(); 4];

        caster.cast_row(0, &ViewTransform::identity(), &mut row);
        assert_eq!(caster.rays_hit(), 2);

        caster.reset();
        assert_eq!(caster.rays_hit(), 0);
    }
}
