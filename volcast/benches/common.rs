pub use criterion::{criterion_group, criterion_main, Criterion};

pub use nalgebra::Vector2;
pub use volcast::{
    render::{cast_all, ImagePlane, RayCaster},
    test_helpers,
    volumetric::{ColoredVolume, Volume},
    RenderConfig, TransferFunction, ViewTransform,
};

pub const WIDTH: usize = 256;
pub const HEIGHT: usize = 256;

pub const VOLUME_SIDE: usize = 128;

/// (yaw, pitch) of benchmarked views
pub const DEFAULT_VIEWS: [(f32, f32); 3] = [(90.0, 0.0), (45.0, 30.0), (-120.0, -50.0)];

pub fn get_volume() -> Volume {
    test_helpers::sphere_volume(VOLUME_SIDE, 255, 60)
}

pub fn get_config(threads: usize) -> RenderConfig {
    RenderConfig::builder()
        .resolution(WIDTH, HEIGHT)
        .num_threads(threads)
        .transfer_function(TransferFunction::SheppLogan)
        .build_unchecked()
}

pub fn get_views(volume: &Volume) -> Vec<ViewTransform> {
    DEFAULT_VIEWS
        .iter()
        .map(|&(yaw, pitch)| {
            ViewTransform::orbit(
                &volume.get_bound_box(),
                (WIDTH, HEIGHT),
                yaw,
                pitch,
                Vector2::zeros(),
            )
        })
        .collect()
}
