//! Orthographic volume ray casting on the CPU.
//!
//! Pipeline: [`volumetric::Volume`] is classified by a [`TransferFunction`]
//! into a [`volumetric::ColoredVolume`], which [`render::RayCaster`] samples
//! along parallel rays. [`render::cast_all`] splits the image plane rows
//! between worker threads.

pub mod camera;
pub mod color;
pub mod common;
pub mod config;
pub mod error;
pub mod render;
pub mod test_helpers;
pub mod transfer_function;
pub mod volumetric;

pub use camera::{OrbitCamera, ViewCommand, ViewTransform};
pub use config::{LightingOptions, RenderConfig};
pub use error::{Result, VolcastError};
pub use transfer_function::TransferFunction;

use render::{CastStats, ImagePlane, RayCaster};
use volumetric::{ColoredVolume, Volume};

/// Classify `volume`, cast one frame from `view` and run the optional median filter.
///
/// Convenience for one-shot rendering. Hosts re-casting on every view change
/// should keep the [`ColoredVolume`] around, see [`render::RendererFront`].
pub fn render_frame(
    volume: &Volume,
    config: &RenderConfig,
    view: &ViewTransform,
) -> (ImagePlane, CastStats) {
    let colored = ColoredVolume::classify(volume, config.transfer_function);
    let caster = RayCaster::new(&colored, volume, config);

    let mut plane = ImagePlane::new(config.resolution);
    let stats = render::cast_all(&caster, view, &mut plane, config.num_threads);

    if let Some(kernel) = config.median_kernel {
        render::median_filter(&mut plane, kernel);
    }

    (plane, stats)
}
