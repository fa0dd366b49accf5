use std::{
    error::Error,
    path::{Path, PathBuf},
};

use image::RgbImage;
use volcast::{volumetric::Volume, RenderConfig, ViewCommand};

use super::{defaults, RenderState};
use crate::config::FrameSettings;

/// Application state
pub struct State {
    rendering: RenderState,
    settings: FrameSettings,
    resolution: (usize, usize),
}

impl State {
    pub fn new(
        volume: Volume,
        config: RenderConfig,
        transfer_function: &str,
        settings: FrameSettings,
    ) -> State {
        let resolution = config.resolution;
        let rendering = RenderState::new(
            volume,
            config,
            transfer_function,
            settings.start_yaw,
            settings.pitch,
        );
        State {
            rendering,
            settings,
            resolution,
        }
    }

    /// Render all frames, write each one to its own PNG file
    ///
    /// Returns paths of written files
    pub fn run(&mut self) -> Result<Vec<PathBuf>, Box<dyn Error>> {
        let mut written = Vec::with_capacity(self.settings.frames);

        for frame in 0..self.settings.frames {
            // first frame uses the starting angles
            let yaw = if frame == 0 {
                0.0
            } else {
                self.settings.yaw_step
            };
            let stats = self
                .rendering
                .render(ViewCommand::Rotate { yaw, pitch: 0.0 })?;

            let path = self.settings.frame_path(frame);
            self.write_frame(&path)?;

            log::info!(
                "Frame {frame} done in {} ms, {} rays hit, written to {}",
                stats.elapsed.as_millis(),
                stats.rays_hit,
                path.display()
            );
            written.push(path);
        }

        Ok(written)
    }

    fn write_frame(&self, path: &Path) -> Result<(), Box<dyn Error>> {
        let (width, height) = self.resolution;
        let data = self
            .rendering
            .frame_rgb8(defaults::IMAGE_BACKGROUND)
            .ok_or("renderer is not running")?;

        let image = RgbImage::from_raw(width as u32, height as u32, data)
            .ok_or("frame does not match resolution")?;
        image.save(path)?;
        Ok(())
    }

    pub fn shutdown_renderer(&mut self) {
        log::debug!("Shutting down renderer");
        self.rendering.shutdown_renderer();
    }
}

#[cfg(test)]
mod test {

    use std::{env, fs, process};

    use nalgebra::vector;
    use volcast::{test_helpers, TransferFunction};

    use super::*;

    #[test]
    fn writes_every_frame() {
        let dir = env::temp_dir().join(format!("vol_app_test_{}", process::id()));
        fs::create_dir_all(&dir).unwrap();

        let volume = test_helpers::sphere_volume(16, 255, 0);
        let config = RenderConfig::builder()
            .resolution(20, 10)
            .num_threads(2)
            .transfer_function(TransferFunction::SheppLogan)
            .build()
            .unwrap();
        let settings = FrameSettings {
            frames: 3,
            start_yaw: 90.0,
            pitch: 0.0,
            yaw_step: 30.0,
            output_prefix: dir.join("orbit").to_string_lossy().into_owned(),
        };

        let mut state = State::new(volume, config, "shepp-logan", settings);
        let written = state.run().unwrap();
        state.shutdown_renderer();

        assert_eq!(written.len(), 3);
        for path in &written {
            let img = image::open(path).unwrap().to_rgb8();
            assert_eq!(img.dimensions(), (20, 10));
        }
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn unknown_transfer_function_writes_empty_frames() {
        let dir = env::temp_dir().join(format!("vol_app_unknown_tf_{}", process::id()));
        fs::create_dir_all(&dir).unwrap();

        let volume = test_helpers::sphere_volume(8, 255, 60);
        let config = RenderConfig::builder().resolution(8, 8).build().unwrap();
        let settings = FrameSettings {
            frames: 2,
            start_yaw: 90.0,
            pitch: 0.0,
            yaw_step: 45.0,
            output_prefix: dir.join("empty").to_string_lossy().into_owned(),
        };

        let mut state = State::new(volume, config, "plasma", settings);
        let written = state.run().unwrap();
        state.shutdown_renderer();

        assert_eq!(written.len(), 2);
        for path in &written {
            let img = image::open(path).unwrap().to_rgb8();
            assert!(img.pixels().all(|p| p.0 == defaults::IMAGE_BACKGROUND));
        }
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn stopped_renderer_is_an_error() {
        let volume = test_helpers::solid_volume(vector![4, 4, 4], 100);
        let settings = FrameSettings {
            frames: 1,
            start_yaw: 90.0,
            pitch: 0.0,
            yaw_step: 0.0,
            output_prefix: "never_written".into(),
        };
        let config = RenderConfig::builder().resolution(4, 4).build().unwrap();

        let mut state = State::new(volume, config, "bone", settings);
        state.shutdown_renderer();
        assert!(state.run().is_err());
    }
}
