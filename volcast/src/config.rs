use nalgebra::{vector, Vector3};

use crate::{
    color::{self, RGBA},
    error::{Result, VolcastError},
    TransferFunction,
};

/// Ambient and diffuse shading parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingOptions {
    pub k_ambient: f32,
    pub k_diffuse: f32,
    pub ambient_color: Vector3<f32>,
    pub diffuse_color: Vector3<f32>,
}

impl LightingOptions {
    pub fn with_ambient(k_ambient: f32) -> LightingOptions {
        LightingOptions {
            k_ambient,
            ..Default::default()
        }
    }
}

impl Default for LightingOptions {
    fn default() -> Self {
        LightingOptions {
            k_ambient: 0.3,
            k_diffuse: 0.7,
            ambient_color: vector![1.0, 1.0, 1.0],
            diffuse_color: vector![1.0, 1.0, 1.0],
        }
    }
}

/// Everything a cast needs besides the volume and the view.
///
/// Built once, then passed by reference to classification, casting and scheduling.
/// Use [`RenderConfig::builder`] to get validated values.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Image plane size, (width, height)
    pub resolution: (usize, usize),
    /// Step between samples along a ray, in voxels
    pub sampling_delta: f32,
    pub num_threads: usize,
    pub transfer_function: TransferFunction,
    /// Median filter kernel, odd
    pub median_kernel: Option<usize>,
    pub lighting: Option<LightingOptions>,
    /// Color of pixels whose ray misses the volume
    pub background: RGBA,
    pub show_progress: bool,
}

impl RenderConfig {
    pub fn builder() -> RenderConfigBuilder {
        RenderConfigBuilder::default()
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfigBuilder::default().build_unchecked()
    }
}

fn default_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[derive(Debug, Clone)]
pub struct RenderConfigBuilder {
    resolution: (usize, usize),
    sampling_delta: f32,
    num_threads: usize,
    transfer_function: TransferFunction,
    median_kernel: Option<usize>,
    lighting: Option<LightingOptions>,
    background: RGBA,
    show_progress: bool,
}

impl Default for RenderConfigBuilder {
    fn default() -> Self {
        RenderConfigBuilder {
            resolution: (256, 256),
            sampling_delta: 1.0,
            num_threads: default_threads(),
            transfer_function: TransferFunction::Bone,
            median_kernel: None,
            lighting: None,
            background: color::zero(),
            show_progress: false,
        }
    }
}

impl RenderConfigBuilder {
    pub fn resolution(mut self, width: usize, height: usize) -> Self {
        self.resolution = (width, height);
        self
    }

    pub fn sampling_delta(mut self, delta: f32) -> Self {
        self.sampling_delta = delta;
        self
    }

    pub fn num_threads(mut self, threads: usize) -> Self {
        self.num_threads = threads;
        self
    }

    pub fn transfer_function(mut self, tf: TransferFunction) -> Self {
        self.transfer_function = tf;
        self
    }

    pub fn median_kernel(mut self, kernel: Option<usize>) -> Self {
        self.median_kernel = kernel;
        self
    }

    pub fn lighting(mut self, lighting: Option<LightingOptions>) -> Self {
        self.lighting = lighting;
        self
    }

    pub fn background(mut self, background: RGBA) -> Self {
        self.background = background;
        self
    }

    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Check values and build config
    pub fn build(self) -> Result<RenderConfig> {
        let (width, height) = self.resolution;
        if width == 0 || height == 0 {
            return Err(invalid(format!("resolution {width}x{height}")));
        }
        if !self.sampling_delta.is_finite() || self.sampling_delta <= 0.0 {
            return Err(invalid(format!("sampling delta {}", self.sampling_delta)));
        }
        if self.num_threads == 0 {
            return Err(invalid("thread count 0".into()));
        }
        if let Some(kernel) = self.median_kernel {
            if kernel < 3 || kernel % 2 == 0 {
                return Err(invalid(format!("median kernel {kernel}, must be odd and >= 3")));
            }
        }
        if self.background.iter().any(|c| !(0.0..=1.0).contains(c)) {
            return Err(invalid(format!("background {:?}", self.background.as_slice())));
        }

        Ok(self.build_unchecked())
    }

    /// Build without validation.
    /// Casting with invalid values panics or produces empty images.
    pub fn build_unchecked(self) -> RenderConfig {
        RenderConfig {
            resolution: self.resolution,
            sampling_delta: self.sampling_delta,
            num_threads: self.num_threads,
            transfer_function: self.transfer_function,
            median_kernel: self.median_kernel,
            lighting: self.lighting,
            background: self.background,
            show_progress: self.show_progress,
        }
    }
}

fn invalid(msg: String) -> VolcastError {
    VolcastError::InvalidConfig(msg)
}
