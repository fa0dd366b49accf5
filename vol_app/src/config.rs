use std::{path::PathBuf, str::FromStr};

use clap::ArgMatches;
use nalgebra::{vector, Vector3};
use volcast::{
    volumetric::{self, SampleWidth, Volume},
    LightingOptions, RenderConfig, TransferFunction,
};

/// Where the volume comes from
#[derive(Debug, Clone, PartialEq)]
pub enum VolumeSource {
    /// File written by `vol_gen`, dimensions in header
    Header(PathBuf),
    /// Samples only
    Raw {
        path: PathBuf,
        dims: Vector3<usize>,
        sample_width: SampleWidth,
    },
}

impl VolumeSource {
    pub fn load(&self) -> volcast::Result<Volume> {
        match self {
            VolumeSource::Header(path) => volumetric::from_file(path),
            VolumeSource::Raw {
                path,
                dims,
                sample_width,
            } => volumetric::from_raw_file(path, *dims, *sample_width),
        }
    }
}

/// Frames to render and where to put them
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSettings {
    pub frames: usize,
    /// Yaw of the first frame, degrees
    pub start_yaw: f32,
    pub pitch: f32,
    /// Yaw change between frames, degrees
    pub yaw_step: f32,
    pub output_prefix: String,
}

impl FrameSettings {
    /// File of frame number `frame`
    pub fn frame_path(&self, frame: usize) -> PathBuf {
        format!("{}_{frame:03}.png", self.output_prefix).into()
    }
}

/// App configuration
/// Config is built from args parsed by `clap`
#[derive(Debug)]
pub struct Config {
    pub source: VolumeSource,
    pub render: RenderConfig,
    /// Preset name as given, unknown name renders nothing
    pub transfer_function: String,
    pub frames: FrameSettings,
}

fn parse_value<T: FromStr>(args: &ArgMatches, key: &str) -> Result<T, String> {
    let raw = args.value_of(key).ok_or(format!("missing {key}"))?;
    raw.parse()
        .map_err(|_| format!("cannot parse {key} value {raw}"))
}

fn parse_values<T: FromStr>(args: &ArgMatches, key: &str) -> Result<Vec<T>, String> {
    args.values_of(key)
        .ok_or(format!("missing {key}"))?
        .map(|v| v.parse::<T>().map_err(|_| format!("cannot parse {key} value {v}")))
        .collect()
}

impl Config {
    pub fn from_args(args: &ArgMatches) -> Result<Config, String> {
        let path: PathBuf = args
            .value_of_os("input")
            .ok_or("missing input file")?
            .into();

        let source = if args.is_present("raw") {
            let dims = match parse_values::<usize>(args, "raw")?[..] {
                [x, y, z] => vector![x, y, z],
                _ => return Err("raw needs 3 dimensions".into()),
            };
            let width: u8 = parse_value(args, "bytes-per-sample")?;
            VolumeSource::Raw {
                path,
                dims,
                sample_width: SampleWidth::from_bytes(width).map_err(|e| e.to_string())?,
            }
        } else {
            VolumeSource::Header(path)
        };

        let (width, height) = match parse_values::<usize>(args, "resolution")?[..] {
            [w, h] => (w, h),
            _ => return Err("resolution needs 2 values".into()),
        };

        let tf_name = args
            .value_of("transfer-function")
            .ok_or("missing transfer function")?;

        let mut builder = RenderConfig::builder()
            .resolution(width, height)
            .sampling_delta(parse_value(args, "step")?)
            .show_progress(args.is_present("progress"));

        match TransferFunction::from_str(tf_name) {
            Ok(tf) => builder = builder.transfer_function(tf),
            Err(e) => log::warn!("{e}, frames will be empty"),
        }

        if args.is_present("threads") {
            builder = builder.num_threads(parse_value(args, "threads")?);
        }
        if args.is_present("median") {
            builder = builder.median_kernel(Some(parse_value(args, "median")?));
        }
        if args.is_present("lighting") {
            let k_ambient = parse_value(args, "lighting")?;
            builder = builder.lighting(Some(LightingOptions::with_ambient(k_ambient)));
        }

        let render = builder.build().map_err(|e| e.to_string())?;

        let frames = FrameSettings {
            frames: parse_value(args, "frames")?,
            start_yaw: parse_value(args, "yaw")?,
            pitch: parse_value(args, "pitch")?,
            yaw_step: parse_value(args, "yaw-step")?,
            output_prefix: parse_value(args, "output")?,
        };

        Ok(Config {
            source,
            render,
            transfer_function: tf_name.to_owned(),
            frames,
        })
    }
}
