use std::{ffi::OsString, str::FromStr};

use clap::ArgMatches;
use nalgebra::{vector, Vector3};
use volcast::volumetric::SampleWidth;

/// Transform `Values` into `Vector`
fn values_to_vector3<T>(args: &ArgMatches, key: &str) -> Result<Vector3<T>, String>
where
    T: FromStr + Copy,
{
    let vals = args
        .values_of(key)
        .ok_or(format!("missing {key}"))?
        .map(|v| v.parse::<T>().map_err(|_| format!("cannot parse {key} value {v}")))
        .collect::<Result<Vec<T>, String>>()?;

    match vals[..] {
        [x, y, z] => Ok(vector![x, y, z]),
        _ => Err(format!("{key} needs 3 values")),
    }
}

fn parse_value<T: FromStr>(args: &ArgMatches, key: &str) -> Result<T, String> {
    let raw = args.value_of(key).ok_or(format!("missing {key}"))?;
    raw.parse()
        .map_err(|_| format!("cannot parse {key} value {raw}"))
}

/// App configuration
/// Config is built from args parsed by `clap`
#[derive(Debug)]
pub struct Config {
    /// Dimensions of volume
    pub dims: Vector3<u32>,
    /// Type of generator to be used
    pub generator: GeneratorConfig,
    pub sample_width: SampleWidth,
    // Output file name
    pub file_name: OsString,
    /// Optional seed for RNG, to replicate results
    pub seed: Option<u64>,
    pub verbose: bool,
}

impl Config {
    pub fn from_args(args: ArgMatches) -> Result<Config, String> {
        let dims = values_to_vector3(&args, "dims")?;

        let width_bytes: u8 = parse_value(&args, "bytes-per-sample")?;
        let sample_width = SampleWidth::from_bytes(width_bytes).map_err(|e| e.to_string())?;

        let generator = GeneratorConfig::from_args(&args)?;
        if let Some(sample) = generator.sample() {
            if sample > max_sample(sample_width) {
                return Err(format!("sample {sample} does not fit into {width_bytes} byte(s)"));
            }
        }

        let file_name = args
            .value_of_os("output-file")
            .unwrap_or_else(|| "a.vol".as_ref())
            .into();

        let seed = match args.value_of("seed") {
            Some(_) => Some(parse_value(&args, "seed")?),
            None => None,
        };

        Ok(Config {
            dims,
            generator,
            sample_width,
            file_name,
            seed,
            verbose: args.is_present("verbose"),
        })
    }

    /// Largest sample value of the configured width
    pub fn max_sample(&self) -> u16 {
        max_sample(self.sample_width)
    }
}

pub fn max_sample(width: SampleWidth) -> u16 {
    match width {
        SampleWidth::U8 => u8::MAX as u16,
        SampleWidth::U16 => u16::MAX,
    }
}

/// Settings specific to generator variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorConfig {
    /// 3D Shepp-Logan phantom
    SheppLogan,
    /// Generate solid volume
    Solid { sample: u16, pad: u32 },
    /// Generate shapes
    Shapes {
        n_of_shapes: usize,
        sample: u16,
        obj_size: u32,
    },
}

impl GeneratorConfig {
    pub fn from_args(args: &ArgMatches) -> Result<GeneratorConfig, String> {
        let name = args.value_of("generator").ok_or("missing generator")?;

        match name {
            "shepp" => Ok(GeneratorConfig::SheppLogan),
            "solid" => Ok(GeneratorConfig::Solid {
                sample: parse_value(args, "sample")?,
                pad: parse_value(args, "pad")?,
            }),
            "shapes" => Ok(GeneratorConfig::Shapes {
                n_of_shapes: parse_value(args, "n-of-shapes")?,
                sample: parse_value(args, "sample")?,
                obj_size: parse_value(args, "object-size")?,
            }),
            _ => Err(format!("unknown generator {name}")),
        }
    }

    /// Sample value set by user, if the generator takes one
    pub fn sample(&self) -> Option<u16> {
        match *self {
            GeneratorConfig::SheppLogan => None,
            GeneratorConfig::Solid { sample, .. } => Some(sample),
            GeneratorConfig::Shapes { sample, .. } => Some(sample),
        }
    }
}
