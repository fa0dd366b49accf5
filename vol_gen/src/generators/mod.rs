use std::{error::Error, io::Write};

use byteorder::{ByteOrder, LittleEndian};
use indicatif::{ProgressBar, ProgressStyle};
use nalgebra::{vector, Vector3};
use rayon::prelude::*;
use volcast::volumetric::SampleWidth;

use crate::{
    config::{Config, GeneratorConfig},
    file::open_create_file,
    header::generate_header,
};

mod shapes;
mod shepp;
mod solid;

/// Slices generated in parallel before being written out
const SLICE_BATCH: u32 = 16;

/// Generates one sample at a time, at any location
pub trait SampleGenerator: Sync {
    fn sample_at(&self, coords: Vector3<u32>) -> u16;
}

pub fn get_sample_generator(config: &Config) -> Box<dyn SampleGenerator> {
    match config.generator {
        GeneratorConfig::SheppLogan => Box::new(shepp::SheppLoganGenerator::from_config(config)),
        GeneratorConfig::Solid { sample, pad } => {
            Box::new(solid::SolidGenerator::new(config.dims, sample, pad))
        }
        GeneratorConfig::Shapes {
            n_of_shapes,
            sample,
            obj_size,
        } => Box::new(shapes::ShapesGenerator::new(
            config.dims,
            n_of_shapes,
            sample,
            obj_size,
            config.seed,
        )),
    }
}

/// Samples of slice `z`, x growing fastest
pub fn generate_slice(gen: &dyn SampleGenerator, dims: Vector3<u32>, z: u32) -> Vec<u16> {
    let mut slice = Vec::with_capacity((dims.x * dims.y) as usize);
    for y in 0..dims.y {
        for x in 0..dims.x {
            slice.push(gen.sample_at(vector![x, y, z]));
        }
    }
    slice
}

/// Encode samples as stored in file
pub fn encode_slice(samples: &[u16], width: SampleWidth) -> Vec<u8> {
    match width {
        SampleWidth::U8 => samples.iter().map(|&s| s.min(u8::MAX as u16) as u8).collect(),
        SampleWidth::U16 => {
            let mut bytes = vec![0; samples.len() * 2];
            LittleEndian::write_u16_into(samples, &mut bytes);
            bytes
        }
    }
}

fn progress_bar(len: u64, show: bool) -> ProgressBar {
    if !show {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("Generating {bar:40.cyan/blue} {pos}/{len} slices [{elapsed}]"),
    );
    bar
}

/// Write volume described by `config` into its output file
pub fn generate_vol(config: &Config) -> Result<(), Box<dyn Error>> {
    let gen = get_sample_generator(config);
    let dims = config.dims;

    let mut file = open_create_file(&config.file_name)?;
    file.write_all(&generate_header(config))?;

    let bar = progress_bar(dims.z as u64, !config.verbose);

    let mut z = 0;
    while z < dims.z {
        let batch_end = (z + SLICE_BATCH).min(dims.z);

        let slices: Vec<Vec<u8>> = (z..batch_end)
            .into_par_iter()
            .map(|slice_z| {
                let samples = generate_slice(gen.as_ref(), dims, slice_z);
                encode_slice(&samples, config.sample_width)
            })
            .collect();

        for slice in slices {
            file.write_all(&slice)?;
        }

        bar.inc((batch_end - z) as u64);
        log::debug!("Slices {z}..{batch_end} written");
        z = batch_end;
    }
    bar.finish_and_clear();

    log::info!("Generating finished, result in {:?}", config.file_name);
    Ok(())
}
