//! Argument parsing and validation
//! Uses library `clap`

use clap::{Arg, Command, ValueHint};

use crate::app::defaults;

pub fn is_positive_number(num: &str) -> Result<(), String> {
    match num.parse::<u32>() {
        Ok(0) => Err("Number must be greater than 0".into()),
        Ok(_) => Ok(()),
        Err(_) => Err("Number required".into()),
    }
}

pub fn is_positive_float(num: &str) -> Result<(), String> {
    match num.parse::<f32>() {
        Ok(n) if n.is_finite() && n > 0.0 => Ok(()),
        Ok(_) => Err("Number must be greater than 0".into()),
        Err(_) => Err("Number required".into()),
    }
}

pub fn is_float(num: &str) -> Result<(), String> {
    num.parse::<f32>()
        .map(|_| ())
        .map_err(|_| "Number required".into())
}

pub fn is_odd_kernel(num: &str) -> Result<(), String> {
    match num.parse::<usize>() {
        Ok(k) if k >= 3 && k % 2 == 1 => Ok(()),
        Ok(_) => Err("Kernel must be odd and at least 3".into()),
        Err(_) => Err("Number required".into()),
    }
}

pub fn is_unit_float(num: &str) -> Result<(), String> {
    match num.parse::<f32>() {
        Ok(n) if (0.0..=1.0).contains(&n) => Ok(()),
        Ok(_) => Err("Number must be in range <0;1>".into()),
        Err(_) => Err("Number required".into()),
    }
}

pub fn get_command<'a>() -> Command<'a> {
    Command::new("Vol-app")
        .version("0.1.0")
        .about("Renders volume into PNG frames, orbiting around it")
        .arg(
            Arg::new("input")
                .help("Volume file")
                .required(true)
                .value_name("FILE")
                .allow_invalid_utf8(true)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("raw")
                .help("Read headerless volume of given dimensions")
                .long("raw")
                .number_of_values(3)
                .value_names(&["X", "Y", "Z"])
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .require_equals(true)
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("bytes-per-sample")
                .help("Sample width of headerless volume, in bytes")
                .long("bytes-per-sample")
                .short('b')
                .requires("raw")
                .default_value("1")
                .value_name("BYTES")
                .possible_values(["1", "2"]),
        )
        .arg(
            Arg::new("resolution")
                .help("Size of rendered frames")
                .long("resolution")
                .short('r')
                .number_of_values(2)
                .value_names(&["WIDTH", "HEIGHT"])
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .require_equals(true)
                .default_values(&[defaults::RENDER_WIDTH, defaults::RENDER_HEIGHT])
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("transfer-function")
                .help("Transfer function preset (bone, muscle, skin, lung, shepp-logan)")
                .long("transfer-function")
                .short('t')
                .value_name("NAME")
                .default_value(defaults::TRANSFER_FUNCTION),
        )
        .arg(
            Arg::new("step")
                .help("Sampling step along ray, in voxels")
                .long("step")
                .value_name("DELTA")
                .default_value(defaults::RAY_STEP)
                .validator(is_positive_float),
        )
        .arg(
            Arg::new("threads")
                .help("Number of render threads, leave out to use all cores")
                .long("threads")
                .short('j')
                .value_name("N")
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("median")
                .help("Apply median filter with given kernel size")
                .long("median")
                .value_name("KERNEL")
                .validator(is_odd_kernel),
        )
        .arg(
            Arg::new("lighting")
                .help("Shade samples, using given ambient coefficient")
                .long("lighting")
                .value_name("K_AMBIENT")
                .validator(is_unit_float),
        )
        .arg(
            Arg::new("frames")
                .help("Number of frames to render")
                .long("frames")
                .short('n')
                .value_name("N")
                .default_value(defaults::FRAMES)
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("yaw-step")
                .help("Camera rotation between frames, in degrees")
                .long("yaw-step")
                .value_name("DEGREES")
                .default_value(defaults::YAW_STEP)
                .allow_hyphen_values(true)
                .validator(is_float),
        )
        .arg(
            Arg::new("yaw")
                .help("Camera yaw of the first frame, in degrees")
                .long("yaw")
                .value_name("DEGREES")
                .default_value(defaults::START_YAW)
                .allow_hyphen_values(true)
                .validator(is_float),
        )
        .arg(
            Arg::new("pitch")
                .help("Camera pitch, in degrees")
                .long("pitch")
                .value_name("DEGREES")
                .default_value(defaults::START_PITCH)
                .allow_hyphen_values(true)
                .validator(is_float),
        )
        .arg(
            Arg::new("output")
                .help("Prefix of written frames, frames are named PREFIX_000.png")
                .long("output")
                .short('o')
                .value_name("PREFIX")
                .value_hint(ValueHint::FilePath)
                .default_value(defaults::OUTPUT_PREFIX),
        )
        .arg(
            Arg::new("progress")
                .help("Show progress bar while casting")
                .long("progress"),
        )
        .arg(
            Arg::new("verbose")
                .help("Print debug messages")
                .long("verbose")
                .short('v'),
        )
}
