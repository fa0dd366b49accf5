//! Volume rendering demo app
//!
//! Renders frames orbiting around a volume and writes them as PNG files, for example:
//! `cargo run --release --bin vol_app -- a.vol --frames=24 --lighting=0.3`

use std::process;

use env_logger::{Builder, Env};

mod app;
mod args;
mod config;

use app::State;
use config::Config;

pub fn main() {
    let args = args::get_command().get_matches();

    let default_filter = if args.is_present("verbose") {
        "debug"
    } else {
        "info"
    };
    Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    let cfg = match Config::from_args(&args) {
        Ok(c) => c,
        Err(e) => {
            log::error!("{e}");
            process::exit(1);
        }
    };
    log::debug!("{:?}", cfg);

    let volume = match cfg.source.load() {
        Ok(v) => v,
        Err(e) => {
            log::error!("Cannot load volume: {e}");
            process::exit(1);
        }
    };
    log::info!(
        "Volume {:?} loaded, intensity range {:?}",
        volume.get_size().as_slice(),
        volume.value_range()
    );

    let mut state = State::new(volume, cfg.render, &cfg.transfer_function, cfg.frames);
    let result = state.run();
    state.shutdown_renderer();

    match result {
        Ok(written) => log::info!("{} frame(s) written", written.len()),
        Err(e) => {
            log::error!("Rendering failed: {e}");
            process::exit(1);
        }
    }
}
