use std::process;

use env_logger::{Builder, Env};

use config::Config;

mod args;
mod config;
mod file;
mod generators;
mod header;

use crate::{args::get_command, generators::generate_vol};

pub fn main() {
    let args = get_command().get_matches();

    let default_filter = if args.is_present("verbose") {
        "debug"
    } else {
        "info"
    };
    Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    let cfg = match Config::from_args(args) {
        Ok(c) => c,
        Err(e) => {
            log::error!("{e}");
            process::exit(1);
        }
    };

    log::info!("Generating volume...");
    log::debug!("{:?}", cfg);

    if let Err(e) = generate_vol(&cfg) {
        log::error!("Generating failed: {e}");
        process::exit(1);
    }
}
