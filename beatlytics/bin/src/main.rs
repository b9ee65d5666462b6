mod cli;
mod command;
mod config;
mod error;
mod shadow {
    #![allow(clippy::needless_raw_string_hashes)]
    use shadow_rs::shadow;
    shadow!(build);

    pub use self::build::*;
}

use clap::Parser;

use self::{cli::Cli, error::CommandError};

fn main() {
    // Loaded before parsing so `.env` can provide `PORT` and the config path too.
    let env_file = dotenv::dotenv();

    if let Err(err) = Cli::parse().run(env_file) {
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code());
    }
}
