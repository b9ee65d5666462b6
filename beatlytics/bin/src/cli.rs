use std::{
    io::{self, Write},
    path::PathBuf,
};

use beatlytics_server::ApiDoc;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use snafu::ResultExt;
use utoipa::OpenApi;

use crate::{command::run_server, config::Config, error, shadow};

#[derive(Debug, Parser)]
#[command(author,
    version,
    long_version = shadow::CLAP_LONG_VERSION,
    about,
    long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[clap(
        long = "config",
        short = 'c',
        env = "BEATLYTICS_CONFIG_FILE_PATH",
        help = "Specify a configuration file"
    )]
    config_file_path: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[clap(about = "Print version information")]
    Version,

    #[clap(about = "Output shell completion code for the specified shell (bash, zsh, fish)")]
    Completion { shell: Shell },

    #[clap(about = "Output default configuration")]
    DefaultConfig,

    #[clap(about = "Run server")]
    #[command(visible_alias = "run")]
    Server,

    #[clap(about = "Output `OpenApi` document")]
    OpenApi,
}

impl Cli {
    pub fn run(self, env_file: Result<PathBuf, dotenv::Error>) -> Result<(), Box<error::Error>> {
        match self.command {
            Command::Version => {
                write_stdout(Self::command().render_long_version().as_bytes())?;
            }
            Command::Completion { shell } => {
                let mut command = Self::command();
                let bin_name = command.get_name().to_string();
                clap_complete::generate(shell, &mut command, bin_name, &mut io::stdout());
            }
            Command::DefaultConfig => {
                let config_text =
                    serde_yaml::to_string(&Config::default()).context(error::SerializeConfigSnafu)?;
                write_stdout(config_text.as_bytes())?;
            }
            Command::Server => {
                let config = self.load_config()?;
                run_server(config, env_file)?;
            }
            Command::OpenApi => {
                let document =
                    ApiDoc::openapi().to_pretty_json().context(error::SerializeOpenApiSnafu)?;
                write_stdout(document.as_bytes())?;
            }
        }

        Ok(())
    }

    #[allow(clippy::result_large_err)]
    fn load_config(&self) -> Result<Config, error::Error> {
        let mut config = match self.config_file_path {
            // an explicitly requested file must exist
            Some(ref path) => Config::load(path)?,
            None => Config::load_or_default(Config::default_path())?,
        };
        config.web.apply_port_from_env()?;
        Ok(config)
    }
}

fn write_stdout(bytes: &[u8]) -> Result<(), error::Error> {
    io::stdout().write_all(bytes).context(error::WriteStdoutSnafu)
}
