mod error;
mod web;

use std::path::{Path, PathBuf};

use beatlytics_cli_common::config::LogConfig;
use resolve_path::PathResolveExt;
use serde::{Deserialize, Serialize};
use snafu::ResultExt;

pub use self::{error::Error, web::WebConfig};

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub web: WebConfig,
}

impl Config {
    #[inline]
    pub fn default_path() -> PathBuf {
        [
            beatlytics_core::PROJECT_CONFIG_DIR.to_path_buf(),
            PathBuf::from(beatlytics_core::CONFIG_NAME),
        ]
        .into_iter()
        .collect()
    }

    #[inline]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let data = std::fs::read_to_string(&path)
            .context(error::OpenConfigSnafu { filename: path.as_ref().to_path_buf() })?;

        Self::parse(&data, path.as_ref())
    }

    /// Like [`Config::load`], but a missing file yields the default configuration.
    #[inline]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    fn parse(data: &str, filename: &Path) -> Result<Self, Error> {
        let mut config: Self = serde_yaml::from_str(data)
            .context(error::ParseConfigSnafu { filename: filename.to_path_buf() })?;

        config.log.file_path = config
            .log
            .file_path
            .map(|path| {
                path.try_resolve()
                    .map(|resolved| resolved.to_path_buf())
                    .context(error::ResolveFilePathSnafu { file_path: path.clone() })
            })
            .transpose()?;

        Ok(config)
    }
}

#[inline]
pub fn load_server_config(Config { web, .. }: Config) -> beatlytics_core::config::Config {
    beatlytics_core::config::Config { web: web.into() }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use beatlytics_cli_common::config::LogFormatter;

    use super::{Config, Error};

    #[test]
    fn test_parse_empty_document() {
        let config = Config::parse("{}", Path::new("beatlytics.yaml")).unwrap();

        assert_eq!(config.web.port, 8081);
        assert!(config.log.emit_stdout);
    }

    #[test]
    fn test_parse_sections() {
        let data = "log:\n  formatter: json\nweb:\n  host: 127.0.0.1\n  port: 9000\n";
        let config = Config::parse(data, Path::new("beatlytics.yaml")).unwrap();

        assert_eq!(config.web.socket_address().to_string(), "127.0.0.1:9000");
        assert_eq!(config.log.formatter, LogFormatter::Json);
    }

    #[test]
    fn test_parse_invalid_document() {
        let err = Config::parse("web: [", Path::new("broken.yaml")).unwrap_err();
        assert!(matches!(err, Error::ParseConfig { .. }));
    }

    #[test]
    fn test_missing_files() {
        let path = Path::new("/nonexistent/beatlytics/beatlytics.yaml");

        assert!(matches!(Config::load(path), Err(Error::OpenConfig { .. })));
        assert_eq!(Config::load_or_default(path).unwrap().web.port, 8081);
    }

    #[test]
    fn test_default_config_round_trip() {
        let text = serde_yaml::to_string(&Config::default()).unwrap();
        let config = Config::parse(&text, Path::new("default.yaml")).unwrap();

        assert_eq!(config.web, Config::default().web);
    }
}
