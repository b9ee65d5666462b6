pub mod config;

use std::{
    net::{IpAddr, Ipv4Addr},
    path::{Path, PathBuf},
    sync::LazyLock,
};

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const PROJECT_NAME: &str = "beatlytics";
pub const PROJECT_NAME_WITH_INITIAL_CAPITAL: &str = "Beatlytics";

pub const PROGRAM_NAME: &str = "beatlytics";
pub const CONFIG_NAME: &str = "beatlytics.yaml";

pub const DEFAULT_WEB_PORT: u16 = 8081;
pub const DEFAULT_WEB_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Environment variable overriding the listening port.
pub const PORT_ENV: &str = "PORT";

/// Body of the liveness route.
pub const LIVENESS_MESSAGE: &str = "Beatlytics is up\n";

pub static PROJECT_CONFIG_DIR: LazyLock<PathBuf> = LazyLock::new(|| {
    ProjectDirs::from("", PROJECT_NAME, PROJECT_NAME).map_or_else(
        || fallback_project_config_directories().into_iter().next().unwrap_or_default(),
        |dirs| dirs.config_dir().to_path_buf(),
    )
});

#[must_use]
pub fn fallback_project_config_directories() -> Vec<PathBuf> {
    let Some(user_dirs) = directories::UserDirs::new() else {
        return vec![[Path::new("/"), Path::new("etc"), Path::new(PROJECT_NAME)].iter().collect()];
    };
    vec![
        [user_dirs.home_dir(), Path::new(".config"), Path::new(PROJECT_NAME)].iter().collect(),
        [user_dirs.home_dir(), Path::new(&format!(".{PROJECT_NAME}"))].iter().collect(),
        [Path::new("/"), Path::new("etc"), Path::new(PROJECT_NAME)].iter().collect(),
    ]
}

#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    pub version: String,
    pub branch: String,
    pub commit_hash: String,
    pub start_time: DateTime<Utc>,
}
