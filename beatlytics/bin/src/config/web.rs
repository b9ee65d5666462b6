use std::net::{IpAddr, SocketAddr};

use beatlytics_core::PORT_ENV;
use serde::{Deserialize, Serialize};
use snafu::ResultExt;

use crate::config::{error, Error};

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct WebConfig {
    #[serde(default = "WebConfig::default_host")]
    pub host: IpAddr,

    #[serde(default = "WebConfig::default_port")]
    pub port: u16,
}

impl WebConfig {
    #[inline]
    pub const fn socket_address(&self) -> SocketAddr { SocketAddr::new(self.host, self.port) }

    #[inline]
    pub const fn default_host() -> IpAddr { beatlytics_core::DEFAULT_WEB_HOST }

    #[inline]
    pub const fn default_port() -> u16 { beatlytics_core::DEFAULT_WEB_PORT }

    /// Let a non-empty `PORT` environment variable override the configured port.
    pub fn apply_port_from_env(&mut self) -> Result<(), Error> {
        let value = std::env::var(PORT_ENV).ok();
        self.port = resolve_port(value.as_deref(), self.port)?;
        Ok(())
    }
}

impl Default for WebConfig {
    fn default() -> Self { Self { host: Self::default_host(), port: Self::default_port() } }
}

impl From<WebConfig> for beatlytics_core::config::WebConfig {
    fn from(config: WebConfig) -> Self { Self { listen_address: config.socket_address() } }
}

/// Absent or blank `value` keeps `fallback`.
pub fn resolve_port(value: Option<&str>, fallback: u16) -> Result<u16, Error> {
    match value.map(str::trim) {
        None | Some("") => Ok(fallback),
        Some(value) => value.parse().context(error::InvalidPortSnafu { value }),
    }
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use super::{resolve_port, WebConfig};
    use crate::config::Error;

    #[test]
    fn test_default_listen_address() {
        let address: SocketAddr = "0.0.0.0:8081".parse().unwrap();
        assert_eq!(WebConfig::default().socket_address(), address);
    }

    #[test]
    fn test_resolve_port() {
        assert_eq!(resolve_port(None, 8081).unwrap(), 8081);
        assert_eq!(resolve_port(Some(""), 8081).unwrap(), 8081);
        assert_eq!(resolve_port(Some("  "), 8081).unwrap(), 8081);
        assert_eq!(resolve_port(Some("9999"), 8081).unwrap(), 9999);
        assert_eq!(resolve_port(Some("9999"), 7000).unwrap(), 9999);
    }

    #[test]
    fn test_resolve_invalid_port() {
        assert!(matches!(
            resolve_port(Some("eighty"), 8081),
            Err(Error::InvalidPort { ref value, .. }) if value == "eighty"
        ));
        assert!(resolve_port(Some("65536"), 8081).is_err());
    }
}
