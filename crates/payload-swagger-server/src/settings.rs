//! Server settings.
//!
//! Settings are layered, later sources overriding earlier ones:
//!
//! 1. Built-in defaults
//! 2. A settings file (`payload-swagger.toml` in the working directory, or
//!    an explicit path)
//! 3. `PAYLOAD_SWAGGER_*` environment variables, with `__` separating
//!    nested keys, e.g. `PAYLOAD_SWAGGER_SWAGGER__PATH=/docs`. Collections
//!    are comma-separated.

use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::plugin::SwaggerPluginOptions;

/// Prefix of the environment variables read into the settings.
pub const ENV_PREFIX: &str = "PAYLOAD_SWAGGER";

/// Settings file looked up in the working directory, without extension.
pub const DEFAULT_SETTINGS_FILE: &str = "payload-swagger";

/// Host configuration file name inside the platform config directory.
pub const HOST_CONFIG_FILE_NAME: &str = "payload.json";

/// Settings errors.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A source could not be read or did not match the settings model.
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    /// The bind address is not an IP address.
    #[error("invalid bind address '{0}'")]
    InvalidBindAddress(String),
}

/// Everything the server binary needs to start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// IP address to listen on.
    pub bind: String,

    /// Port to listen on.
    pub port: u16,

    /// Production logging (JSON files plus compact stdout).
    pub production: bool,

    /// Host configuration file (`.json` or `.toml`).
    pub host_config: Option<PathBuf>,

    /// Swagger plugin options.
    pub swagger: SwaggerPluginOptions,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 3000,
            production: false,
            host_config: None,
            swagger: SwaggerPluginOptions::default(),
        }
    }
}

impl ServerSettings {
    /// Load settings from defaults, the settings file and the environment.
    ///
    /// An explicit `file` must exist; the default settings file is optional.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Load`] if a source cannot be read or parsed.
    pub fn load(file: Option<&Path>) -> Result<Self, SettingsError> {
        let defaults = Self::default();

        let builder = Config::builder()
            .set_default("bind", defaults.bind)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("production", defaults.production)?
            .set_default("swagger.path", defaults.swagger.path)?
            .set_default("swagger.locale", defaults.swagger.locale)?
            .set_default("swagger.collections", defaults.swagger.collections)?;

        let builder = match file {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name(DEFAULT_SETTINGS_FILE).required(false)),
        };

        let settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("swagger.collections")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }

    /// The socket address to listen on.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBindAddress`] if `bind` is not an IP address.
    pub fn socket_addr(&self) -> Result<SocketAddr, SettingsError> {
        let ip: IpAddr = self
            .bind
            .parse()
            .map_err(|_| SettingsError::InvalidBindAddress(self.bind.clone()))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// The host configuration to load: the configured file, or the platform
    /// default when that file exists.
    #[must_use]
    pub fn resolve_host_config(&self) -> Option<PathBuf> {
        self.host_config
            .clone()
            .or_else(|| default_host_config_path().filter(|path| path.exists()))
    }
}

/// Platform location of the host configuration.
///
/// On Linux: `/etc/payload-swagger/payload.json`
/// Elsewhere: the user config directory, e.g. `~/Library/Application Support/payload-swagger/`
#[must_use]
pub fn default_host_config_path() -> Option<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        Some(PathBuf::from("/etc/payload-swagger").join(HOST_CONFIG_FILE_NAME))
    }
    #[cfg(not(target_os = "linux"))]
    {
        directories::ProjectDirs::from("", "", "payload-swagger")
            .map(|dirs| dirs.config_dir().join(HOST_CONFIG_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = ServerSettings::default();
        assert_eq!(settings.port, 3000);
        assert_eq!(settings.swagger.path, "/api/swagger");
        assert_eq!(
            settings.socket_addr().unwrap(),
            "0.0.0.0:3000".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
port = 8080
host_config = "payload.toml"

[swagger]
path = "/docs"
collections = ["posts", "users"]
"#
        )
        .unwrap();

        let settings = ServerSettings::load(Some(file.path())).unwrap();
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.bind, "0.0.0.0");
        assert_eq!(settings.host_config, Some(PathBuf::from("payload.toml")));
        assert_eq!(settings.swagger.path, "/docs");
        assert_eq!(settings.swagger.locale, "en");
        assert_eq!(settings.swagger.collections, ["posts", "users"]);
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = ServerSettings::load(Some(&dir.path().join("missing.toml")));
        assert!(matches!(result, Err(SettingsError::Load(_))));
    }

    #[test]
    fn test_invalid_bind_address() {
        let settings = ServerSettings {
            bind: "localhost".into(),
            ..ServerSettings::default()
        };
        assert!(matches!(
            settings.socket_addr(),
            Err(SettingsError::InvalidBindAddress(_))
        ));
    }

    #[test]
    fn test_explicit_host_config_wins() {
        let settings = ServerSettings {
            host_config: Some(PathBuf::from("/tmp/payload.json")),
            ..ServerSettings::default()
        };
        assert_eq!(
            settings.resolve_host_config(),
            Some(PathBuf::from("/tmp/payload.json"))
        );
    }
}
