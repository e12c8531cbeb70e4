mod error;

use std::path::{Path, PathBuf};

use resolve_path::PathResolveExt;
use serde::{Deserialize, Serialize};
use snafu::ResultExt;
use telecompose::command::ProxyConfig;

pub use self::error::Error;

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "ProxyConfig::default")]
    pub proxy: ProxyConfig,

    #[serde(default = "telecompose_cli::config::LogConfig::default")]
    pub log: telecompose_cli::config::LogConfig,
}

impl Config {
    /// Returns the first existing configuration file among the default path
    /// and the fallback directories, if any.
    pub fn search_config_file_path() -> Option<PathBuf> {
        std::iter::once(Self::default_path())
            .chain(telecompose_base::fallback_project_config_directories().into_iter().map(
                |mut path| {
                    path.push(telecompose_base::CLI_CONFIG_NAME);
                    path
                },
            ))
            .find(|path| path.try_exists().unwrap_or(false))
    }

    #[inline]
    pub fn default_path() -> PathBuf {
        [
            telecompose_base::PROJECT_CONFIG_DIR.to_path_buf(),
            PathBuf::from(telecompose_base::CLI_CONFIG_NAME),
        ]
        .into_iter()
        .collect()
    }

    #[inline]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let mut config: Self = {
            let path =
                path.as_ref().try_resolve().map(|path| path.to_path_buf()).with_context(|_| {
                    error::ResolveFilePathSnafu { file_path: path.as_ref().to_path_buf() }
                })?;
            let data =
                std::fs::read(&path).context(error::OpenConfigSnafu { filename: path.clone() })?;
            Self::from_slice(&data).context(error::ParseConfigSnafu { filename: path })?
        };

        config.log.file_path = match config.log.file_path.map(|path| {
            path.try_resolve()
                .map(|path| path.to_path_buf())
                .with_context(|_| error::ResolveFilePathSnafu { file_path: path.clone() })
        }) {
            Some(Ok(path)) => Some(path),
            Some(Err(err)) => return Err(err),
            None => None,
        };

        Ok(config)
    }

    /// Loads the searched configuration file, or the defaults when there is
    /// none.
    pub fn load_or_default() -> Result<Self, Error> {
        Self::search_config_file_path().map_or_else(|| Ok(Self::default()), Self::load)
    }

    fn from_slice(data: &[u8]) -> Result<Self, serde_yaml::Error> {
        // An empty file deserializes to null rather than to an empty mapping.
        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_yaml::from_slice(data)
    }

    /// The default configuration rendered as YAML.
    pub fn template_basic() -> Result<String, Error> {
        serde_yaml::to_string(&Self::default()).context(error::SerializeConfigSnafu)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_round_trips_to_defaults() {
        let template = Config::template_basic().unwrap();
        let config = Config::from_slice(template.as_bytes()).unwrap();
        assert_eq!(config.proxy, ProxyConfig::default());
        assert_eq!(config.log.level, tracing::Level::WARN);
    }

    #[test]
    fn test_partial_proxy_section_keeps_other_defaults() {
        let config = Config::from_slice(b"proxy:\n  newDeploymentPrefix: dev-\n").unwrap();
        assert_eq!(config.proxy.new_deployment_prefix, "dev-");
        assert_eq!(config.proxy.program, "telepresence");
        assert_eq!(config.proxy.env_file, "telepresence-env-file.env.tmp");
        assert!(config.log.emit_stderr);
    }

    #[test]
    fn test_empty_file_yields_defaults() {
        let config = Config::from_slice(b"\n").unwrap();
        assert_eq!(config.proxy, ProxyConfig::default());
    }

    #[test]
    fn test_unknown_proxy_value_type_is_rejected() {
        assert!(Config::from_slice(b"proxy:\n  program: [a, b]\n").is_err());
    }

    #[test]
    fn test_default_path_ends_with_config_name() {
        assert!(Config::default_path().ends_with(telecompose_base::CLI_CONFIG_NAME));
    }
}
