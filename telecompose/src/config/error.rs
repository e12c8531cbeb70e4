use std::path::PathBuf;

use snafu::Snafu;

/// Represents the possible errors that can occur when handling configuration
/// files.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    /// The configuration file could not be read.
    #[snafu(display("Failed to open config from {}, error: {source}", filename.display()))]
    OpenConfig { filename: PathBuf, source: std::io::Error },

    /// The configuration file is not valid YAML or does not match the
    /// expected structure.
    #[snafu(display("Failed to parse config from {}, error: {source}", filename.display()))]
    ParseConfig { filename: PathBuf, source: serde_yaml::Error },

    /// A path in the configuration could not be resolved, for example when
    /// it starts with `~` and the home directory is unknown.
    #[snafu(display("Failed to resolve file path {}, error: {source}", file_path.display()))]
    ResolveFilePath { file_path: PathBuf, source: std::io::Error },

    #[snafu(display("Failed to serialize config, error: {source}"))]
    SerializeConfig { source: serde_yaml::Error },
}
