use std::path::PathBuf;

use snafu::Snafu;

/// Errors raised while reading a manifest or looking up a service in it.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Failed to resolve manifest path {}, error: {source}", file_path.display()))]
    ResolveManifestPath { file_path: PathBuf, source: std::io::Error },

    #[snafu(display("Failed to open manifest {}, error: {source}", filename.display()))]
    OpenManifest { filename: PathBuf, source: std::io::Error },

    #[snafu(display("Failed to parse manifest {}, error: {source}", filename.display()))]
    ParseManifest { filename: PathBuf, source: serde_yaml::Error },

    #[snafu(display("Manifest {} has no top-level `services` mapping", filename.display()))]
    MissingServices { filename: PathBuf },

    /// The requested service is not declared. `known_services` lists every
    /// declared service so that the caller can correct the name.
    #[snafu(display("Service {service_name} not found, known services: [{known_services}]"))]
    ServiceNotFound { service_name: String, known_services: String },

    #[snafu(display("Service {service_name} must be a mapping, found {found}"))]
    InvalidServiceEntry { service_name: String, found: &'static str },
}
