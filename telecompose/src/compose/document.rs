use std::path::{Path, PathBuf};

use resolve_path::PathResolveExt;
use serde_yaml::{Mapping, Value};
use snafu::{OptionExt, ResultExt};

use crate::{
    compose::{Error, ServiceSpec, error},
    consts::compose as fields,
    ext::ValueExt,
};

/// A parsed compose manifest.
///
/// The document is read once and never modified. Service order follows the
/// manifest, since `serde_yaml` mappings preserve insertion order.
#[derive(Clone, Debug)]
pub struct ComposeDocument {
    manifest_path: PathBuf,
    manifest_dir: PathBuf,
    services: Mapping,
    top_level_keys: Vec<String>,
}

impl ComposeDocument {
    /// Reads and parses the manifest at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be resolved, the file cannot be
    /// read, its content is not YAML, or it has no `services` mapping.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let manifest_path = path
            .try_resolve()
            .map(|path| path.to_path_buf())
            .context(error::ResolveManifestPathSnafu { file_path: path.to_path_buf() })?;
        let data = std::fs::read(&manifest_path)
            .context(error::OpenManifestSnafu { filename: manifest_path.clone() })?;
        Self::from_slice(&data, manifest_path)
    }

    /// Parses manifest content. `manifest_path` locates the manifest on disk;
    /// relative host paths in the manifest are resolved against its parent
    /// directory. It should be absolute.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` is not YAML or has no `services` mapping.
    pub fn from_slice<P: Into<PathBuf>>(data: &[u8], manifest_path: P) -> Result<Self, Error> {
        let manifest_path = crate::path::normalize_lexically(&manifest_path.into());
        let mut document: Value = serde_yaml::from_slice(data)
            .context(error::ParseManifestSnafu { filename: manifest_path.clone() })?;
        document
            .apply_merge()
            .context(error::ParseManifestSnafu { filename: manifest_path.clone() })?;

        let top_level_keys = document
            .as_mapping()
            .map(|mapping| mapping.keys().filter_map(Value::as_str).map(str::to_string).collect())
            .unwrap_or_default();
        let services = document
            .get("services")
            .and_then(Value::as_mapping)
            .cloned()
            .context(error::MissingServicesSnafu { filename: manifest_path.clone() })?;
        let manifest_dir =
            manifest_path.parent().map_or_else(|| PathBuf::from("/"), Path::to_path_buf);

        Ok(Self { manifest_path, manifest_dir, services, top_level_keys })
    }

    #[must_use]
    pub fn manifest_path(&self) -> &Path { &self.manifest_path }

    /// The directory relative host paths are resolved against.
    #[must_use]
    pub fn manifest_dir(&self) -> &Path { &self.manifest_dir }

    /// Names of the declared services, in manifest order.
    pub fn service_names(&self) -> impl Iterator<Item = &str> {
        self.services.keys().filter_map(Value::as_str)
    }

    /// Top-level keys without a translation, such as named `volumes` or
    /// `x-` extensions.
    #[must_use]
    pub fn unsupported_top_level_fields(&self) -> Vec<&str> {
        self.top_level_keys
            .iter()
            .map(String::as_str)
            .filter(|key| {
                fields::UNSUPPORTED_TOP_LEVEL_FIELDS.contains(key)
                    || key.starts_with(fields::EXTENSION_PREFIX)
            })
            .collect()
    }

    /// Extracts the service named exactly `service_name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ServiceNotFound`] listing the declared services when
    /// there is no such service, or [`Error::InvalidServiceEntry`] when the
    /// entry is neither a mapping nor empty.
    pub fn service(&self, service_name: &str) -> Result<ServiceSpec, Error> {
        let entry = self.services.get(service_name).with_context(|| {
            error::ServiceNotFoundSnafu {
                service_name,
                known_services: self.service_names().collect::<Vec<_>>().join(", "),
            }
        })?;

        match entry {
            Value::Mapping(entry) => Ok(ServiceSpec::from_mapping(entry)),
            Value::Null => Ok(ServiceSpec::default()),
            other => error::InvalidServiceEntrySnafu { service_name, found: other.kind() }.fail(),
        }
    }
}
