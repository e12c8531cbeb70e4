use std::path::Path;

use serde_yaml::{Mapping, Value};
use snafu::ResultExt;

use crate::{
    consts::docker::flags,
    ext::ValueExt,
    normalize::{Error, error, field},
    path::resolve_path,
};

const FIELD: &str = "volumes";

/// One entry of a service's `volumes` list, with host paths already resolved.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum VolumeEntry {
    /// The short syntax `SOURCE:TARGET[:MODE]`, passed to `-v`.
    Short(String),

    /// The long syntax, flattened into `--mount` options in declared order.
    Long(Vec<MountOption>),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MountOption {
    pub key: String,
    pub value: Option<String>,
}

impl MountOption {
    fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { key: key.into(), value: Some(value.into()) }
    }
}

impl VolumeEntry {
    /// Parses an entry, resolving its host path against `manifest_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error for entries that are neither a string nor a mapping,
    /// for option values that are not scalars, and when a `~` path cannot be
    /// expanded.
    pub fn parse(value: &Value, manifest_dir: &Path) -> Result<Self, Error> {
        match value {
            Value::String(volume) => short_syntax(volume, manifest_dir).map(Self::Short),
            Value::Mapping(mapping) => long_syntax(mapping, manifest_dir).map(Self::Long),
            other => error::UnsupportedFieldShapeSnafu {
                field: FIELD,
                expected: "a volume string or a mount mapping",
                found: other.kind(),
            }
            .fail(),
        }
    }

    #[must_use]
    pub const fn flag(&self) -> &'static str {
        match self {
            Self::Short(_) => flags::VOLUME,
            Self::Long(_) => flags::MOUNT,
        }
    }

    /// The argument that follows [`Self::flag`].
    #[must_use]
    pub fn value(&self) -> String {
        match self {
            Self::Short(volume) => volume.clone(),
            Self::Long(options) => options
                .iter()
                .map(|MountOption { key, value }| {
                    value.as_ref().map_or_else(|| key.clone(), |value| format!("{key}={value}"))
                })
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

/// Host sources starting with `.`, `/` or `~` are paths; anything else is a
/// named volume and stays as written.
fn short_syntax(volume: &str, manifest_dir: &Path) -> Result<String, Error> {
    let Some((source, rest)) = volume.split_once(':') else {
        return Ok(volume.to_string());
    };
    if !source.starts_with(['.', '/', '~']) {
        return Ok(volume.to_string());
    }
    let source =
        resolve_path(source, manifest_dir).context(error::ResolveHostPathSnafu { field: FIELD })?;
    Ok(format!("{}:{rest}", source.display()))
}

fn long_syntax(mapping: &Mapping, manifest_dir: &Path) -> Result<Vec<MountOption>, Error> {
    let mut options = Vec::with_capacity(mapping.len());
    for (key, value) in mapping {
        let key = field::scalar(FIELD, key)?;
        match (key.as_str(), value) {
            ("read_only" | "readOnly", value) => {
                options.push(MountOption::new("readonly", mount_value(value)?));
            }
            ("source", value) => {
                let source = resolve_path(&field::scalar(FIELD, value)?, manifest_dir)
                    .context(error::ResolveHostPathSnafu { field: FIELD })?;
                options.push(MountOption::new("source", source.display().to_string()));
            }
            (_, Value::Mapping(nested)) => {
                for (nested_key, nested_value) in nested {
                    let nested_key = field::scalar(FIELD, nested_key)?;
                    if key == "tmpfs" && nested_key == "mode" {
                        tracing::warn!(
                            "Volume option `tmpfs-mode` is not supported and will be ignored"
                        );
                        continue;
                    }
                    options.push(MountOption {
                        key: format!("{key}-{nested_key}"),
                        value: optional_mount_value(nested_value)?,
                    });
                }
            }
            (_, value) => options.push(MountOption { key, value: optional_mount_value(value)? }),
        }
    }
    Ok(options)
}

/// Mount option values; booleans are capitalized, which the container
/// runtime's option parser accepts.
fn mount_value(value: &Value) -> Result<String, Error> {
    match value {
        Value::Bool(true) => Ok("True".to_string()),
        Value::Bool(false) => Ok("False".to_string()),
        value => field::scalar(FIELD, value),
    }
}

fn optional_mount_value(value: &Value) -> Result<Option<String>, Error> {
    match value {
        Value::Null => Ok(None),
        value => mount_value(value).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn volume(yaml: &str) -> Result<VolumeEntry, Error> {
        let value: Value = serde_yaml::from_str(yaml).expect("valid YAML");
        VolumeEntry::parse(&value, Path::new("/proj"))
    }

    #[test]
    fn test_long_syntax_keeps_declared_order() {
        let entry = volume("{type: bind, source: ./x, target: /y, read_only: true}").unwrap();
        assert_eq!(entry.flag(), "--mount");
        assert_eq!(entry.value(), "type=bind,source=/proj/x,target=/y,readonly=True");
    }

    #[test]
    fn test_long_syntax_order_is_not_sorted() {
        let entry = volume("{target: /y, read_only: false, type: bind, source: ./x}").unwrap();
        assert_eq!(entry.value(), "target=/y,readonly=False,type=bind,source=/proj/x");
    }

    #[test]
    fn test_long_syntax_flattens_nested_options() {
        let entry = volume(
            "{type: bind, source: /srv, target: /srv, bind: {propagation: rshared}, consistency: \
             cached}",
        )
        .unwrap();
        assert_eq!(
            entry.value(),
            "type=bind,source=/srv,target=/srv,bind-propagation=rshared,consistency=cached"
        );

        let entry = volume("{type: volume, source: data, target: /data, volume: {nocopy: true}}")
            .unwrap();
        assert_eq!(entry.value(), "type=volume,source=/proj/data,target=/data,volume-nocopy=True");

        let entry = volume("{type: tmpfs, target: /tmp, tmpfs: {size: 1000}}").unwrap();
        assert_eq!(entry.value(), "type=tmpfs,target=/tmp,tmpfs-size=1000");
    }

    #[test]
    fn test_camel_case_read_only() {
        let entry = volume("{type: bind, source: ./x, target: /y, readOnly: true}").unwrap();
        assert_eq!(entry.value(), "type=bind,source=/proj/x,target=/y,readonly=True");
    }

    #[test]
    fn test_tmpfs_mode_is_skipped() {
        let entry = volume("{type: tmpfs, target: /t, tmpfs: {mode: 1777, size: 1000}}").unwrap();
        assert_eq!(entry.value(), "type=tmpfs,target=/t,tmpfs-size=1000");
    }

    #[test]
    fn test_short_syntax_resolves_host_paths() {
        let entry = volume("./data:/var/lib/data:ro").unwrap();
        assert_eq!(entry.flag(), "-v");
        assert_eq!(entry.value(), "/proj/data:/var/lib/data:ro");

        let entry = volume("../cache:/cache").unwrap();
        assert_eq!(entry.value(), "/cache:/cache");
    }

    #[test]
    fn test_short_syntax_keeps_named_and_anonymous_volumes() {
        assert_eq!(volume("data:/var/lib/data").unwrap().value(), "data:/var/lib/data");
        assert_eq!(volume("/var/lib/data").unwrap().value(), "/var/lib/data");
    }

    #[test]
    fn test_other_shapes_are_rejected() {
        assert!(matches!(volume("42"), Err(Error::UnsupportedFieldShape { found: "number", .. })));
        assert!(matches!(
            volume("{type: bind, source: [a, b]}"),
            Err(Error::UnsupportedFieldShape { field: "volumes", found: "sequence", .. })
        ));
    }
}
