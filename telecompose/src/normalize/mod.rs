//! Conversion of raw service fields into command-line argument values.
//!
//! Every field has its own rule; see [`NormalizedService::from_spec`]. A
//! value whose shape has no rule is an error rather than being dropped.

mod error;
mod field;
mod port;
mod volume;

use std::path::Path;

use snafu::ResultExt;

pub use self::{
    error::Error,
    port::{PortEntry, PublishedPort},
    volume::{MountOption, VolumeEntry},
};
use crate::{compose::ServiceSpec, duration::parse_duration_seconds, path::resolve_path};

/// A service with every field converted to argument values.
///
/// Single-valued fields are `None` when the manifest does not set them, and
/// repeated fields are empty, so absent fields never produce a flag.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NormalizedService {
    pub image: Option<String>,
    pub container_name: Option<String>,

    /// First word of the entrypoint, passed to `--entrypoint`.
    pub entrypoint: Option<String>,

    /// Remaining words of the entrypoint, appended after the image.
    pub entrypoint_args: Vec<String>,

    /// Arguments of `command`, appended after [`Self::entrypoint_args`].
    pub command: Vec<String>,

    pub pid: Option<String>,
    pub stop_timeout_secs: Option<u64>,
    pub stop_signal: Option<String>,
    pub working_dir: Option<String>,

    pub cap_add: Vec<String>,
    pub cap_drop: Vec<String>,
    pub devices: Vec<String>,
    pub dns: Vec<String>,
    pub dns_search: Vec<String>,
    pub env_files: Vec<String>,
    pub environment: Vec<String>,
    pub expose: Vec<String>,
    pub extra_hosts: Vec<String>,
    pub labels: Vec<String>,
    pub ports: Vec<String>,
    pub volumes: Vec<VolumeEntry>,
}

impl NormalizedService {
    /// Normalizes every field of `spec`, resolving host paths against
    /// `manifest_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFieldShape`] for any value with an
    /// unexpected shape, and [`Error::ResolveHostPath`] when a `~` path cannot
    /// be expanded.
    pub fn from_spec(spec: &ServiceSpec, manifest_dir: &Path) -> Result<Self, Error> {
        let mut entrypoint = field::words("entrypoint", spec.entrypoint.as_ref())?.into_iter();

        Ok(Self {
            image: field::optional_scalar("image", spec.image.as_ref())?,
            container_name: field::optional_scalar("container_name", spec.container_name.as_ref())?,
            entrypoint: entrypoint.next(),
            entrypoint_args: entrypoint.collect(),
            command: field::arguments("command", spec.command.as_ref())?,
            pid: field::optional_scalar("pid", spec.pid.as_ref())?,
            stop_timeout_secs: field::optional_scalar(
                "stop_grace_period",
                spec.stop_grace_period.as_ref(),
            )?
            .map(|period| parse_duration_seconds(&period)),
            stop_signal: field::optional_scalar("stop_signal", spec.stop_signal.as_ref())?,
            working_dir: field::optional_scalar("working_dir", spec.working_dir.as_ref())?,
            cap_add: field::scalars("cap_add", &spec.cap_add)?,
            cap_drop: field::scalars("cap_drop", &spec.cap_drop)?,
            devices: field::scalars("devices", &spec.devices)?,
            dns: field::scalars("dns", &spec.dns)?,
            dns_search: field::scalars("dns_search", &spec.dns_search)?,
            env_files: env_files(&spec.env_file, manifest_dir)?,
            environment: field::scalars_or_pairs("environment", &spec.environment, '=')?,
            expose: field::scalars("expose", &spec.expose)?,
            extra_hosts: field::scalars_or_pairs("extra_hosts", &spec.extra_hosts, ':')?,
            labels: field::scalars_or_pairs("labels", &spec.labels, '=')?,
            ports: spec
                .ports
                .iter()
                .map(|port| PortEntry::try_from(port).map(|port| port.to_string()))
                .collect::<Result<_, _>>()?,
            volumes: spec
                .volumes
                .iter()
                .map(|volume| VolumeEntry::parse(volume, manifest_dir))
                .collect::<Result<_, _>>()?,
        })
    }
}

/// Each env file is resolved on its own; files are never merged.
fn env_files(values: &[serde_yaml::Value], manifest_dir: &Path) -> Result<Vec<String>, Error> {
    field::scalars("env_file", values)?
        .iter()
        .map(|env_file| {
            resolve_path(env_file, manifest_dir)
                .map(|path| path.display().to_string())
                .context(error::ResolveHostPathSnafu { field: "env_file" })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_yaml::Mapping;

    use super::*;

    fn normalize(yaml: &str) -> Result<NormalizedService, Error> {
        let entry: Mapping = serde_yaml::from_str(yaml).expect("valid service entry");
        NormalizedService::from_spec(&ServiceSpec::from_mapping(&entry), Path::new("/proj"))
    }

    #[test]
    fn test_empty_service_normalizes_to_nothing() {
        assert_eq!(normalize("{}").unwrap(), NormalizedService::default());
    }

    #[test]
    fn test_entrypoint_sequence_is_split() {
        let service = normalize("entrypoint: [/bin/sh, -c, run.sh]").unwrap();
        assert_eq!(service.entrypoint.as_deref(), Some("/bin/sh"));
        assert_eq!(service.entrypoint_args, vec!["-c", "run.sh"]);
    }

    #[test]
    fn test_entrypoint_string_is_split() {
        let service = normalize("entrypoint: /docker-entrypoint.sh  --verbose").unwrap();
        assert_eq!(service.entrypoint.as_deref(), Some("/docker-entrypoint.sh"));
        assert_eq!(service.entrypoint_args, vec!["--verbose"]);
    }

    #[test]
    fn test_command_words() {
        let service = normalize("command: bundle exec rails s").unwrap();
        assert_eq!(service.command, vec!["bundle", "exec", "rails", "s"]);
        assert!(service.entrypoint.is_none());
    }

    #[test]
    fn test_command_sequence_keeps_argument_boundaries() {
        let service = normalize("command: [sh, -c, 'sleep 1 && echo hi']").unwrap();
        assert_eq!(service.command, vec!["sh", "-c", "sleep 1 && echo hi"]);
    }

    #[test]
    fn test_stop_grace_period_in_seconds() {
        assert_eq!(normalize("stop_grace_period: 1m30s").unwrap().stop_timeout_secs, Some(90));
        assert_eq!(normalize("stop_grace_period: 20").unwrap().stop_timeout_secs, Some(20));
        assert_eq!(normalize("image: nginx").unwrap().stop_timeout_secs, None);
    }

    #[test]
    fn test_env_files_are_resolved_individually() {
        let service = normalize("env_file: [./common.env, ../secrets.env, /etc/app.env]").unwrap();
        assert_eq!(service.env_files, vec!["/proj/common.env", "/secrets.env", "/etc/app.env"]);

        let service = normalize("env_file: .env").unwrap();
        assert_eq!(service.env_files, vec!["/proj/.env"]);
    }

    #[test]
    fn test_ports_are_rendered() {
        let service =
            normalize("ports: ['8080:80', {published: 8443, target: 443, protocol: tcp}]").unwrap();
        assert_eq!(service.ports, vec!["8080:80", "8443:443/tcp"]);
    }

    #[test]
    fn test_extra_hosts_mapping_uses_colon() {
        let service = normalize("extra_hosts:\n  somehost: 162.242.195.82\n").unwrap();
        assert_eq!(service.extra_hosts, vec!["somehost:162.242.195.82"]);
    }

    #[test]
    fn test_shape_error_names_the_field() {
        let err = normalize("ports: [8080]").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unsupported value for `ports`: expected a port string or a port mapping, found number"
        );

        let err = normalize("image: [nginx]").unwrap_err();
        assert!(matches!(err, Error::UnsupportedFieldShape { field: "image", .. }));
    }
}
