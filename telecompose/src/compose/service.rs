use serde_yaml::{Mapping, Value};

use crate::{consts::compose as fields, ext::ValueExt};

/// The fields of one compose service entry that have a Telepresence
/// translation.
///
/// Values are kept as raw YAML: checking their shape is the normalizer's job,
/// so extracting a declared service never fails. Absent fields take the
/// defaults below and contribute nothing to the command:
///
/// - single-valued fields are `None`;
/// - repeated fields are empty. A repeated field written as a lone scalar or
///   mapping instead of a list is read as a one-element list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ServiceSpec {
    pub entrypoint: Option<Value>,
    pub command: Option<Value>,
    pub image: Option<Value>,
    pub container_name: Option<Value>,
    pub pid: Option<Value>,
    pub stop_grace_period: Option<Value>,
    pub stop_signal: Option<Value>,
    pub working_dir: Option<Value>,

    pub cap_add: Vec<Value>,
    pub cap_drop: Vec<Value>,
    pub devices: Vec<Value>,
    pub dns: Vec<Value>,
    pub dns_search: Vec<Value>,
    pub env_file: Vec<Value>,
    pub environment: Vec<Value>,
    pub expose: Vec<Value>,
    pub extra_hosts: Vec<Value>,
    pub labels: Vec<Value>,
    pub ports: Vec<Value>,
    pub volumes: Vec<Value>,

    /// Keys present on the entry that are on the unsupported list.
    pub unsupported_fields: Vec<String>,

    /// Keys present on the entry that are refused by policy, with the reason.
    pub refused_fields: Vec<(String, &'static str)>,

    /// Keys whose values use `${...}` substitution, which is passed through
    /// verbatim.
    pub interpolated_fields: Vec<String>,
}

impl ServiceSpec {
    /// Reads every recognized field of a service entry. Unrecognized keys are
    /// ignored.
    #[must_use]
    pub fn from_mapping(entry: &Mapping) -> Self {
        let mut unsupported_fields = Vec::new();
        let mut refused_fields = Vec::new();
        let mut interpolated_fields = Vec::new();
        for (key, value) in entry {
            let Some(key) = key.as_str() else {
                continue;
            };
            if fields::UNSUPPORTED_SERVICE_FIELDS.contains(&key) {
                unsupported_fields.push(key.to_string());
            } else if let Some((_, reason)) =
                fields::REFUSED_SERVICE_FIELDS.iter().find(|(refused, _)| *refused == key)
            {
                refused_fields.push((key.to_string(), *reason));
            } else if value.contains_interpolation() {
                interpolated_fields.push(key.to_string());
            }
        }

        Self {
            entrypoint: single(entry, "entrypoint"),
            command: single(entry, "command"),
            image: single(entry, "image"),
            container_name: single(entry, "container_name"),
            pid: single(entry, "pid"),
            stop_grace_period: single(entry, "stop_grace_period"),
            stop_signal: single(entry, "stop_signal"),
            working_dir: single(entry, "working_dir"),
            cap_add: repeated(entry, "cap_add"),
            cap_drop: repeated(entry, "cap_drop"),
            devices: repeated(entry, "devices"),
            dns: repeated(entry, "dns"),
            dns_search: repeated(entry, "dns_search"),
            env_file: repeated(entry, "env_file"),
            environment: repeated(entry, "environment"),
            expose: repeated(entry, "expose"),
            extra_hosts: repeated(entry, "extra_hosts"),
            labels: repeated(entry, "labels"),
            ports: repeated(entry, "ports"),
            volumes: repeated(entry, "volumes"),
            unsupported_fields,
            refused_fields,
            interpolated_fields,
        }
    }
}

fn single(entry: &Mapping, key: &str) -> Option<Value> {
    entry.get(key).filter(|value| !value.is_null()).cloned()
}

fn repeated(entry: &Mapping, key: &str) -> Vec<Value> {
    match entry.get(key) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Sequence(values)) => values.clone(),
        Some(value) => vec![value.clone()],
    }
}
