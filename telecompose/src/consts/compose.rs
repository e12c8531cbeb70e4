//! docker-compose keys that are never translated.

/// Service keys with no Telepresence translation yet. They are not read; the
/// CLI warns when one of them is set on the selected service.
pub const UNSUPPORTED_SERVICE_FIELDS: &[&str] = &[
    "build",
    "cgroup_parent",
    "credential_spec",
    "depends_on",
    "deploy",
    "external_links",
    "healthcheck",
    "init",
    "isolation",
    "logging",
    "network_mode",
    "networks",
    "secrets",
    "security_opt",
    "sysctls",
    "tmpfs",
    "ulimits",
    "userns_mode",
    "domainname",
    "hostname",
    "ipc",
    "mac_address",
    "privileged",
    "read_only",
    "shm_size",
    "stdin_open",
    "tty",
    "user",
];

/// Service keys refused by policy, paired with the reason shown to the user.
pub const REFUSED_SERVICE_FIELDS: &[(&str, &str)] = &[
    ("links", "links are deprecated, use service names on a shared network"),
    ("restart", "restart policies conflict with the ephemeral `--rm` container"),
];

/// Top-level keys with no translation. Keys starting with
/// [`EXTENSION_PREFIX`] are reported as well.
pub const UNSUPPORTED_TOP_LEVEL_FIELDS: &[&str] = &["volumes", "networks", "secrets", "configs"];

pub const EXTENSION_PREFIX: &str = "x-";

pub const UNSUPPORTED_FEATURES_HELP: &str = "\
Unsupported docker-compose features (ignored with a warning):
  service keys: build, cgroup_parent, credential_spec, depends_on, deploy, external_links,
    healthcheck, init, isolation, logging, network_mode, networks, secrets,
    security_opt, sysctls, tmpfs, ulimits, userns_mode, domainname, hostname, ipc,
    mac_address, privileged, read_only, shm_size, stdin_open, tty, user
  top-level keys: volumes, networks, secrets, configs, x-* extensions
  variable substitution (${VAR}) and the volume tmpfs-mode option

Refused by policy:
  links: deprecated functionality
  restart: conflicts with --rm";
