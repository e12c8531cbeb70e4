//! Assembly of the final Telepresence invocation.

use std::{borrow::Cow, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    consts::{docker, telepresence},
    normalize::NormalizedService,
};

/// Options gathered from the command line for one run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RunConfig {
    pub service_name: String,
    pub cluster_context: String,

    /// Swap the existing deployment named after the service instead of
    /// creating a new one.
    pub swap: bool,

    pub manifest_path: PathBuf,

    /// Also publish `ports` on the container with `-p`. Ports are always
    /// exposed through the proxy.
    pub publish_ports: bool,
}

/// Proxy-level settings that do not come from the manifest.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyConfig {
    #[serde(default = "ProxyConfig::default_program")]
    pub program: String,

    #[serde(default = "ProxyConfig::default_new_deployment_prefix")]
    pub new_deployment_prefix: String,

    #[serde(default = "ProxyConfig::default_env_file")]
    pub env_file: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            program: Self::default_program(),
            new_deployment_prefix: Self::default_new_deployment_prefix(),
            env_file: Self::default_env_file(),
        }
    }
}

impl ProxyConfig {
    #[inline]
    #[must_use]
    pub fn default_program() -> String { telepresence::DEFAULT_PROGRAM.to_string() }

    #[inline]
    #[must_use]
    pub fn default_new_deployment_prefix() -> String {
        telepresence::DEFAULT_NEW_DEPLOYMENT_PREFIX.to_string()
    }

    #[inline]
    #[must_use]
    pub fn default_env_file() -> String { telepresence::DEFAULT_ENV_FILE.to_string() }
}

/// Lays out the arguments of the invocation in their fixed order, starting
/// with the program name.
///
/// Proxy flags come first, followed by `--docker-run` and the container
/// flags, the image and finally the entrypoint arguments and command. A
/// missing image leaves the command incomplete; it is still returned so the
/// caller can inspect it.
#[must_use]
pub fn assemble(
    run_config: &RunConfig,
    proxy_config: &ProxyConfig,
    service: &NormalizedService,
) -> Vec<String> {
    let RunConfig { service_name, cluster_context, swap, manifest_path, publish_ports } = run_config;
    let mut args = vec![proxy_config.program.clone()];

    push_flag(&mut args, telepresence::flags::METHOD, telepresence::METHOD_CONTAINER);
    push_flag(&mut args, telepresence::flags::CONTEXT, cluster_context);
    if *swap {
        push_flag(&mut args, telepresence::flags::SWAP_DEPLOYMENT, service_name);
    } else {
        push_flag(
            &mut args,
            telepresence::flags::NEW_DEPLOYMENT,
            format!("{}{service_name}", proxy_config.new_deployment_prefix),
        );
    }
    push_each(&mut args, telepresence::flags::EXPOSE, &service.ports);
    push_flag(&mut args, telepresence::flags::MOUNT, "false");
    push_flag(&mut args, telepresence::flags::ENV_FILE, &proxy_config.env_file);

    args.push(telepresence::flags::DOCKER_RUN.to_string());
    args.extend(docker::EPHEMERAL_INTERACTIVE.iter().map(ToString::to_string));

    let NormalizedService {
        image,
        container_name,
        entrypoint,
        entrypoint_args,
        command,
        pid,
        stop_timeout_secs,
        stop_signal,
        working_dir,
        cap_add,
        cap_drop,
        devices,
        dns,
        dns_search,
        env_files,
        environment,
        expose,
        extra_hosts,
        labels,
        ports,
        volumes,
    } = service;

    push_optional(&mut args, docker::flags::NAME, container_name.as_deref());
    push_optional(&mut args, docker::flags::ENTRYPOINT, entrypoint.as_deref());
    push_optional(&mut args, docker::flags::PID, pid.as_deref());
    if let Some(stop_timeout_secs) = stop_timeout_secs {
        push_flag(&mut args, docker::flags::STOP_TIMEOUT, stop_timeout_secs.to_string());
    }
    push_optional(&mut args, docker::flags::STOP_SIGNAL, stop_signal.as_deref());
    push_optional(&mut args, docker::flags::WORKDIR, working_dir.as_deref());

    push_each(&mut args, docker::flags::CAP_ADD, cap_add);
    push_each(&mut args, docker::flags::CAP_DROP, cap_drop);
    push_each(&mut args, docker::flags::DEVICE, devices);
    push_each(&mut args, docker::flags::DNS, dns);
    push_each(&mut args, docker::flags::DNS_SEARCH, dns_search);
    push_each(&mut args, docker::flags::ENV_FILE, env_files);
    push_each(&mut args, docker::flags::ENV, environment);
    push_each(&mut args, docker::flags::EXPOSE, expose);
    push_each(&mut args, docker::flags::ADD_HOST, extra_hosts);
    push_each(&mut args, docker::flags::LABEL, labels);
    if *publish_ports {
        push_each(&mut args, docker::flags::PUBLISH, ports);
    }
    for volume in volumes {
        push_flag(&mut args, volume.flag(), volume.value());
    }

    match image {
        Some(image) => args.push(image.clone()),
        None => tracing::warn!(
            "Service {service_name} in {} has no `image`, the command is incomplete",
            manifest_path.display()
        ),
    }

    args.extend(entrypoint_args.iter().cloned());
    args.extend(command.iter().cloned());
    args
}

/// Joins arguments with single spaces, quoting those that a POSIX shell
/// would otherwise split or expand.
///
/// Ports, image tags and mount options stay bare: `:`, `@` and `%` carry no
/// meaning to the shell.
#[must_use]
pub fn render<S: AsRef<str>>(args: &[S]) -> String {
    args.iter()
        .map(|arg| {
            let arg = arg.as_ref();
            if !arg.is_empty() && arg.chars().all(is_shell_safe) {
                Cow::Borrowed(arg)
            } else {
                shell_escape::escape(Cow::Borrowed(arg))
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

const fn is_shell_safe(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
        || matches!(ch, '-' | '_' | '=' | '/' | ',' | '.' | '+' | ':' | '@' | '%')
}

fn push_flag(args: &mut Vec<String>, flag: &str, value: impl Into<String>) {
    args.push(flag.to_string());
    args.push(value.into());
}

fn push_optional(args: &mut Vec<String>, flag: &str, value: Option<&str>) {
    if let Some(value) = value {
        push_flag(args, flag, value);
    }
}

fn push_each(args: &mut Vec<String>, flag: &str, values: &[String]) {
    for value in values {
        push_flag(args, flag, value.as_str());
    }
}
