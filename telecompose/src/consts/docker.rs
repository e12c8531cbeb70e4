//! Container runtime flags passed after `--docker-run`.

/// Flags requesting an interactive container that is removed on exit.
pub const EPHEMERAL_INTERACTIVE: [&str; 2] = ["--rm", "-it"];

pub mod flags {
    pub const NAME: &str = "--name";
    pub const ENTRYPOINT: &str = "--entrypoint";
    pub const PID: &str = "--pid";
    pub const STOP_TIMEOUT: &str = "--stop-timeout";
    pub const STOP_SIGNAL: &str = "--stop-signal";
    pub const WORKDIR: &str = "--workdir";

    pub const CAP_ADD: &str = "--cap-add";
    pub const CAP_DROP: &str = "--cap-drop";
    pub const DEVICE: &str = "--device";
    pub const DNS: &str = "--dns";
    pub const DNS_SEARCH: &str = "--dns-search";
    pub const ENV_FILE: &str = "--env-file";
    pub const ENV: &str = "-e";
    pub const EXPOSE: &str = "--expose";
    pub const ADD_HOST: &str = "--add-host";
    pub const LABEL: &str = "-l";
    pub const PUBLISH: &str = "-p";
    pub const VOLUME: &str = "-v";
    pub const MOUNT: &str = "--mount";
}
