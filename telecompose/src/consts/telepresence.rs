//! Telepresence program defaults and proxy-level flags.

/// The proxy program placed at the head of every command.
pub const DEFAULT_PROGRAM: &str = "telepresence";

/// Prefix prepended to the service name when a new deployment is created.
pub const DEFAULT_NEW_DEPLOYMENT_PREFIX: &str = "tele-";

/// Environment file Telepresence writes the remote environment into. It is
/// expected to exist in the working directory; it is never created here.
pub const DEFAULT_ENV_FILE: &str = "telepresence-env-file.env.tmp";

pub const METHOD_CONTAINER: &str = "container";

pub mod flags {
    pub const METHOD: &str = "--method";
    pub const CONTEXT: &str = "--context";
    pub const SWAP_DEPLOYMENT: &str = "--swap-deployment";
    pub const NEW_DEPLOYMENT: &str = "--new-deployment";
    pub const EXPOSE: &str = "--expose";
    pub const MOUNT: &str = "--mount";
    pub const ENV_FILE: &str = "--env-file";
    pub const DOCKER_RUN: &str = "--docker-run";
}
