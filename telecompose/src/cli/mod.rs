//! The `telecompose` command line.
//!
//! Without a subcommand it translates one service of a docker-compose
//! manifest into a Telepresence invocation and prints it.
//!
//! # Examples
//!
//! ```bash
//! # Print the command for the `web` service
//! telecompose -s web -c staging docker-compose.yml
//!
//! # Swap the existing `web` deployment and run the command right away
//! telecompose -s web -c staging --swap --execute docker-compose.yml
//!
//! # List the services of a manifest
//! telecompose services docker-compose.yml
//! ```

pub mod error;
mod services;
mod translate;

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use clap::{CommandFactory, Parser, Subcommand};
use snafu::ResultExt;
use telecompose::consts::compose::UNSUPPORTED_FEATURES_HELP;
use telecompose_base::CLI_PROGRAM_NAME;

pub use self::error::Error;
use self::{services::ServicesCommand, translate::TranslateCommand};
use crate::{config::Config, shadow};

/// `Cli` is the main entry point of the telecompose command line.
#[derive(Parser)]
#[command(
    name = CLI_PROGRAM_NAME,
    author,
    version,
    long_version = shadow::CLAP_LONG_VERSION,
    about = "Run a single docker-compose service locally through Telepresence.",
    long_about = "Translates one service of a docker-compose manifest into the equivalent \
                  `telepresence --method container ... --docker-run ...` invocation, so the \
                  service runs on the developer's machine while taking part in a remote \
                  Kubernetes cluster.",
    after_long_help = UNSUPPORTED_FEATURES_HELP,
    subcommand_negates_reqs = true,
    color = clap::ColorChoice::Always
)]
pub struct Cli {
    #[clap(subcommand)]
    commands: Option<Commands>,

    #[command(flatten)]
    translate: TranslateCommand,

    /// Path to the configuration file.
    #[clap(
        long = "config",
        env = "TELECOMPOSE_CONFIG_FILE_PATH",
        global = true,
        help = "Specify a configuration file. Defaults to ~/.config/telecompose/config.yaml or \
                TELECOMPOSE_CONFIG_FILE_PATH env var."
    )]
    config_file: Option<PathBuf>,

    #[clap(
        long = "log-level",
        env = "TELECOMPOSE_LOG_LEVEL",
        global = true,
        help = "Set the logging level (e.g., info, debug, trace)."
    )]
    log_level: Option<tracing::Level>,
}

#[derive(Clone, Subcommand)]
pub enum Commands {
    #[command(about = "Display version information")]
    Version,

    #[command(about = "Generate shell completion script for the specified shell (bash, zsh, fish)")]
    Completions {
        shell: clap_complete::Shell,

        #[clap(
            long = "output",
            short = 'o',
            help = "Write the script to this file instead of stdout."
        )]
        output: Option<PathBuf>,
    },

    #[command(about = "Output the default configuration in YAML format")]
    DefaultConfig,

    #[command(alias = "ls", about = "List the services of a docker-compose manifest")]
    Services(ServicesCommand),
}

impl Default for Cli {
    fn default() -> Self { Self::parse() }
}

impl Cli {
    /// Loads the configuration from `--config`, or from the searched default
    /// location, and applies the `--log-level` override.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be read or parsed.
    fn load_config(&self) -> Result<Config, Error> {
        let mut config = match self.config_file {
            Some(ref path) => Config::load(path)?,
            None => Config::load_or_default()?,
        };

        if let Some(log_level) = self.log_level {
            config.log.level = log_level;
        }

        Ok(config)
    }

    /// Dispatches to the selected subcommand, or translates the service.
    ///
    /// # Returns
    ///
    /// The process exit code: 0 on success, or the child's exit code when
    /// the command is executed.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading fails or the subcommand
    /// fails.
    pub fn run(self) -> Result<i32, Error> {
        match self.commands {
            Some(Commands::Version) => {
                std::io::stdout()
                    .write_all(Self::command().render_long_version().as_bytes())
                    .context(error::WriteStdoutSnafu)?;
                return Ok(0);
            }
            Some(Commands::Completions { shell, ref output }) => {
                return Self::generate_completions(shell, output.as_deref());
            }
            Some(Commands::DefaultConfig) => {
                std::io::stdout()
                    .write_all(Config::template_basic()?.as_bytes())
                    .context(error::WriteStdoutSnafu)?;
                return Ok(0);
            }
            _ => {}
        }

        let config = self.load_config()?;
        config.log.registry();

        match self.commands {
            Some(Commands::Services(cmd)) => cmd.run(),
            _ => self.translate.run(&config),
        }
    }

    fn generate_completions(
        shell: clap_complete::Shell,
        output: Option<&Path>,
    ) -> Result<i32, Error> {
        let mut app = Self::command();
        let bin_name = app.get_name().to_string();
        match output {
            Some(file_path) => {
                let mut file = std::fs::File::create(file_path).with_context(|_| {
                    error::CreateCompletionScriptSnafu { file_path: file_path.to_path_buf() }
                })?;
                clap_complete::generate(shell, &mut app, bin_name, &mut file);
            }
            None => clap_complete::generate(shell, &mut app, bin_name, &mut std::io::stdout()),
        }
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_definition_is_valid() { Cli::command().debug_assert(); }

    #[test]
    fn test_translate_arguments() {
        let cli =
            Cli::try_parse_from(["telecompose", "-s", "web", "-c", "staging", "-S", "compose.yml"])
                .unwrap();
        assert!(cli.commands.is_none());
        assert_eq!(cli.translate.service.as_deref(), Some("web"));
        assert_eq!(cli.translate.context.as_deref(), Some("staging"));
        assert!(cli.translate.swap);
        assert!(!cli.translate.publish_ports);
        assert_eq!(cli.translate.manifest, Some(PathBuf::from("compose.yml")));
    }

    #[test]
    fn test_translate_requires_service_and_context() {
        assert!(Cli::try_parse_from(["telecompose", "-c", "staging", "compose.yml"]).is_err());
        assert!(Cli::try_parse_from(["telecompose", "-s", "web", "compose.yml"]).is_err());
        assert!(Cli::try_parse_from(["telecompose", "-s", "web", "-c", "staging"]).is_err());
    }

    #[test]
    fn test_subcommands_do_not_require_translate_arguments() {
        let cli = Cli::try_parse_from(["telecompose", "services", "compose.yml"]).unwrap();
        assert!(matches!(cli.commands, Some(Commands::Services(_))));

        let cli = Cli::try_parse_from(["telecompose", "default-config"]).unwrap();
        assert!(matches!(cli.commands, Some(Commands::DefaultConfig)));
    }

    #[test]
    fn test_global_log_level() {
        let cli =
            Cli::try_parse_from(["telecompose", "services", "compose.yml", "--log-level", "debug"])
                .unwrap();
        assert_eq!(cli.log_level, Some(tracing::Level::DEBUG));
    }
}
