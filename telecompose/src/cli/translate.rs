use std::{io::Write, path::PathBuf};

use clap::{Args, ValueEnum};
use serde::Serialize;
use snafu::{OptionExt, ResultExt};
use telecompose::{
    command::{self, RunConfig},
    compose::{ComposeDocument, ServiceSpec},
    consts::COMMAND_LABEL,
    normalize::NormalizedService,
};

use crate::{
    cli::{Error, error},
    config::Config,
};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Serialize)]
struct CommandOutput<'a> {
    program: &'a str,
    arguments: &'a [String],
    command: &'a str,
}

#[derive(Args, Clone)]
pub struct TranslateCommand {
    #[arg(
        long = "service",
        short = 's',
        required = true,
        help = "Name of the docker-compose service to run"
    )]
    pub service: Option<String>,

    #[arg(
        long = "context",
        short = 'c',
        required = true,
        help = "Kubernetes context to run the service in"
    )]
    pub context: Option<String>,

    #[arg(
        long = "swap",
        short = 'S',
        help = "Swap the existing deployment named after the service instead of creating a new \
                one"
    )]
    pub swap: bool,

    #[arg(
        long = "publish-ports",
        short = 'P',
        help = "Also publish the service ports on the container with -p"
    )]
    pub publish_ports: bool,

    #[arg(
        long = "output",
        short = 'o',
        value_enum,
        default_value_t = OutputFormat::Text,
        help = "Output format of the assembled command"
    )]
    pub output: OutputFormat,

    #[arg(long = "execute", help = "Run the assembled command instead of only printing it")]
    pub execute: bool,

    #[arg(required = true, value_name = "MANIFEST", help = "Path to the docker-compose manifest")]
    pub manifest: Option<PathBuf>,
}

impl TranslateCommand {
    pub fn run(self, config: &Config) -> Result<i32, Error> {
        let Self { service, context, swap, publish_ports, output, execute, manifest } = self;
        let service_name = service.context(error::MissingArgumentSnafu { name: "--service" })?;
        let cluster_context = context.context(error::MissingArgumentSnafu { name: "--context" })?;
        let manifest = manifest.context(error::MissingArgumentSnafu { name: "MANIFEST" })?;
        if cluster_context.trim().is_empty() {
            return error::MissingContextSnafu.fail();
        }

        let document = ComposeDocument::load(&manifest)?;
        for field in document.unsupported_top_level_fields() {
            tracing::warn!("Top-level `{field}` is not supported and will be ignored");
        }

        let spec = document.service(&service_name)?;
        warn_skipped_fields(&service_name, &spec);

        let service = NormalizedService::from_spec(&spec, document.manifest_dir())?;

        let run_config = RunConfig {
            service_name,
            cluster_context,
            swap,
            manifest_path: document.manifest_path().to_path_buf(),
            publish_ports,
        };
        let args = command::assemble(&run_config, &config.proxy, &service);
        let rendered = command::render(&args);
        tracing::info!("{COMMAND_LABEL} {rendered}");

        if execute {
            return execute_command(&args);
        }

        let line = output_line(output, &args, &rendered)?;
        std::io::stdout().write_all(line.as_bytes()).context(error::WriteStdoutSnafu)?;

        Ok(0)
    }
}

/// The line printed for the assembled command, newline included.
fn output_line(output: OutputFormat, args: &[String], rendered: &str) -> Result<String, Error> {
    match output {
        OutputFormat::Text => Ok(format!("{COMMAND_LABEL} {rendered}\n")),
        OutputFormat::Json => {
            let (program, arguments) = args
                .split_first()
                .map_or(("", &[][..]), |(program, arguments)| (program.as_str(), arguments));
            let mut line =
                serde_json::to_string(&CommandOutput { program, arguments, command: rendered })
                    .context(error::SerializeCommandSnafu)?;
            line.push('\n');
            Ok(line)
        }
    }
}

fn warn_skipped_fields(service_name: &str, spec: &ServiceSpec) {
    for field in &spec.unsupported_fields {
        tracing::warn!(
            "Field `{field}` of service {service_name} is not supported and will be ignored"
        );
    }
    for (field, reason) in &spec.refused_fields {
        tracing::warn!("Field `{field}` of service {service_name} is ignored: {reason}");
    }
    for field in &spec.interpolated_fields {
        tracing::warn!(
            "Field `{field}` of service {service_name} uses variable substitution, which is passed \
             through verbatim"
        );
    }
}

fn execute_command(args: &[String]) -> Result<i32, Error> {
    let Some((program, arguments)) = args.split_first() else {
        return Ok(0);
    };
    let status = std::process::Command::new(program)
        .args(arguments)
        .status()
        .with_context(|_| error::ExecuteCommandSnafu { program: program.clone() })?;

    // A child killed by a signal has no exit code.
    Ok(status.code().unwrap_or(1))
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        translate: TranslateCommand,
    }

    fn parse(args: &[&str]) -> TranslateCommand {
        TestCli::try_parse_from(std::iter::once("telecompose").chain(args.iter().copied()))
            .unwrap()
            .translate
    }

    #[test]
    fn test_output_defaults_to_text() {
        let cmd = parse(&["-s", "web", "-c", "staging", "compose.yml"]);
        assert_eq!(cmd.output, OutputFormat::Text);
        assert!(!cmd.execute);

        let cmd = parse(&["-s", "web", "-c", "staging", "-o", "json", "compose.yml"]);
        assert_eq!(cmd.output, OutputFormat::Json);
    }

    #[test]
    fn test_empty_context_is_rejected() {
        let cmd = parse(&["-s", "web", "-c", "", "compose.yml"]);
        let err = cmd.run(&Config::default()).unwrap_err();
        assert!(matches!(err, Error::MissingContext));
    }

    fn sample_args() -> Vec<String> {
        ["telepresence", "--method", "container", "--docker-run", "--rm", "-it", "nginx:1.25"]
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_text_output_line() {
        let args = sample_args();
        let line = output_line(OutputFormat::Text, &args, &command::render(&args)).unwrap();
        assert_eq!(
            line,
            "Docker command: telepresence --method container --docker-run --rm -it nginx:1.25\n"
        );
    }

    #[test]
    fn test_json_output_line() {
        let args = sample_args();
        let rendered = command::render(&args);
        let line = output_line(OutputFormat::Json, &args, &rendered).unwrap();
        assert!(line.ends_with('\n'));

        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["program"], "telepresence");
        assert_eq!(value["arguments"].as_array().map(Vec::len), Some(6));
        assert_eq!(value["arguments"][5], "nginx:1.25");
        assert_eq!(value["command"], rendered.as_str());
    }

    #[test]
    fn test_missing_manifest_is_reported() {
        let cmd = parse(&["-s", "web", "-c", "staging", "/nonexistent/telecompose/compose.yml"]);
        let err = cmd.run(&Config::default()).unwrap_err();
        assert!(matches!(err, Error::Compose { .. }));
    }
}
