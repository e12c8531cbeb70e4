use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("{source}"))]
    Configuration { source: crate::config::Error },

    #[snafu(display("{source}"))]
    Compose { source: telecompose::compose::Error },

    #[snafu(display("{source}"))]
    Normalize { source: telecompose::normalize::Error },

    #[snafu(display("Kubernetes context must not be empty"))]
    MissingContext,

    #[snafu(display("Argument {name} is required"))]
    MissingArgument { name: &'static str },

    #[snafu(display("Failed to write to stdout, error: {source}"))]
    WriteStdout { source: std::io::Error },

    #[snafu(display("Failed to create completion script {}, error: {source}", file_path.display()))]
    CreateCompletionScript { file_path: std::path::PathBuf, source: std::io::Error },

    #[snafu(display("Failed to serialize command, error: {source}"))]
    SerializeCommand { source: serde_json::Error },

    #[snafu(display("Failed to execute {program}, error: {source}"))]
    ExecuteCommand { program: String, source: std::io::Error },
}

impl From<crate::config::Error> for Error {
    fn from(source: crate::config::Error) -> Self { Self::Configuration { source } }
}

impl From<telecompose::compose::Error> for Error {
    fn from(source: telecompose::compose::Error) -> Self { Self::Compose { source } }
}

impl From<telecompose::normalize::Error> for Error {
    fn from(source: telecompose::normalize::Error) -> Self { Self::Normalize { source } }
}
