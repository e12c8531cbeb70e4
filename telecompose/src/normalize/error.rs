use snafu::Snafu;

/// Errors raised while turning raw service fields into arguments.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    /// A field holds a value of a shape with no translation. Such values are
    /// never coerced, so the command cannot silently drop configuration.
    #[snafu(display("Unsupported value for `{field}`: expected {expected}, found {found}"))]
    UnsupportedFieldShape { field: &'static str, expected: &'static str, found: &'static str },

    #[snafu(display("Failed to resolve host path in `{field}`, error: {source}"))]
    ResolveHostPath { field: &'static str, source: crate::path::Error },
}
