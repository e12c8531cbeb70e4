//! The `telecompose` library turns one service of a docker-compose manifest
//! into a Telepresence `--method container` invocation.
//!
//! The work happens in three forward-only stages:
//!
//! 1. [`compose::ComposeDocument::service`] extracts the raw fields of the
//!    selected service.
//! 2. [`normalize::NormalizedService::from_spec`] turns every field into
//!    argument values, resolving host paths against the manifest directory.
//! 3. [`command::assemble`] lays the values out in the fixed flag order and
//!    [`command::render`] produces the shell-safe command line.

pub mod command;
pub mod compose;
pub mod consts;
pub mod duration;
pub mod ext;
pub mod normalize;
pub mod path;
