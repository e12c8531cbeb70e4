//! Flags, literals and field lists shared by the translation stages.

pub mod compose;
pub mod docker;
pub mod telepresence;

/// Label printed in front of the assembled command.
pub const COMMAND_LABEL: &str = "Docker command:";
