//! Configuration shared by Telecompose command-line programs.

mod log;

pub use self::log::LogConfig;
