//! This module provides table rendering for service summaries.

mod service_row_ext;

pub use self::service_row_ext::{ServiceRow, ServiceRowExt};
