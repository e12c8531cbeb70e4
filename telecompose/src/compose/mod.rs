//! Reading of docker-compose manifests and extraction of a single service.

mod document;
mod error;
mod service;

pub use self::{document::ComposeDocument, error::Error, service::ServiceSpec};
