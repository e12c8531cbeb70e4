use std::fmt;

use serde_yaml::{Mapping, Value};

use crate::{
    ext::ValueExt,
    normalize::{Error, error, field},
};

const FIELD: &str = "ports";

/// One entry of a service's `ports` list.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PortEntry {
    /// The short syntax, such as `8080:80` or `127.0.0.1:53:53/udp`, kept
    /// verbatim.
    Short(String),

    /// The long syntax, a mapping with `target` and optional `published`,
    /// `protocol` and `host_ip` keys.
    Long(Box<PublishedPort>),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PublishedPort {
    pub host_ip: Option<String>,
    pub published: Option<String>,
    pub target: String,
    pub protocol: Option<String>,
}

impl PublishedPort {
    fn from_mapping(mapping: &Mapping) -> Result<Self, Error> {
        let target = mapping.get("target").ok_or_else(|| Error::UnsupportedFieldShape {
            field: FIELD,
            expected: "a mapping with a `target` port",
            found: "mapping without `target`",
        })?;
        Ok(Self {
            host_ip: field::optional_scalar(FIELD, mapping.get("host_ip"))?,
            published: field::optional_scalar(FIELD, mapping.get("published"))?,
            target: field::scalar(FIELD, target)?,
            protocol: field::optional_scalar(FIELD, mapping.get("protocol"))?,
        })
    }
}

impl TryFrom<&Value> for PortEntry {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(port) => Ok(Self::Short(port.clone())),
            Value::Mapping(mapping) => {
                PublishedPort::from_mapping(mapping).map(|port| Self::Long(Box::new(port)))
            }
            other => error::UnsupportedFieldShapeSnafu {
                field: FIELD,
                expected: "a port string or a port mapping",
                found: other.kind(),
            }
            .fail(),
        }
    }
}

impl fmt::Display for PortEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Short(port) => f.write_str(port),
            Self::Long(port) => {
                let PublishedPort { host_ip, published, target, protocol } = port.as_ref();
                if let Some(host_ip) = host_ip {
                    write!(f, "{host_ip}:")?;
                }
                if let Some(published) = published {
                    write!(f, "{published}:")?;
                }
                f.write_str(target)?;
                if let Some(protocol) = protocol {
                    write!(f, "/{protocol}")?;
                }
                Ok(())
            }
        }
    }
}
