use serde_yaml::Value;

pub trait ValueExt {
    /// A short name of the value's YAML shape, used in error messages.
    fn kind(&self) -> &'static str;

    /// The textual form of a scalar (string, number or boolean), or `None`
    /// for null, sequences, mappings and tagged values.
    fn to_scalar_string(&self) -> Option<String>;

    /// Whether any string inside the value uses `${...}` substitution.
    fn contains_interpolation(&self) -> bool;
}

impl ValueExt for Value {
    fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
            Self::Tagged(_) => "tagged value",
        }
    }

    fn to_scalar_string(&self) -> Option<String> {
        match self {
            Self::Bool(value) => Some(value.to_string()),
            Self::Number(value) => Some(value.to_string()),
            Self::String(value) => Some(value.clone()),
            Self::Null | Self::Sequence(_) | Self::Mapping(_) | Self::Tagged(_) => None,
        }
    }

    fn contains_interpolation(&self) -> bool {
        match self {
            Self::String(value) => value.contains("${"),
            Self::Sequence(values) => values.iter().any(Self::contains_interpolation),
            Self::Mapping(mapping) => mapping.values().any(Self::contains_interpolation),
            Self::Tagged(tagged) => tagged.value.contains_interpolation(),
            Self::Null | Self::Bool(_) | Self::Number(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_strings() {
        assert_eq!(Value::from("web").to_scalar_string().as_deref(), Some("web"));
        assert_eq!(Value::from(8080).to_scalar_string().as_deref(), Some("8080"));
        assert_eq!(Value::from(true).to_scalar_string().as_deref(), Some("true"));
        assert_eq!(Value::Null.to_scalar_string(), None);
        assert_eq!(Value::Sequence(Vec::new()).to_scalar_string(), None);
    }

    #[test]
    fn test_interpolation_is_found_in_nested_values() {
        let value: Value = serde_yaml::from_str("environment:\n  - TOKEN=${TOKEN}\n").unwrap();
        assert!(value.contains_interpolation());

        let value: Value = serde_yaml::from_str("environment:\n  - TOKEN=$$literal\n").unwrap();
        assert!(!value.contains_interpolation());
    }
}
