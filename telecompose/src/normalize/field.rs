//! Conversions shared by the per-field rules.

use serde_yaml::Value;
use snafu::OptionExt;

use crate::{
    ext::ValueExt,
    normalize::{Error, error},
};

/// The textual form of a scalar field value.
pub fn scalar(field: &'static str, value: &Value) -> Result<String, Error> {
    value.to_scalar_string().with_context(|| error::UnsupportedFieldShapeSnafu {
        field,
        expected: "a string, number or boolean",
        found: value.kind(),
    })
}

pub fn optional_scalar(field: &'static str, value: Option<&Value>) -> Result<Option<String>, Error> {
    value.map(|value| scalar(field, value)).transpose()
}

/// One value per element of a list of scalars.
pub fn scalars(field: &'static str, values: &[Value]) -> Result<Vec<String>, Error> {
    values.iter().map(|value| scalar(field, value)).collect()
}

/// One value per element, where the list may also be written as a mapping.
/// Each mapping pair is rendered as `KEY{separator}VALUE`, or `KEY` alone when
/// the value is null.
pub fn scalars_or_pairs(
    field: &'static str,
    values: &[Value],
    separator: char,
) -> Result<Vec<String>, Error> {
    let mut rendered = Vec::with_capacity(values.len());
    for value in values {
        match value {
            Value::Mapping(mapping) => {
                for (key, value) in mapping {
                    let key = scalar(field, key)?;
                    match value {
                        Value::Null => rendered.push(key),
                        value => rendered.push(format!("{key}{separator}{}", scalar(field, value)?)),
                    }
                }
            }
            value => rendered.push(scalar(field, value)?),
        }
    }
    Ok(rendered)
}

/// Splits a string-or-sequence field into whitespace separated words.
///
/// A sequence is first joined with single spaces, so both spellings of the
/// same command line produce the same words.
pub fn words(field: &'static str, value: Option<&Value>) -> Result<Vec<String>, Error> {
    let line = match value {
        None => return Ok(Vec::new()),
        Some(Value::Sequence(values)) => scalars(field, values)?.join(" "),
        Some(Value::String(line)) => line.clone(),
        Some(other) => {
            return error::UnsupportedFieldShapeSnafu {
                field,
                expected: "a string or a sequence of strings",
                found: other.kind(),
            }
            .fail();
        }
    };
    Ok(line.split_whitespace().map(str::to_string).collect())
}

/// Arguments of a string-or-sequence field. Sequence elements are kept as
/// one argument each; only the string form is split on whitespace.
pub fn arguments(field: &'static str, value: Option<&Value>) -> Result<Vec<String>, Error> {
    match value {
        Some(Value::Sequence(values)) => scalars(field, values),
        value => words(field, value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(text: &str) -> Value { serde_yaml::from_str(text).expect("valid YAML") }

    #[test]
    fn test_scalars_stringify_numbers() {
        let values = vec![Value::from(3000), Value::from("8000")];
        assert_eq!(scalars("expose", &values).unwrap(), vec!["3000", "8000"]);
    }

    #[test]
    fn test_nested_value_is_rejected() {
        let values = vec![yaml("[NET_ADMIN]")];
        let err = scalars("cap_add", &values).unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedFieldShape { field: "cap_add", found: "sequence", .. }
        ));
    }

    #[test]
    fn test_mapping_pairs_are_joined() {
        let values = vec![yaml("RACK_ENV: development\nSHOW: true\nEMPTY:\n")];
        assert_eq!(
            scalars_or_pairs("environment", &values, '=').unwrap(),
            vec!["RACK_ENV=development", "SHOW=true", "EMPTY"]
        );
    }

    #[test]
    fn test_list_and_mapping_entries_can_mix() {
        let values = vec![Value::from("A=1"), yaml("{B: 2}")];
        assert_eq!(scalars_or_pairs("labels", &values, '=').unwrap(), vec!["A=1", "B=2"]);
    }

    #[test]
    fn test_words_from_sequence_and_string_match() {
        let sequence = yaml("[/bin/sh, -c, run.sh]");
        let string = Value::from("/bin/sh -c  run.sh");
        assert_eq!(words("entrypoint", Some(&sequence)).unwrap(), vec!["/bin/sh", "-c", "run.sh"]);
        assert_eq!(
            words("entrypoint", Some(&sequence)).unwrap(),
            words("entrypoint", Some(&string)).unwrap()
        );
    }

    #[test]
    fn test_arguments_keep_sequence_elements_whole() {
        let sequence = yaml("[sh, -c, 'sleep 1 && echo hi']");
        assert_eq!(
            arguments("command", Some(&sequence)).unwrap(),
            vec!["sh", "-c", "sleep 1 && echo hi"]
        );
        assert_eq!(
            arguments("command", Some(&Value::from("bundle exec  rails s"))).unwrap(),
            vec!["bundle", "exec", "rails", "s"]
        );
        assert!(arguments("command", None).unwrap().is_empty());
        assert!(arguments("command", Some(&yaml("{run: app}"))).is_err());
    }

    #[test]
    fn test_words_reject_mappings() {
        let err = words("command", Some(&yaml("{run: app}"))).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFieldShape { field: "command", .. }));
    }
}
