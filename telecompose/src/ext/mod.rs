//! This module provides extensions to `serde_yaml` types.
//!
//! Compose fields are read as loosely typed YAML values; these traits give the
//! extractor and the normalizer a single place to classify and stringify them.

mod value;

pub use self::value::ValueExt;
