//! Vector specifications and column resolution.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{FrameError, Result};
use crate::schema::ColumnIndex;
use crate::types::element_type;

/// Default element type for float vectors.
pub const FLOAT64: &str = "float64";

/// Describes how to build a vector from a row.
///
/// All columns named in `var_names` must share one element type. A
/// column may be a scalar or an array of that type; the vector is the
/// concatenation of the columns in `var_names` order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorSpec {
    /// Declared element type, e.g. `"float64"`.
    #[serde(rename = "type", default)]
    pub element_type: String,
    /// Ordered column names to concatenate.
    #[serde(default)]
    pub var_names: Vec<String>,
}

impl VectorSpec {
    /// Creates a spec with an explicit element type.
    #[must_use]
    pub fn new<S: Into<String>>(
        element_type: impl Into<String>,
        var_names: impl IntoIterator<Item = S>,
    ) -> Self {
        VectorSpec {
            element_type: element_type.into(),
            var_names: var_names.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a `float64` spec over the given columns.
    #[must_use]
    pub fn float64<S: Into<String>>(var_names: impl IntoIterator<Item = S>) -> Self {
        Self::new(FLOAT64, var_names)
    }

    /// Returns the number of columns named by this spec.
    #[must_use]
    pub fn len(&self) -> usize {
        self.var_names.len()
    }

    /// Returns true if the spec names no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.var_names.is_empty()
    }

    /// Resolves the spec's columns to positions, in `var_names` order.
    ///
    /// Element types come from `var_types[position]` with any array
    /// marker stripped. Columns without a declared type, or with an empty
    /// tag, are not checked and don't change the running type.
    ///
    /// # Errors
    ///
    /// - [`FrameError::EmptySpec`] if `var_names` is empty
    /// - [`FrameError::UnknownColumn`] if a name is not in `index`
    /// - [`FrameError::InvalidVectorSpec`] if two typed columns differ in element type
    pub fn resolve_indices(
        &self,
        index: &ColumnIndex,
        var_types: Option<&[String]>,
    ) -> Result<Vec<usize>> {
        if self.var_names.is_empty() {
            return Err(FrameError::EmptySpec);
        }

        let mut indices = Vec::with_capacity(self.var_names.len());
        let mut last_type: Option<&str> = None;

        for name in &self.var_names {
            let idx = index.resolve(name)?;

            match var_types
                .and_then(|types| types.get(idx))
                .map(|tag| element_type(tag.as_str()))
                .filter(|current| !current.is_empty())
            {
                Some(current) => {
                    if let Some(expected) = last_type {
                        if expected != current {
                            return Err(FrameError::InvalidVectorSpec {
                                column: name.clone(),
                                expected: expected.to_string(),
                                actual: current.to_string(),
                            });
                        }
                    }
                    last_type = Some(current);
                }
                None => trace!(column = %name, "no declared type, skipping homogeneity check"),
            }

            indices.push(idx);
        }

        Ok(indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types(tags: &[&str]) -> Vec<String> {
        tags.iter().map(|t| (*t).to_string()).collect()
    }

    #[test]
    fn test_resolve_in_spec_order() {
        let index = ColumnIndex::build(&["room", "wifi", "acceleration"]);
        let spec = VectorSpec::float64(["acceleration", "wifi"]);
        assert_eq!(spec.resolve_indices(&index, None).unwrap(), vec![2, 1]);
    }

    #[test]
    fn test_empty_spec() {
        let index = ColumnIndex::build(&["a"]);
        let spec = VectorSpec::float64(Vec::<String>::new());
        assert!(matches!(
            spec.resolve_indices(&index, None),
            Err(FrameError::EmptySpec)
        ));
    }

    #[test]
    fn test_unknown_column() {
        let index = ColumnIndex::build(&["a"]);
        let spec = VectorSpec::float64(["a", "missing"]);
        assert!(matches!(
            spec.resolve_indices(&index, None),
            Err(FrameError::UnknownColumn(ref name)) if name == "missing"
        ));
    }

    #[test]
    fn test_array_and_scalar_share_element_type() {
        let index = ColumnIndex::build(&["room", "wifi", "acceleration"]);
        let var_types = types(&["string", "[]float64", "float64"]);
        let spec = VectorSpec::float64(["wifi", "acceleration"]);
        assert_eq!(
            spec.resolve_indices(&index, Some(&var_types)).unwrap(),
            vec![1, 2]
        );
    }

    #[test]
    fn test_mixed_element_types_rejected() {
        let index = ColumnIndex::build(&["room", "wifi"]);
        let var_types = types(&["string", "[]float64"]);
        let spec = VectorSpec::float64(["wifi", "room"]);
        match spec.resolve_indices(&index, Some(&var_types)) {
            Err(FrameError::InvalidVectorSpec {
                column,
                expected,
                actual,
            }) => {
                assert_eq!(column, "room");
                assert_eq!(expected, "float64");
                assert_eq!(actual, "string");
            }
            other => panic!("expected InvalidVectorSpec, got {other:?}"),
        }
    }

    #[test]
    fn test_short_var_types_skips_check() {
        let index = ColumnIndex::build(&["a", "b"]);
        let var_types = types(&["float64"]);
        let spec = VectorSpec::float64(["a", "b"]);
        assert_eq!(
            spec.resolve_indices(&index, Some(&var_types)).unwrap(),
            vec![0, 1]
        );
    }

    #[test]
    fn test_empty_tag_skips_check() {
        let index = ColumnIndex::build(&["a", "b", "c"]);
        let var_types = types(&["", "float64", "[]"]);
        let spec = VectorSpec::float64(["a", "b", "c"]);
        assert_eq!(
            spec.resolve_indices(&index, Some(&var_types)).unwrap(),
            vec![0, 1, 2]
        );

        // The running type survives an untyped column in between.
        let index = ColumnIndex::build(&["a", "b", "c"]);
        let var_types = types(&["float64", "", "string"]);
        assert!(matches!(
            spec.resolve_indices(&index, Some(&var_types)),
            Err(FrameError::InvalidVectorSpec { ref column, .. }) if column == "c"
        ));
    }

    #[test]
    fn test_deserialize_from_yaml() {
        let spec: VectorSpec =
            serde_yaml::from_str("type: float64\nvar_names: [wifi, acceleration]\n").unwrap();
        assert_eq!(spec, VectorSpec::float64(["wifi", "acceleration"]));
    }
}
