//! Column type tags.
//!
//! A tag such as `"float64"` names a scalar column; a tag carrying an
//! array marker prefix such as `"[]float64"` names an array-of-float64
//! column. Homogeneity checks compare element types only.

/// Returns the element type of a type tag.
///
/// Everything up to and including the last `]` is stripped, so
/// `"[]float64"` and `"[][]float64"` both yield `"float64"`.
#[must_use]
pub fn element_type(tag: &str) -> &str {
    match tag.rfind(']') {
        Some(idx) => &tag[idx + 1..],
        None => tag,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_type_strips_marker() {
        assert_eq!(element_type("[]float64"), "float64");
        assert_eq!(element_type("float64"), "float64");
        assert_eq!(element_type("[][]float64"), "float64");
        assert_eq!(element_type(""), "");
        assert_eq!(element_type("[]"), "");
    }
}
