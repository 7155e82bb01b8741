//! Name to position mapping for a frame's columns.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{FrameError, Result};

/// How duplicate column names are handled when an index is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// A later column silently shadows an earlier one with the same name.
    #[default]
    LastWins,
    /// Duplicate names fail with [`FrameError::DuplicateColumn`].
    Reject,
}

/// Maps column names to zero-based positions.
///
/// Built once when a frame is loaded and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnIndex {
    positions: HashMap<String, usize>,
}

impl ColumnIndex {
    /// Builds an index assigning position `i` to `names[i]`.
    ///
    /// Duplicate names resolve to their last position.
    #[must_use]
    pub fn build<S: AsRef<str>>(names: &[S]) -> Self {
        let positions = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_ref().to_string(), i))
            .collect();
        ColumnIndex { positions }
    }

    /// Builds an index under the given duplicate policy.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::DuplicateColumn`] if `policy` is
    /// [`DuplicatePolicy::Reject`] and a name appears twice.
    pub fn build_with_policy<S: AsRef<str>>(names: &[S], policy: DuplicatePolicy) -> Result<Self> {
        match policy {
            DuplicatePolicy::LastWins => Ok(Self::build(names)),
            DuplicatePolicy::Reject => {
                let mut positions = HashMap::with_capacity(names.len());
                for (i, name) in names.iter().enumerate() {
                    let name = name.as_ref();
                    if positions.insert(name.to_string(), i).is_some() {
                        return Err(FrameError::DuplicateColumn(name.to_string()));
                    }
                }
                Ok(ColumnIndex { positions })
            }
        }
    }

    /// Resolves a column name to its position.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::UnknownColumn`] if the name is absent.
    pub fn resolve(&self, name: &str) -> Result<usize> {
        self.positions
            .get(name)
            .copied()
            .ok_or_else(|| FrameError::UnknownColumn(name.to_string()))
    }

    /// Returns true if the index contains the given name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    /// Returns the number of distinct names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if the index holds no names.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
