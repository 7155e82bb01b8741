//! Options controlling how frame files are read and indexed.

use serde::{Deserialize, Serialize};

use crate::error::{FrameError, Result};
use crate::schema::DuplicatePolicy;

/// Default file size above which frame files are memory-mapped (64 MB).
pub const DEFAULT_MMAP_THRESHOLD: u64 = 64 * 1024 * 1024;

/// Configuration for loading data frames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadOptions {
    /// How duplicate column names are handled (default: last wins).
    pub duplicate_columns: DuplicatePolicy,
    /// Enable memory-mapped reads for large files (default: true).
    pub use_mmap: bool,
    /// Minimum file size in bytes to use mmap (default: 64MB).
    pub mmap_threshold: u64,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            duplicate_columns: DuplicatePolicy::LastWins,
            use_mmap: true,
            mmap_threshold: DEFAULT_MMAP_THRESHOLD,
        }
    }
}

impl LoadOptions {
    /// Creates options with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the duplicate column policy.
    #[must_use]
    pub fn with_duplicate_columns(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_columns = policy;
        self
    }

    /// Sets whether to use memory-mapped I/O.
    #[must_use]
    pub fn with_mmap(mut self, use_mmap: bool) -> Self {
        self.use_mmap = use_mmap;
        self
    }

    /// Sets the minimum file size for memory mapping.
    #[must_use]
    pub fn with_mmap_threshold(mut self, threshold: u64) -> Self {
        self.mmap_threshold = threshold;
        self
    }

    /// Creates options that reject duplicate column names.
    #[must_use]
    pub fn strict() -> Self {
        Self::default().with_duplicate_columns(DuplicatePolicy::Reject)
    }

    /// Validates the options.
    ///
    /// # Errors
    ///
    /// Returns an error if mmap is enabled with a zero threshold.
    pub fn validate(&self) -> Result<()> {
        if self.use_mmap && self.mmap_threshold == 0 {
            return Err(FrameError::ValidationError(
                "mmap_threshold must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns whether a file of the given size should be memory-mapped.
    #[must_use]
    pub fn should_mmap(&self, file_size: u64) -> bool {
        self.use_mmap && file_size >= self.mmap_threshold
    }
}
