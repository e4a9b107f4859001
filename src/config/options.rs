//! Type-safe launch options for the server runtime.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Newtype for JVM heap sizes to prevent mixups with paths.
///
/// The value is passed through verbatim (`"2G"`, `"512M"`, ...). No parsing
/// or validation is performed; the runtime decides what it accepts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeapSize(pub String);

impl HeapSize {
    /// Create a new HeapSize from a string.
    pub fn new(size: impl Into<String>) -> Self {
        HeapSize(size.into())
    }

    /// Get the heap size as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The minimum-heap flag for this size, e.g. `-Xms2G`.
    pub fn min_heap_flag(&self) -> String {
        format!("-Xms{}", self.0)
    }

    /// The maximum-heap flag for this size, e.g. `-Xmx4G`.
    pub fn max_heap_flag(&self) -> String {
        format!("-Xmx{}", self.0)
    }
}

impl fmt::Display for HeapSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for HeapSize {
    fn from(s: String) -> Self {
        HeapSize(s)
    }
}

impl From<&str> for HeapSize {
    fn from(s: &str) -> Self {
        HeapSize(s.to_string())
    }
}

impl AsRef<str> for HeapSize {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
