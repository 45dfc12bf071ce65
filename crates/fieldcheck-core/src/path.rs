//! # Field Paths
//!
//! A field path is a slash-delimited pointer into the state snapshot, such
//! as `/items/0/email`. Paths are split on `/` with empty segments dropped,
//! so `/a//b`, `a/b` and `/a/b/` all address the same value. Segments are
//! used verbatim: there is no `~0`/`~1` unescaping.
//!
//! Resolution never fails. Walking into anything that is not an object or
//! an array, a missing key, or an out-of-range index yields `None`, the
//! "undefined" value a `required` check reports on.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;

/// Registry key identifying a field by its location in the state snapshot.
///
/// The only construction constraint is non-emptiness. Two paths that
/// resolve to the same value but are spelled differently (`/name` and
/// `name`) are distinct registry keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldPath(String);

impl FieldPath {
    /// Create a field path, rejecting the empty string.
    pub fn new(path: impl Into<String>) -> Result<Self, CoreError> {
        let path = path.into();
        if path.is_empty() {
            return Err(CoreError::EmptyPath);
        }
        Ok(Self(path))
    }

    /// The path as written.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Non-empty path segments in order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        segments(&self.0)
    }

    /// Resolve this path against a snapshot.
    pub fn resolve<'a>(&self, snapshot: &'a Value) -> Option<&'a Value> {
        resolve_path(snapshot, &self.0)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for FieldPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl FromStr for FieldPath {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for FieldPath {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for FieldPath {
    type Error = CoreError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FieldPath> for String {
    fn from(path: FieldPath) -> Self {
        path.0
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Walk `snapshot` along `path` and return the value found there.
///
/// Objects are indexed by key, arrays by canonical decimal index (`0`,
/// `12`; not `01` or `+1`). Any other container, including `null`, stops
/// the walk with `None`. The empty path and `/` resolve to the root.
pub fn resolve_path<'a>(snapshot: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = snapshot;
    for segment in segments(path) {
        let next = match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => array_index(segment).and_then(|i| items.get(i)),
            _ => None,
        };
        match next {
            Some(value) => current = value,
            None => {
                tracing::trace!(path, segment, "path does not resolve in snapshot");
                return None;
            }
        }
    }
    Some(current)
}

fn array_index(segment: &str) -> Option<usize> {
    let canonical = segment.bytes().all(|b| b.is_ascii_digit())
        && (segment.len() == 1 || !segment.starts_with('0'));
    if canonical {
        segment.parse().ok()
    } else {
        None
    }
}
