//! Row records and row identity.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

/// Trait for records that can be displayed as rows in a table body.
///
/// Rows are opaque to the layout engine; the only thing it ever asks of a
/// row is a field lookup, used to derive row keys and the text of cells
/// that have no custom renderer.
pub trait TableRow: Send + Sync + 'static {
    /// Look up a field by dotted path (`"user.id"`), rendered as text.
    fn field(&self, path: &str) -> Option<String>;
}

impl TableRow for serde_json::Value {
    fn field(&self, path: &str) -> Option<String> {
        let mut current = self;
        for segment in path.split('.') {
            current = match current {
                serde_json::Value::Object(map) => map.get(segment)?,
                serde_json::Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        match current {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl TableRow for HashMap<String, String> {
    fn field(&self, path: &str) -> Option<String> {
        self.get(path).cloned()
    }
}

impl TableRow for BTreeMap<String, String> {
    fn field(&self, path: &str) -> Option<String> {
        self.get(path).cloned()
    }
}

/// Accessor producing a row identity.
pub type RowKeyFn<R> = Arc<dyn Fn(&R) -> String + Send + Sync>;

/// How stable row identity is derived.
pub enum RowKey<R> {
    /// Dotted field path looked up through [`TableRow::field`].
    Path(String),
    /// Arbitrary accessor.
    Accessor(RowKeyFn<R>),
}

impl<R> RowKey<R> {
    pub fn path(path: impl Into<String>) -> Self {
        Self::Path(path.into())
    }

    pub fn accessor(f: impl Fn(&R) -> String + Send + Sync + 'static) -> Self {
        Self::Accessor(Arc::new(f))
    }
}

impl<R> Clone for RowKey<R> {
    fn clone(&self) -> Self {
        match self {
            Self::Path(path) => Self::Path(path.clone()),
            Self::Accessor(f) => Self::Accessor(Arc::clone(f)),
        }
    }
}

impl<R> fmt::Debug for RowKey<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "Path({path:?})"),
            Self::Accessor(_) => write!(f, "Accessor(..)"),
        }
    }
}

/// Resolve a row's identity through its key. None when the path is absent.
pub fn row_identity<R: TableRow>(row: &R, key: &RowKey<R>) -> Option<String> {
    match key {
        RowKey::Path(path) => row.field(path),
        RowKey::Accessor(f) => Some(f(row)),
    }
}

/// Reconciliation key of a row: its identity when a key is configured and
/// resolves, otherwise its positional index.
///
/// Positional keys are unstable under reordering or filtering.
pub fn key_of_row<R: TableRow>(row: &R, index: usize, key: Option<&RowKey<R>>) -> String {
    key.and_then(|key| row_identity(row, key))
        .unwrap_or_else(|| index.to_string())
}
