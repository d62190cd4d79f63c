use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::column::Column;
use crate::error::ConfigError;

/// Merge geometry of a cell. A zero in either field suppresses the cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub rowspan: u32,
    pub colspan: u32,
}

impl Span {
    pub const SINGLE: Span = Span {
        rowspan: 1,
        colspan: 1,
    };

    pub fn new(rowspan: u32, colspan: u32) -> Self {
        Self { rowspan, colspan }
    }

    /// Suppressed cells emit no node at all.
    pub fn is_suppressed(&self) -> bool {
        self.rowspan == 0 || self.colspan == 0
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::SINGLE
    }
}

/// What a span policy returned for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanValue {
    /// Ordered `(rowspan, colspan)` pair.
    Pair(u32, u32),
    /// Record with named fields.
    Named { rowspan: u32, colspan: u32 },
    /// The policy has no opinion on this cell.
    Unset,
}

impl SpanValue {
    pub fn span(self) -> Span {
        match self {
            Self::Pair(rowspan, colspan) | Self::Named { rowspan, colspan } => {
                Span::new(rowspan, colspan)
            }
            Self::Unset => Span::SINGLE,
        }
    }
}

fn span_field(value: &Value) -> Option<u32> {
    value.as_u64().and_then(|n| u32::try_from(n).ok())
}

impl TryFrom<&Value> for SpanValue {
    type Error = ConfigError;

    /// Validate a dynamically produced span: `[rowspan, colspan]`,
    /// `{ "rowspan": n, "colspan": n }`, or `null` for no opinion.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let malformed = || ConfigError::MalformedSpan {
            found: value.to_string(),
        };

        match value {
            Value::Null => Ok(Self::Unset),
            Value::Array(items) => match items.as_slice() {
                [rowspan, colspan] => Ok(Self::Pair(
                    span_field(rowspan).ok_or_else(malformed)?,
                    span_field(colspan).ok_or_else(malformed)?,
                )),
                _ => Err(malformed()),
            },
            Value::Object(map) => {
                let rowspan = map.get("rowspan").and_then(span_field);
                let colspan = map.get("colspan").and_then(span_field);
                match (rowspan, colspan) {
                    (Some(rowspan), Some(colspan)) => Ok(Self::Named { rowspan, colspan }),
                    _ => Err(malformed()),
                }
            }
            _ => Err(malformed()),
        }
    }
}

/// Everything a span policy may look at.
pub struct SpanContext<'a, R> {
    pub row: &'a Arc<R>,
    pub column: &'a Column<R>,
    pub row_index: usize,
    pub column_index: usize,
}

type TypedSpanFn<R> = Arc<dyn Fn(&SpanContext<'_, R>) -> SpanValue + Send + Sync>;
type DynamicSpanFn<R> = Arc<dyn Fn(&SpanContext<'_, R>) -> Value + Send + Sync>;

/// User-supplied span policy.
///
/// Policies must be deterministic for a given cell within a render pass:
/// the renderer relies on it when deciding which cells to skip.
pub enum SpanMethod<R> {
    /// Returns a validated [`SpanValue`].
    Typed(TypedSpanFn<R>),
    /// Returns a JSON value, validated at call time.
    Dynamic(DynamicSpanFn<R>),
}

impl<R> SpanMethod<R> {
    pub fn typed(f: impl Fn(&SpanContext<'_, R>) -> SpanValue + Send + Sync + 'static) -> Self {
        Self::Typed(Arc::new(f))
    }

    pub fn dynamic(f: impl Fn(&SpanContext<'_, R>) -> Value + Send + Sync + 'static) -> Self {
        Self::Dynamic(Arc::new(f))
    }

    fn call(&self, ctx: &SpanContext<'_, R>) -> Result<SpanValue, ConfigError> {
        match self {
            Self::Typed(f) => Ok(f(ctx)),
            Self::Dynamic(f) => SpanValue::try_from(&f(ctx)),
        }
    }
}

impl<R> Clone for SpanMethod<R> {
    fn clone(&self) -> Self {
        match self {
            Self::Typed(f) => Self::Typed(Arc::clone(f)),
            Self::Dynamic(f) => Self::Dynamic(Arc::clone(f)),
        }
    }
}

impl<R> fmt::Debug for SpanMethod<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Typed(_) => write!(f, "Typed(..)"),
            Self::Dynamic(_) => write!(f, "Dynamic(..)"),
        }
    }
}

/// Effective span of one cell.
///
/// Without a policy every cell is `(1, 1)`. A malformed policy result is
/// logged and treated as `(1, 1)` so one bad cell never aborts the render.
pub fn resolve_span<R>(
    method: Option<&SpanMethod<R>>,
    row: &Arc<R>,
    column: &Column<R>,
    row_index: usize,
    column_index: usize,
) -> Span {
    let Some(method) = method else {
        return Span::SINGLE;
    };

    let ctx = SpanContext {
        row,
        column,
        row_index,
        column_index,
    };

    match method.call(&ctx) {
        Ok(value) => value.span(),
        Err(err) => {
            log::warn!(
                "span method for row {row_index}, column '{}' ({column_index}): {err}; using 1x1",
                column.id
            );
            Span::SINGLE
        }
    }
}
