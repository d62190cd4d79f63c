//! Cell geometry: span resolution, width aggregation and fixed-region
//! visibility.

mod span;
mod visibility;
mod width;

pub use span::{Span, SpanContext, SpanMethod, SpanValue, resolve_span};
pub use visibility::{FixedMode, is_column_hidden};
pub use width::aggregate_width;
