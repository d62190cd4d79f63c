//! Table body layout engine.
//!
//! Given the rows and column model held in a shared [`Store`], the body
//! resolves each cell's merge geometry, realised width, fixed-region
//! visibility and classes, and produces a [`celltree::Node`] tree. Pointer
//! events on that tree are turned into semantic row and cell events, with
//! the hover-row commit and overflow tooltip debounced.
//!
//! # Example
//!
//! ```ignore
//! use table_body::prelude::*;
//!
//! let rows = vec![Arc::new(json!({ "id": 1, "name": "Ada" }))];
//! let columns = vec![Arc::new(Column::new("col_name").property("name").width(120))];
//! let store = Store::new(TableStates::new(rows, columns));
//! let tree = render_body(&store, &BodyConfig::new().row_key(RowKey::path("id")));
//! ```

pub mod body;
pub mod classify;
pub mod column;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod layout;
pub mod render;
pub mod row;
pub mod state;
pub mod timer;

pub use body::TableBody;
pub use render::render_body;
pub use state::Store;

pub mod prelude {
    pub use crate::body::{HoverPatch, TableBody, apply_hover_patch};
    pub use crate::classify::{CellContext, ClassName, RowContext, StyleOption};
    pub use crate::column::{Alignment, Column, ColumnKind};
    pub use crate::config::{BodyConfig, Scope, Timings};
    pub use crate::dispatch::{
        ContentMetrics, EventDispatcher, HoverState, MeasureContent, OverflowTooltip, TableEvent,
        TableEventKind, TextMeasure,
    };
    pub use crate::error::ConfigError;
    pub use crate::layout::{
        FixedMode, Span, SpanContext, SpanMethod, SpanValue, aggregate_width, is_column_hidden,
        resolve_span,
    };
    pub use crate::render::{
        ExpandContext, RenderContext, RenderedBody, render_body, render_snapshot,
    };
    pub use crate::row::{RowKey, TableRow, key_of_row, row_identity};
    pub use crate::state::{Mutation, Store, TableStates};
    pub use crate::timer::{Debounce, FixedFrameTimer, FrameScheduler};

    pub use celltree::{InlineStyle, Node, PointerEvent, PointerKind};
}
