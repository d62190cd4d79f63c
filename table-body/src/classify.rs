//! Row and cell classification: class lists and inline styles derived from
//! table-wide policy and the shared state.

use std::fmt;
use std::sync::Arc;

use celltree::InlineStyle;

use crate::column::Column;
use crate::config::BodyConfig;
use crate::layout::is_column_hidden;
use crate::state::TableStates;

pub const BODY_CLASS: &str = "el-table__body";
pub const ROW_CLASS: &str = "el-table__row";
pub const CURRENT_ROW_CLASS: &str = "current-row";
pub const STRIPED_ROW_CLASS: &str = "el-table__row--striped";
pub const EXPANDED_ROW_CLASS: &str = "expanded";
pub const HOVER_ROW_CLASS: &str = "hover-row";
pub const HIDDEN_CELL_CLASS: &str = "is-hidden";
pub const CELL_CLASS: &str = "cell";
pub const TOOLTIP_CLASS: &str = "el-tooltip";
pub const EXPANDED_CELL_CLASS: &str = "el-table__expanded-cell";

/// Arguments of row-level class and style callbacks.
pub struct RowContext<'a, R> {
    pub row: &'a Arc<R>,
    pub row_index: usize,
}

/// Arguments of cell-level class and style callbacks.
pub struct CellContext<'a, R> {
    pub row_index: usize,
    pub column_index: usize,
    pub row: &'a Arc<R>,
    pub column: &'a Column<R>,
}

pub type RowClassFn<R> = dyn Fn(&RowContext<'_, R>) -> String + Send + Sync;
pub type CellClassFn<R> = dyn Fn(&CellContext<'_, R>) -> String + Send + Sync;
pub type RowStyleFn<R> = dyn Fn(&RowContext<'_, R>) -> Option<InlineStyle> + Send + Sync;
pub type CellStyleFn<R> = dyn Fn(&CellContext<'_, R>) -> Option<InlineStyle> + Send + Sync;

/// A custom class: either a literal or a callback.
pub enum ClassName<F: ?Sized> {
    Literal(String),
    Callback(Arc<F>),
}

/// A custom inline style: either a literal or a callback.
pub enum StyleOption<F: ?Sized> {
    Literal(InlineStyle),
    Callback(Arc<F>),
}

impl<F: ?Sized> Clone for ClassName<F> {
    fn clone(&self) -> Self {
        match self {
            Self::Literal(s) => Self::Literal(s.clone()),
            Self::Callback(f) => Self::Callback(Arc::clone(f)),
        }
    }
}

impl<F: ?Sized> Clone for StyleOption<F> {
    fn clone(&self) -> Self {
        match self {
            Self::Literal(s) => Self::Literal(s.clone()),
            Self::Callback(f) => Self::Callback(Arc::clone(f)),
        }
    }
}

impl<F: ?Sized> fmt::Debug for ClassName<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(s) => write!(f, "Literal({s:?})"),
            Self::Callback(_) => write!(f, "Callback(..)"),
        }
    }
}

impl<F: ?Sized> fmt::Debug for StyleOption<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(s) => write!(f, "Literal({s:?})"),
            Self::Callback(_) => write!(f, "Callback(..)"),
        }
    }
}

/// Class list of a row, in fixed order: base marker, current row, stripe,
/// custom class, expanded.
pub fn row_classes<R>(
    config: &BodyConfig<R>,
    states: &TableStates<R>,
    row: &Arc<R>,
    row_index: usize,
) -> Vec<String> {
    let mut classes = vec![ROW_CLASS.to_string()];

    if config.highlight_current_row
        && states
            .current_row
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, row))
    {
        classes.push(CURRENT_ROW_CLASS.to_string());
    }

    if config.stripe && row_index % 2 == 1 {
        classes.push(STRIPED_ROW_CLASS.to_string());
    }

    match &config.row_class_name {
        Some(ClassName::Literal(class)) => classes.push(class.clone()),
        Some(ClassName::Callback(f)) => classes.push(f(&RowContext { row, row_index })),
        None => {}
    }

    if states.is_expanded(row) {
        classes.push(EXPANDED_ROW_CLASS.to_string());
    }

    classes.retain(|class| !class.is_empty());
    classes
}

pub fn row_style<R>(config: &BodyConfig<R>, row: &Arc<R>, row_index: usize) -> Option<InlineStyle> {
    match config.row_style.as_ref()? {
        StyleOption::Literal(style) => Some(style.clone()),
        StyleOption::Callback(f) => f(&RowContext { row, row_index }),
    }
}

/// Space-separated class string of a cell: column id, alignment, column
/// class, hidden marker, custom class.
pub fn cell_class<R>(
    config: &BodyConfig<R>,
    states: &TableStates<R>,
    row_index: usize,
    column_index: usize,
    row: &Arc<R>,
    column: &Column<R>,
) -> String {
    let mut classes: Vec<String> = vec![column.id.clone()];
    if let Some(align) = column.align {
        classes.push(align.class_token().to_string());
    }
    if let Some(class_name) = &column.class_name {
        classes.push(class_name.clone());
    }

    if is_column_hidden(
        column_index,
        config.fixed,
        states.fixed_leaf_count,
        states.columns.len(),
        states.right_fixed_leaf_count,
    ) {
        classes.push(HIDDEN_CELL_CLASS.to_string());
    }

    match &config.cell_class_name {
        Some(ClassName::Literal(class)) => classes.push(class.clone()),
        Some(ClassName::Callback(f)) => classes.push(f(&CellContext {
            row_index,
            column_index,
            row,
            column,
        })),
        None => {}
    }

    classes.retain(|class| !class.is_empty());
    classes.join(" ")
}

pub fn cell_style<R>(
    config: &BodyConfig<R>,
    row_index: usize,
    column_index: usize,
    row: &Arc<R>,
    column: &Column<R>,
) -> Option<InlineStyle> {
    match config.cell_style.as_ref()? {
        StyleOption::Literal(style) => Some(style.clone()),
        StyleOption::Callback(f) => f(&CellContext {
            row_index,
            column_index,
            row,
            column,
        }),
    }
}
