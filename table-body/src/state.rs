//! Shared table state and its single mutation entry point.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use crate::column::Column;
use crate::error::ConfigError;

/// Everything the body reads from the table: rows, columns, fixed-region
/// sizes and the interaction state (current, hovered and expanded rows).
///
/// Row identity is `Arc` identity: `current_row` and `expanded_rows` hold
/// clones of the same `Arc`s found in `data`.
#[derive(Debug)]
pub struct TableStates<R> {
    pub data: Vec<Arc<R>>,
    pub columns: Vec<Arc<Column<R>>>,
    /// Number of leading leaf columns in the left fixed region
    pub fixed_leaf_count: usize,
    /// Number of trailing leaf columns in the right fixed region
    pub right_fixed_leaf_count: usize,
    pub current_row: Option<Arc<R>>,
    pub hover_row: Option<usize>,
    pub expanded_rows: Vec<Arc<R>>,
}

impl<R> TableStates<R> {
    pub fn new(data: Vec<Arc<R>>, columns: Vec<Arc<Column<R>>>) -> Self {
        Self {
            data,
            columns,
            fixed_leaf_count: 0,
            right_fixed_leaf_count: 0,
            current_row: None,
            hover_row: None,
            expanded_rows: Vec::new(),
        }
    }

    /// Set the fixed-region sizes, rejecting counts larger than the column
    /// model.
    pub fn with_fixed_counts(mut self, left: usize, right: usize) -> Result<Self, ConfigError> {
        let total = self.columns.len();
        if left > total || right > total {
            return Err(ConfigError::InvalidFixedCounts { left, right, total });
        }
        self.fixed_leaf_count = left;
        self.right_fixed_leaf_count = right;
        Ok(self)
    }

    /// A table is complex when any column is fixed; only then does the body
    /// mirror the hover row as a class.
    pub fn is_complex(&self) -> bool {
        self.fixed_leaf_count > 0 || self.right_fixed_leaf_count > 0
    }

    pub fn is_expanded(&self, row: &Arc<R>) -> bool {
        self.expanded_rows.iter().any(|r| Arc::ptr_eq(r, row))
    }

    /// Position of a row in `data`, by identity.
    pub fn index_of(&self, row: &Arc<R>) -> Option<usize> {
        self.data.iter().position(|r| Arc::ptr_eq(r, row))
    }
}

impl<R> Clone for TableStates<R> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            columns: self.columns.clone(),
            fixed_leaf_count: self.fixed_leaf_count,
            right_fixed_leaf_count: self.right_fixed_leaf_count,
            current_row: self.current_row.clone(),
            hover_row: self.hover_row,
            expanded_rows: self.expanded_rows.clone(),
        }
    }
}

impl<R> Default for TableStates<R> {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

/// A state change, applied through [`Store::commit`].
#[derive(Debug)]
pub enum Mutation<R> {
    SetData(Vec<Arc<R>>),
    SetColumns(Vec<Arc<Column<R>>>),
    SetFixedLeafCounts { left: usize, right: usize },
    SetHoverRow(Option<usize>),
    SetCurrentRow(Option<Arc<R>>),
    /// Toggle, or force with `Some(expanded)`.
    ToggleRowExpansion(Arc<R>, Option<bool>),
}

impl<R> Mutation<R> {
    fn name(&self) -> &'static str {
        match self {
            Self::SetData(_) => "setData",
            Self::SetColumns(_) => "setColumns",
            Self::SetFixedLeafCounts { .. } => "setFixedLeafCounts",
            Self::SetHoverRow(_) => "setHoverRow",
            Self::SetCurrentRow(_) => "setCurrentRow",
            Self::ToggleRowExpansion(..) => "toggleRowExpansion",
        }
    }
}

/// Shared handle to the table state.
///
/// Cheap to clone. Readers take a [`snapshot`](Store::snapshot) per render
/// pass; the only writer is [`commit`](Store::commit).
#[derive(Debug)]
pub struct Store<R> {
    inner: Arc<RwLock<TableStates<R>>>,
    dirty: Arc<AtomicBool>,
}

impl<R> Store<R> {
    pub fn new(states: TableStates<R>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(states)),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Read through a closure without copying the state.
    pub fn read<T>(&self, f: impl FnOnce(&TableStates<R>) -> T) -> T {
        match self.inner.read() {
            Ok(guard) => f(&guard),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }

    /// Consistent copy of the state for one render pass.
    pub fn snapshot(&self) -> TableStates<R> {
        self.read(TableStates::clone)
    }

    pub fn hover_row(&self) -> Option<usize> {
        self.read(|s| s.hover_row)
    }

    pub fn current_row(&self) -> Option<Arc<R>> {
        self.read(|s| s.current_row.clone())
    }

    /// Apply a mutation. Fixed counts larger than the column model are
    /// clamped.
    pub fn commit(&self, mutation: Mutation<R>) {
        log::debug!("Store: commit {}", mutation.name());

        let mut guard = match self.inner.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let states = &mut *guard;

        match mutation {
            Mutation::SetData(data) => states.data = data,
            Mutation::SetColumns(columns) => {
                states.columns = columns;
                let total = states.columns.len();
                states.fixed_leaf_count = states.fixed_leaf_count.min(total);
                states.right_fixed_leaf_count = states.right_fixed_leaf_count.min(total);
            }
            Mutation::SetFixedLeafCounts { left, right } => {
                let total = states.columns.len();
                if left > total || right > total {
                    log::warn!(
                        "Store: fixed counts (left {left}, right {right}) exceed {total} columns; clamping"
                    );
                }
                states.fixed_leaf_count = left.min(total);
                states.right_fixed_leaf_count = right.min(total);
            }
            Mutation::SetHoverRow(index) => states.hover_row = index,
            Mutation::SetCurrentRow(row) => states.current_row = row,
            Mutation::ToggleRowExpansion(row, expanded) => {
                let position = states.expanded_rows.iter().position(|r| Arc::ptr_eq(r, &row));
                let expand = expanded.unwrap_or(position.is_none());
                match (expand, position) {
                    (true, None) => states.expanded_rows.push(row),
                    (false, Some(i)) => {
                        states.expanded_rows.remove(i);
                    }
                    _ => {}
                }
            }
        }

        self.dirty.store(true, Ordering::SeqCst);
    }

    /// Check if the state has been modified since last check
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl<R> Clone for Store<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl<R> Default for Store<R> {
    fn default() -> Self {
        Self::new(TableStates::default())
    }
}
