//! Body rendering: rows × columns into a tree of cell nodes.

use std::borrow::Cow;
use std::sync::Arc;

use celltree::Node;

use crate::classify::{
    BODY_CLASS, EXPANDED_CELL_CLASS, cell_class, cell_style, row_classes, row_style,
};
use crate::column::{Column, ColumnKind};
use crate::config::{BodyConfig, Scope};
use crate::layout::{aggregate_width, resolve_span};
use crate::row::{TableRow, key_of_row};
use crate::state::{Store, TableStates};

/// Data attribute carrying a row's display index on row and cell nodes.
pub const ROW_INDEX_DATA: &str = "row-index";
/// Data attribute carrying a cell's column index.
pub const COLUMN_INDEX_DATA: &str = "column-index";

/// Arguments of a cell-rendering function.
///
/// Created fresh for every cell and dropped once the cell node exists.
pub struct RenderContext<'a, R> {
    pub store: &'a Store<R>,
    /// Enclosing scope configured on the body, if any.
    pub scope: Option<&'a Scope>,
    /// The column, with `real_width` widened when the cell spans columns.
    pub column: &'a Column<R>,
    pub row: &'a Arc<R>,
    pub row_index: usize,
}

/// Arguments of the expanded-row renderer.
pub struct ExpandContext<'a, R> {
    pub store: &'a Store<R>,
    pub row: &'a Arc<R>,
    pub row_index: usize,
}

pub type ExpandRenderer<R> = Arc<dyn Fn(&ExpandContext<'_, R>) -> Node + Send + Sync>;

/// A rendered tree together with the state snapshot it was rendered from.
///
/// Pointer events on the tree resolve rows and columns through `states`,
/// so they refer to what is on screen even after later commits.
pub struct RenderedBody<R> {
    pub tree: Node,
    pub states: TableStates<R>,
}

impl<R> RenderedBody<R> {
    /// Row rendered at a display index.
    pub fn row_at(&self, row_index: usize) -> Option<&Arc<R>> {
        self.states.data.get(row_index)
    }

    /// Column owning a cell node, by the column index recorded on it.
    pub fn column_of(&self, cell: &Node) -> Option<&Arc<Column<R>>> {
        let index = cell.get_data(COLUMN_INDEX_DATA)?.parse::<usize>().ok()?;
        self.states.columns.get(index)
    }
}

/// Render the body table from one snapshot of the store and keep that
/// snapshot beside the tree.
///
/// The pass only reads: it never commits.
pub fn render_snapshot<R: TableRow>(store: &Store<R>, config: &BodyConfig<R>) -> RenderedBody<R> {
    let states = store.snapshot();
    let tree = BodyRenderer {
        store,
        config,
        states: &states,
    }
    .render();
    RenderedBody { tree, states }
}

/// Render the body table for the current state.
pub fn render_body<R: TableRow>(store: &Store<R>, config: &BodyConfig<R>) -> Node {
    render_snapshot(store, config).tree
}

struct BodyRenderer<'a, R> {
    store: &'a Store<R>,
    config: &'a BodyConfig<R>,
    states: &'a TableStates<R>,
}

impl<R: TableRow> BodyRenderer<'_, R> {
    fn render(&self) -> Node {
        log::trace!(
            "render body: {} rows x {} columns ({:?})",
            self.states.data.len(),
            self.states.columns.len(),
            self.config.fixed
        );

        let rows = self
            .states
            .data
            .iter()
            .enumerate()
            .flat_map(|(index, row)| self.wrapped_row_render(row, index));

        Node::table()
            .class(BODY_CLASS)
            .attr("cellspacing", 0)
            .attr("cellpadding", 0)
            .attr("border", 0)
            .child(self.colgroup())
            .child(Node::tbody().children(rows))
    }

    /// One `col` per column, present even with no rows so fixed layout holds.
    fn colgroup(&self) -> Node {
        Node::colgroup().children(self.states.columns.iter().map(|column| {
            Node::col()
                .key(column.id.clone())
                .attr("name", &column.id)
                .attr("width", column.real_width)
        }))
    }

    fn has_expand_column(&self) -> bool {
        self.states
            .columns
            .iter()
            .any(|column| column.kind == ColumnKind::Expand)
    }

    fn wrapped_row_render(&self, row: &Arc<R>, index: usize) -> Vec<Node> {
        let tr = self.row_render(row, index);

        let expanded = match &self.config.render_expanded {
            Some(render) if self.has_expand_column() && self.states.is_expanded(row) => {
                let content = render(&ExpandContext {
                    store: self.store,
                    row,
                    row_index: index,
                });
                Some(
                    Node::tr()
                        .key(format!("expanded-row__{}", tr.key.as_deref().unwrap_or_default()))
                        .child(
                            Node::td()
                                .class(EXPANDED_CELL_CLASS)
                                .attr("colspan", self.states.columns.len())
                                .child(content),
                        ),
                )
            }
            _ => None,
        };

        std::iter::once(tr).chain(expanded).collect()
    }

    fn row_render(&self, row: &Arc<R>, index: usize) -> Node {
        let key = key_of_row(&**row, index, self.config.row_key.as_ref());

        let cells = self
            .states
            .columns
            .iter()
            .enumerate()
            .filter_map(|(column_index, column)| {
                self.cell_render(row, index, column, column_index)
            });

        Node::tr()
            .key(key)
            .classes(row_classes(self.config, self.states, row, index))
            .maybe_style(row_style(self.config, row, index))
            .data(ROW_INDEX_DATA, index)
            .children(cells)
    }

    fn cell_render(
        &self,
        row: &Arc<R>,
        row_index: usize,
        column: &Arc<Column<R>>,
        column_index: usize,
    ) -> Option<Node> {
        let span = resolve_span(
            self.config.span_method.as_ref(),
            row,
            column,
            row_index,
            column_index,
        );
        if span.is_suppressed() {
            return None;
        }

        // Columns absorbed by this span are still visited and resolve their
        // own spans; keeping the policy consistent is the caller's job.
        let column: Cow<'_, Column<R>> = if span.colspan >= 2 {
            let width = aggregate_width(&self.states.columns, span.colspan, column_index);
            Cow::Owned(column.with_real_width(width))
        } else {
            Cow::Borrowed(&**column)
        };

        let ctx = RenderContext {
            store: self.store,
            scope: self.config.scope.as_ref(),
            column: &column,
            row,
            row_index,
        };

        Some(
            Node::td()
                .classes([cell_class(
                    self.config,
                    self.states,
                    row_index,
                    column_index,
                    row,
                    &column,
                )])
                .maybe_style(cell_style(self.config, row_index, column_index, row, &column))
                .attr("rowspan", span.rowspan)
                .attr("colspan", span.colspan)
                .data(ROW_INDEX_DATA, row_index)
                .data(COLUMN_INDEX_DATA, column_index)
                .child(column.render_cell(&ctx)),
        )
    }
}
