//! Column descriptors.

use std::fmt;
use std::sync::Arc;

use celltree::Node;
use serde::{Deserialize, Serialize};

use crate::classify::{CELL_CLASS, TOOLTIP_CLASS};
use crate::render::RenderContext;
use crate::row::TableRow;

/// Horizontal alignment for column content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    /// Class token added to every cell of an aligned column.
    pub fn class_token(&self) -> &'static str {
        match self {
            Self::Left => "is-left",
            Self::Center => "is-center",
            Self::Right => "is-right",
        }
    }
}

/// Type tag of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    #[default]
    Default,
    Expand,
    Selection,
    Index,
}

/// Cell-rendering function. Its output becomes the content of the cell.
pub type CellRenderer<R> = Arc<dyn Fn(&RenderContext<'_, R>) -> Node + Send + Sync>;

/// Column configuration.
///
/// Columns are immutable during a render pass. When a span widens a cell,
/// the renderer works on a shallow copy with an adjusted `real_width`.
///
/// # Examples
///
/// ```ignore
/// let columns = vec![
///     Column::new("col_name").property("name").width(120),
///     Column::new("col_age").property("age").width(60).align(Alignment::Right),
/// ];
/// ```
pub struct Column<R> {
    /// Unique column id, also emitted as a class on every cell
    pub id: String,
    pub kind: ColumnKind,
    /// Field rendered when no custom renderer is set
    pub property: Option<String>,
    pub align: Option<Alignment>,
    pub class_name: Option<String>,
    /// Realised pixel width after table layout
    pub real_width: i32,
    /// Whether overflowing text in this column gets a tooltip
    pub show_overflow_tooltip: bool,
    renderer: Option<CellRenderer<R>>,
}

impl<R> Column<R> {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: ColumnKind::Default,
            property: None,
            align: None,
            class_name: None,
            real_width: 0,
            show_overflow_tooltip: false,
            renderer: None,
        }
    }

    pub fn kind(mut self, kind: ColumnKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn property(mut self, property: impl Into<String>) -> Self {
        self.property = Some(property.into());
        self
    }

    pub fn align(mut self, align: Alignment) -> Self {
        self.align = Some(align);
        self
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn width(mut self, width: i32) -> Self {
        self.real_width = width;
        self
    }

    pub fn show_overflow_tooltip(mut self) -> Self {
        self.show_overflow_tooltip = true;
        self
    }

    pub fn renderer(
        mut self,
        renderer: impl Fn(&RenderContext<'_, R>) -> Node + Send + Sync + 'static,
    ) -> Self {
        self.renderer = Some(Arc::new(renderer));
        self
    }

    /// Shallow copy carrying a different realised width.
    pub fn with_real_width(&self, real_width: i32) -> Self {
        Self {
            real_width,
            ..self.clone()
        }
    }
}

impl<R: TableRow> Column<R> {
    /// Render the content of one cell of this column.
    ///
    /// The renderer output (or the `property` text) is wrapped in a
    /// `div.cell`, which also carries `el-tooltip` when overflow tooltips
    /// are enabled and the realised width for measurement.
    pub fn render_cell(&self, ctx: &RenderContext<'_, R>) -> Node {
        let inner = match &self.renderer {
            Some(renderer) => renderer(ctx),
            None => Node::text(
                self.property
                    .as_deref()
                    .and_then(|path| ctx.row.field(path))
                    .unwrap_or_default(),
            ),
        };

        let mut cell = Node::div()
            .class(CELL_CLASS)
            .data("width", ctx.column.real_width);
        if self.show_overflow_tooltip {
            cell = cell.class(TOOLTIP_CLASS);
        }
        cell.child(inner)
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            kind: self.kind,
            property: self.property.clone(),
            align: self.align,
            class_name: self.class_name.clone(),
            real_width: self.real_width,
            show_overflow_tooltip: self.show_overflow_tooltip,
            renderer: self.renderer.clone(),
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("property", &self.property)
            .field("align", &self.align)
            .field("class_name", &self.class_name)
            .field("real_width", &self.real_width)
            .field("show_overflow_tooltip", &self.show_overflow_tooltip)
            .field("renderer", &self.renderer.as_ref().map(|_| ".."))
            .finish()
    }
}
