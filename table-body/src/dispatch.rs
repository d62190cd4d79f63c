//! Pointer event handling for the table body.
//!
//! Raw pointer events are resolved to the cell they hit by walking up the
//! rendered tree, and to its column through the snapshot the tree was
//! rendered from, then re-emitted as semantic row and cell events.
//! Hover-row commits and tooltip activation are debounced.

use std::sync::Arc;
use std::time::Instant;

use celltree::text::display_width;
use celltree::{Node, PointerEvent, Tag, closest, first_descendant_with_class};

use crate::classify::{CELL_CLASS, TOOLTIP_CLASS};
use crate::column::Column;
use crate::config::Timings;
use crate::render::{ROW_INDEX_DATA, RenderedBody};
use crate::state::{Mutation, Store};
use crate::timer::{Debounce, earliest};

/// Semantic events exposed to the embedding application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableEventKind {
    CellMouseEnter,
    CellMouseLeave,
    CellClick,
    CellDoubleClick,
    CellContextMenu,
    RowClick,
    RowDoubleClick,
    RowContextMenu,
}

impl TableEventKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::CellMouseEnter => "cell-mouse-enter",
            Self::CellMouseLeave => "cell-mouse-leave",
            Self::CellClick => "cell-click",
            Self::CellDoubleClick => "cell-dblclick",
            Self::CellContextMenu => "cell-contextmenu",
            Self::RowClick => "row-click",
            Self::RowDoubleClick => "row-dblclick",
            Self::RowContextMenu => "row-contextmenu",
        }
    }
}

/// A semantic event: which row, column and cell node it concerns, plus the
/// raw event that caused it.
#[derive(Debug)]
pub struct TableEvent<R> {
    pub kind: TableEventKind,
    pub row: Option<Arc<R>>,
    pub column: Option<Arc<Column<R>>>,
    /// ID of the cell node
    pub cell: Option<String>,
    pub event: PointerEvent,
}

/// Last cell the pointer entered.
#[derive(Debug)]
pub struct HoverState<R> {
    pub cell: String,
    pub column: Option<Arc<Column<R>>>,
    pub row: Arc<R>,
}

/// Laid-out geometry of a cell's inline content region.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContentMetrics {
    /// Width of the laid-out content itself.
    pub content_width: f64,
    pub padding_left: f64,
    pub padding_right: f64,
    /// Width of the box available to the content.
    pub box_width: f64,
    /// Scrollable width of the box.
    pub scroll_width: f64,
}

impl ContentMetrics {
    pub fn overflows(&self) -> bool {
        self.content_width + self.padding_left + self.padding_right > self.box_width
            || self.scroll_width > self.box_width
    }
}

/// Host measurement capability used for overflow detection.
pub trait MeasureContent: Send + Sync {
    /// Measure the content region of a cell (its `div.cell`).
    fn measure(&self, content: &Node) -> Option<ContentMetrics>;
}

/// Headless measurement: text display width times a fixed glyph width,
/// against the realised width recorded on the content node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMeasure {
    /// Pixels per display cell of text.
    pub glyph_width: f64,
    /// Horizontal padding on each side.
    pub padding: f64,
}

impl Default for TextMeasure {
    fn default() -> Self {
        Self {
            glyph_width: 8.0,
            padding: 10.0,
        }
    }
}

impl MeasureContent for TextMeasure {
    fn measure(&self, content: &Node) -> Option<ContentMetrics> {
        let box_width = content.get_data("width")?.parse::<f64>().ok()?;
        let content_width = display_width(&content.text_content()) as f64 * self.glyph_width;
        Some(ContentMetrics {
            content_width,
            padding_left: self.padding,
            padding_right: self.padding,
            box_width,
            scroll_width: content_width + 2.0 * self.padding,
        })
    }
}

/// The overflow tooltip collaborator.
pub trait OverflowTooltip: Send {
    fn set_content(&mut self, content: String);
    /// Anchor the tooltip to a cell node.
    fn set_reference(&mut self, cell: &str);
    /// Hide any visible popper immediately.
    fn hide_popper(&mut self);
    /// Tear down the previous popper state.
    fn destroy(&mut self);
    fn set_expected_state(&mut self, expected: bool);
    fn show_popper(&mut self);
    fn close_popper(&mut self);
}

/// Turns raw pointer events on the body into semantic events and the
/// debounced hover/tooltip effects.
///
/// State changes go through [`Store::commit`] only.
pub struct EventDispatcher<R> {
    store: Store<R>,
    measure: Arc<dyn MeasureContent>,
    tooltip: Option<Box<dyn OverflowTooltip>>,
    hover_commit: Debounce<Option<usize>>,
    tooltip_activation: Debounce<()>,
    hover_state: Option<HoverState<R>>,
    events: Vec<TableEvent<R>>,
    torn_down: bool,
}

impl<R> EventDispatcher<R> {
    pub fn new(store: Store<R>, timings: Timings, measure: Arc<dyn MeasureContent>) -> Self {
        Self {
            store,
            measure,
            tooltip: None,
            hover_commit: Debounce::new(timings.hover_debounce),
            tooltip_activation: Debounce::new(timings.tooltip_debounce),
            hover_state: None,
            events: Vec::new(),
            torn_down: false,
        }
    }

    pub fn set_tooltip(&mut self, tooltip: Box<dyn OverflowTooltip>) {
        self.tooltip = Some(tooltip);
    }

    pub fn hover_state(&self) -> Option<&HoverState<R>> {
        self.hover_state.as_ref()
    }

    /// Take all semantic events emitted so far.
    pub fn drain_events(&mut self) -> Vec<TableEvent<R>> {
        std::mem::take(&mut self.events)
    }

    // ------------------------------------------------------------------
    // Click family
    // ------------------------------------------------------------------

    /// Click: the row becomes the current row, then cell and row events.
    pub fn on_click(&mut self, body: &RenderedBody<R>, event: &PointerEvent, row: &Arc<R>) {
        self.store.commit(Mutation::SetCurrentRow(Some(Arc::clone(row))));
        self.handle_event(
            body,
            event,
            row,
            TableEventKind::CellClick,
            TableEventKind::RowClick,
        );
    }

    pub fn on_double_click(&mut self, body: &RenderedBody<R>, event: &PointerEvent, row: &Arc<R>) {
        self.handle_event(
            body,
            event,
            row,
            TableEventKind::CellDoubleClick,
            TableEventKind::RowDoubleClick,
        );
    }

    pub fn on_context_menu(&mut self, body: &RenderedBody<R>, event: &PointerEvent, row: &Arc<R>) {
        self.handle_event(
            body,
            event,
            row,
            TableEventKind::CellContextMenu,
            TableEventKind::RowContextMenu,
        );
    }

    fn handle_event(
        &mut self,
        body: &RenderedBody<R>,
        event: &PointerEvent,
        row: &Arc<R>,
        cell_kind: TableEventKind,
        row_kind: TableEventKind,
    ) {
        let cell = cell_of(&body.tree, event);
        let column = cell.and_then(|cell| body.column_of(cell)).cloned();

        if let (Some(cell), Some(column)) = (cell, &column) {
            self.emit(TableEvent {
                kind: cell_kind,
                row: Some(Arc::clone(row)),
                column: Some(Arc::clone(column)),
                cell: Some(cell.id.clone()),
                event: event.clone(),
            });
        }

        self.emit(TableEvent {
            kind: row_kind,
            row: Some(Arc::clone(row)),
            column,
            cell: None,
            event: event.clone(),
        });
    }

    // ------------------------------------------------------------------
    // Hover
    // ------------------------------------------------------------------

    /// Pointer entered a row: schedule the hover-row commit.
    pub fn on_row_enter(&mut self, row_index: usize, now: Instant) {
        self.schedule_hover(Some(row_index), now);
    }

    /// Pointer left a row: schedule clearing the hover row.
    pub fn on_row_leave(&mut self, now: Instant) {
        self.schedule_hover(None, now);
    }

    fn schedule_hover(&mut self, index: Option<usize>, now: Instant) {
        if self.torn_down {
            return;
        }
        self.hover_commit.trigger(index, now);
    }

    /// Pointer entered a cell.
    ///
    /// Records the hover target, emits `cell-mouse-enter`, schedules the
    /// hover-row commit and, when the cell's content overflows, schedules
    /// the overflow tooltip.
    pub fn on_cell_enter(
        &mut self,
        body: &RenderedBody<R>,
        event: &PointerEvent,
        row: &Arc<R>,
        now: Instant,
    ) {
        let Some(cell) = cell_of(&body.tree, event) else {
            return;
        };

        let column = body.column_of(cell).cloned();
        self.hover_state = Some(HoverState {
            cell: cell.id.clone(),
            column: column.clone(),
            row: Arc::clone(row),
        });
        self.emit(TableEvent {
            kind: TableEventKind::CellMouseEnter,
            row: Some(Arc::clone(row)),
            column,
            cell: Some(cell.id.clone()),
            event: event.clone(),
        });

        let row_index = cell
            .get_data(ROW_INDEX_DATA)
            .and_then(|index| index.parse::<usize>().ok())
            .or_else(|| body.states.index_of(row));
        if let Some(index) = row_index {
            self.schedule_hover(Some(index), now);
        }

        self.check_overflow(cell, now);
    }

    fn check_overflow(&mut self, cell: &Node, now: Instant) {
        if self.torn_down {
            return;
        }

        let Some(content) = first_descendant_with_class(cell, CELL_CLASS) else {
            return;
        };
        if !(content.has_class(TOOLTIP_CLASS) && !content.child_nodes().is_empty()) {
            return;
        }
        let Some(metrics) = self.measure.measure(content) else {
            return;
        };
        if !metrics.overflows() {
            return;
        }
        let Some(tooltip) = self.tooltip.as_mut() else {
            return;
        };

        log::debug!("EventDispatcher: content of {} overflows, scheduling tooltip", cell.id);
        tooltip.set_content(cell.text_content());
        tooltip.set_reference(&cell.id);
        tooltip.hide_popper();
        tooltip.destroy();
        tooltip.set_expected_state(true);
        self.tooltip_activation.trigger((), now);
    }

    /// Pointer left a cell: close the tooltip and emit `cell-mouse-leave`
    /// for the last-known hover target.
    pub fn on_cell_leave(&mut self, body: &RenderedBody<R>, event: &PointerEvent) {
        self.tooltip_activation.cancel();
        if let Some(tooltip) = self.tooltip.as_mut() {
            tooltip.set_expected_state(false);
            tooltip.close_popper();
        }

        let leave = match (&self.hover_state, cell_of(&body.tree, event)) {
            (Some(hover), _) => Some(TableEvent {
                kind: TableEventKind::CellMouseLeave,
                row: Some(Arc::clone(&hover.row)),
                column: hover.column.clone(),
                cell: Some(hover.cell.clone()),
                event: event.clone(),
            }),
            (None, Some(cell)) => Some(TableEvent {
                kind: TableEventKind::CellMouseLeave,
                row: None,
                column: body.column_of(cell).cloned(),
                cell: Some(cell.id.clone()),
                event: event.clone(),
            }),
            (None, None) => None,
        };

        if let Some(leave) = leave {
            self.emit(leave);
        }
    }

    // ------------------------------------------------------------------
    // Timers
    // ------------------------------------------------------------------

    /// Fire every deferred effect whose deadline has passed.
    pub fn poll(&mut self, now: Instant) {
        if self.torn_down {
            return;
        }

        if let Some(index) = self.hover_commit.poll(now) {
            log::debug!("EventDispatcher: committing hover row {index:?}");
            self.store.commit(Mutation::SetHoverRow(index));
        }

        if self.tooltip_activation.poll(now).is_some() {
            if let Some(tooltip) = self.tooltip.as_mut() {
                log::debug!("EventDispatcher: activating overflow tooltip");
                tooltip.show_popper();
            }
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        earliest(self.hover_commit.deadline(), self.tooltip_activation.deadline())
    }

    /// Cancel pending effects; nothing fires after this.
    pub fn teardown(&mut self) {
        log::debug!("EventDispatcher: teardown");
        self.hover_commit.cancel();
        self.tooltip_activation.cancel();
        self.torn_down = true;
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    fn emit(&mut self, event: TableEvent<R>) {
        log::trace!("EventDispatcher: emit {}", event.kind.name());
        self.events.push(event);
    }
}

/// Nearest cell at or above the event target.
pub fn cell_of<'a>(body: &'a Node, event: &PointerEvent) -> Option<&'a Node> {
    let target = event.target.as_deref()?;
    closest(body, target, |node| node.tag == Tag::Td)
}

/// Nearest row at or above the event target.
pub fn row_node_of<'a>(body: &'a Node, event: &PointerEvent) -> Option<&'a Node> {
    let target = event.target.as_deref()?;
    closest(body, target, |node| node.tag == Tag::Tr)
}
