//! The table body component: renders from the shared store, routes pointer
//! events to the dispatcher and runs the deferred effects.

use std::sync::Arc;
use std::time::Instant;

use celltree::{Node, PointerEvent, PointerKind, nth_with_class_mut};

use crate::classify::{HOVER_ROW_CLASS, ROW_CLASS};
use crate::config::BodyConfig;
use crate::dispatch::{
    EventDispatcher, HoverState, OverflowTooltip, TableEvent, TextMeasure, cell_of, row_node_of,
};
use crate::render::{ROW_INDEX_DATA, RenderedBody, render_snapshot};
use crate::row::TableRow;
use crate::state::Store;
use crate::timer::{FixedFrameTimer, FrameScheduler, earliest, sleep_until_optional};

/// Class change mirroring a hover-row move: `hover-row` comes off the row at
/// `old` and goes onto the row at `new`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverPatch {
    pub old: Option<usize>,
    pub new: Option<usize>,
}

/// Toggle `hover-row` on the body rows named by the patch. Rows are counted
/// among `el-table__row` nodes, so expanded-content rows are skipped.
pub fn apply_hover_patch(tree: &mut Node, patch: HoverPatch) {
    if let Some(index) = patch.old {
        if let Some(row) = nth_with_class_mut(tree, ROW_CLASS, index) {
            row.remove_class(HOVER_ROW_CLASS);
        }
    }
    if let Some(index) = patch.new {
        if let Some(row) = nth_with_class_mut(tree, ROW_CLASS, index) {
            row.add_class(HOVER_ROW_CLASS);
        }
    }
}

/// A table body bound to a store.
///
/// # Example
///
/// ```ignore
/// let store = Store::new(TableStates::new(rows, columns));
/// let mut body = TableBody::new(store, BodyConfig::new().stripe());
/// body.render();
/// body.handle(PointerEvent::new(PointerKind::Click, cell_id), Instant::now());
/// for event in body.drain_events() {
///     println!("{}", event.kind.name());
/// }
/// ```
pub struct TableBody<R> {
    store: Store<R>,
    config: BodyConfig<R>,
    dispatcher: EventDispatcher<R>,
    frames: Arc<dyn FrameScheduler>,
    rendered: Option<RenderedBody<R>>,
    observed_hover: Option<usize>,
    pending_patches: Vec<(Instant, HoverPatch)>,
    torn_down: bool,
}

impl<R: TableRow> TableBody<R> {
    pub fn new(store: Store<R>, config: BodyConfig<R>) -> Self {
        let measure = config
            .measure
            .clone()
            .unwrap_or_else(|| Arc::new(TextMeasure::default()));
        let frames = config
            .frame_scheduler
            .clone()
            .unwrap_or_else(|| Arc::new(FixedFrameTimer::new(config.timings.frame_fallback)));
        let dispatcher = EventDispatcher::new(store.clone(), config.timings, measure);
        let observed_hover = store.hover_row();

        Self {
            store,
            config,
            dispatcher,
            frames,
            rendered: None,
            observed_hover,
            pending_patches: Vec::new(),
            torn_down: false,
        }
    }

    pub fn set_tooltip(&mut self, tooltip: Box<dyn OverflowTooltip>) {
        self.dispatcher.set_tooltip(tooltip);
    }

    pub fn store(&self) -> &Store<R> {
        &self.store
    }

    pub fn config(&self) -> &BodyConfig<R> {
        &self.config
    }

    /// The last rendered tree.
    pub fn tree(&self) -> Option<&Node> {
        self.rendered.as_ref().map(|rendered| &rendered.tree)
    }

    /// The last rendered tree with the snapshot it was rendered from.
    pub fn rendered(&self) -> Option<&RenderedBody<R>> {
        self.rendered.as_ref()
    }

    pub fn hover_state(&self) -> Option<&HoverState<R>> {
        self.dispatcher.hover_state()
    }

    /// Whether the store changed since the last render.
    pub fn needs_render(&self) -> bool {
        self.rendered.is_none() || self.store.is_dirty()
    }

    /// Render the body from a fresh snapshot of the store.
    pub fn render(&mut self) -> &Node {
        let mut rendered = render_snapshot(&self.store, &self.config);
        self.store.clear_dirty();

        if rendered.states.is_complex() && self.observed_hover.is_some() {
            apply_hover_patch(
                &mut rendered.tree,
                HoverPatch {
                    old: None,
                    new: self.observed_hover,
                },
            );
        }

        &self.rendered.insert(rendered).tree
    }

    /// Route a raw pointer event to the row and cell handlers.
    ///
    /// The owning row is found by walking up from the target to its row
    /// node and looking its index up in the rendered snapshot, so commits
    /// since the last render never redirect an event. Events that hit
    /// nothing in the last rendered tree only reach the leave handlers,
    /// which fall back to the last hover target.
    pub fn handle(&mut self, event: PointerEvent, now: Instant) {
        let Some(rendered) = self.rendered.as_ref() else {
            return;
        };

        let row_index = row_node_of(&rendered.tree, &event)
            .and_then(|tr| tr.get_data(ROW_INDEX_DATA))
            .and_then(|index| index.parse::<usize>().ok());
        let row = row_index.and_then(|index| rendered.row_at(index).cloned());
        let on_cell = cell_of(&rendered.tree, &event).is_some();

        match (event.kind, row) {
            (PointerKind::Click, Some(row)) => self.dispatcher.on_click(rendered, &event, &row),
            (PointerKind::DoubleClick, Some(row)) => {
                self.dispatcher.on_double_click(rendered, &event, &row)
            }
            (PointerKind::ContextMenu, Some(row)) => {
                self.dispatcher.on_context_menu(rendered, &event, &row)
            }
            (PointerKind::Enter, Some(row)) => {
                if on_cell {
                    self.dispatcher.on_cell_enter(rendered, &event, &row, now);
                } else if let Some(index) = row_index {
                    self.dispatcher.on_row_enter(index, now);
                }
            }
            (PointerKind::Leave, _) => {
                if on_cell {
                    self.dispatcher.on_cell_leave(rendered, &event);
                } else if row_index.is_some() {
                    self.dispatcher.on_row_leave(now);
                } else {
                    self.dispatcher.on_cell_leave(rendered, &event);
                    self.dispatcher.on_row_leave(now);
                }
            }
            (kind, None) => {
                log::trace!("TableBody: {} outside any body row", kind.name());
            }
        }
    }

    /// Take all semantic events emitted so far.
    pub fn drain_events(&mut self) -> Vec<TableEvent<R>> {
        self.dispatcher.drain_events()
    }

    /// Run every deferred effect due at `now`: debounced commits, tooltip
    /// activation and hover-row class patches.
    pub fn tick(&mut self, now: Instant) {
        if self.torn_down {
            return;
        }

        self.dispatcher.poll(now);
        self.sync_hover(now);

        let (due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending_patches)
            .into_iter()
            .partition(|(at, _)| *at <= now);
        self.pending_patches = pending;

        if let Some(rendered) = self.rendered.as_mut() {
            for (_, patch) in due {
                apply_hover_patch(&mut rendered.tree, patch);
            }
        }
    }

    /// Watch the store's hover row; on change, defer the class toggle to the
    /// next frame so it never happens inside a render pass.
    fn sync_hover(&mut self, now: Instant) {
        let (hover, complex) = self.store.read(|s| (s.hover_row, s.is_complex()));
        if hover == self.observed_hover {
            return;
        }

        let old = std::mem::replace(&mut self.observed_hover, hover);
        if complex {
            let at = self.frames.next_frame(now);
            log::debug!("TableBody: hover row {old:?} -> {hover:?}, patch scheduled");
            self.pending_patches.push((at, HoverPatch { old, new: hover }));
        }
    }

    /// When [`tick`](Self::tick) next has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        let patches = self.pending_patches.iter().map(|(at, _)| *at).min();
        earliest(self.dispatcher.next_deadline(), patches)
    }

    /// Sleep through deadlines until no deferred effect is pending.
    pub async fn settle(&mut self) {
        loop {
            self.tick(Instant::now());
            let Some(deadline) = self.next_deadline() else {
                break;
            };
            sleep_until_optional(Some(deadline)).await;
        }
    }

    /// Cancel all pending effects. The body ignores ticks afterwards.
    pub fn teardown(&mut self) {
        self.dispatcher.teardown();
        self.pending_patches.clear();
        self.torn_down = true;
    }
}
