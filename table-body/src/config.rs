//! Body configuration.

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use celltree::InlineStyle;

use crate::classify::{
    CellClassFn, CellContext, CellStyleFn, ClassName, RowClassFn, RowContext, RowStyleFn,
    StyleOption,
};
use crate::dispatch::MeasureContent;
use crate::layout::{FixedMode, SpanMethod};
use crate::render::{ExpandContext, ExpandRenderer};
use crate::row::RowKey;
use crate::timer::FrameScheduler;

/// Opaque enclosing scope handed to every cell renderer.
pub type Scope = Arc<dyn Any + Send + Sync>;

/// Delays of the deferred effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// Window within which hover-row updates are coalesced.
    pub hover_debounce: Duration,
    /// Window within which tooltip activations are coalesced.
    pub tooltip_debounce: Duration,
    /// Frame delay used when the host provides no frame scheduler.
    pub frame_fallback: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            hover_debounce: Duration::from_millis(30),
            tooltip_debounce: Duration::from_millis(50),
            frame_fallback: Duration::from_millis(16),
        }
    }
}

/// Table-wide policy consumed by the body.
///
/// Every optional collaborator may be absent; absence means the feature is
/// off, never an error.
pub struct BodyConfig<R> {
    pub stripe: bool,
    /// Mark the current row with `current-row`.
    pub highlight_current_row: bool,
    /// Panel this body renders into.
    pub fixed: FixedMode,
    pub row_key: Option<RowKey<R>>,
    pub span_method: Option<SpanMethod<R>>,
    pub row_class_name: Option<ClassName<RowClassFn<R>>>,
    pub row_style: Option<StyleOption<RowStyleFn<R>>>,
    pub cell_class_name: Option<ClassName<CellClassFn<R>>>,
    pub cell_style: Option<StyleOption<CellStyleFn<R>>>,
    pub scope: Option<Scope>,
    pub render_expanded: Option<ExpandRenderer<R>>,
    pub timings: Timings,
    pub frame_scheduler: Option<Arc<dyn FrameScheduler>>,
    pub measure: Option<Arc<dyn MeasureContent>>,
}

impl<R> Default for BodyConfig<R> {
    fn default() -> Self {
        Self {
            stripe: false,
            highlight_current_row: true,
            fixed: FixedMode::Unfixed,
            row_key: None,
            span_method: None,
            row_class_name: None,
            row_style: None,
            cell_class_name: None,
            cell_style: None,
            scope: None,
            render_expanded: None,
            timings: Timings::default(),
            frame_scheduler: None,
            measure: None,
        }
    }
}

impl<R> BodyConfig<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stripe odd rows.
    pub fn stripe(mut self) -> Self {
        self.stripe = true;
        self
    }

    pub fn highlight_current_row(mut self, highlight: bool) -> Self {
        self.highlight_current_row = highlight;
        self
    }

    pub fn fixed(mut self, fixed: FixedMode) -> Self {
        self.fixed = fixed;
        self
    }

    pub fn row_key(mut self, key: RowKey<R>) -> Self {
        self.row_key = Some(key);
        self
    }

    pub fn span_method(mut self, method: SpanMethod<R>) -> Self {
        self.span_method = Some(method);
        self
    }

    pub fn row_class_name(mut self, class: impl Into<String>) -> Self {
        self.row_class_name = Some(ClassName::Literal(class.into()));
        self
    }

    pub fn row_class_with(
        mut self,
        f: impl Fn(&RowContext<'_, R>) -> String + Send + Sync + 'static,
    ) -> Self {
        self.row_class_name = Some(ClassName::Callback(Arc::new(f)));
        self
    }

    pub fn row_style(mut self, style: InlineStyle) -> Self {
        self.row_style = Some(StyleOption::Literal(style));
        self
    }

    pub fn row_style_with(
        mut self,
        f: impl Fn(&RowContext<'_, R>) -> Option<InlineStyle> + Send + Sync + 'static,
    ) -> Self {
        self.row_style = Some(StyleOption::Callback(Arc::new(f)));
        self
    }

    pub fn cell_class_name(mut self, class: impl Into<String>) -> Self {
        self.cell_class_name = Some(ClassName::Literal(class.into()));
        self
    }

    pub fn cell_class_with(
        mut self,
        f: impl Fn(&CellContext<'_, R>) -> String + Send + Sync + 'static,
    ) -> Self {
        self.cell_class_name = Some(ClassName::Callback(Arc::new(f)));
        self
    }

    pub fn cell_style(mut self, style: InlineStyle) -> Self {
        self.cell_style = Some(StyleOption::Literal(style));
        self
    }

    pub fn cell_style_with(
        mut self,
        f: impl Fn(&CellContext<'_, R>) -> Option<InlineStyle> + Send + Sync + 'static,
    ) -> Self {
        self.cell_style = Some(StyleOption::Callback(Arc::new(f)));
        self
    }

    pub fn scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Content of the extra row shown under an expanded row.
    pub fn render_expanded(
        mut self,
        f: impl Fn(&ExpandContext<'_, R>) -> celltree::Node + Send + Sync + 'static,
    ) -> Self {
        self.render_expanded = Some(Arc::new(f));
        self
    }

    pub fn timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    pub fn frame_scheduler(mut self, scheduler: Arc<dyn FrameScheduler>) -> Self {
        self.frame_scheduler = Some(scheduler);
        self
    }

    pub fn measure(mut self, measure: Arc<dyn MeasureContent>) -> Self {
        self.measure = Some(measure);
        self
    }
}

impl<R> fmt::Debug for BodyConfig<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BodyConfig")
            .field("stripe", &self.stripe)
            .field("highlight_current_row", &self.highlight_current_row)
            .field("fixed", &self.fixed)
            .field("row_key", &self.row_key)
            .field("span_method", &self.span_method)
            .field("row_class_name", &self.row_class_name)
            .field("row_style", &self.row_style)
            .field("cell_class_name", &self.cell_class_name)
            .field("cell_style", &self.cell_style)
            .field("scope", &self.scope.as_ref().map(|_| ".."))
            .field("render_expanded", &self.render_expanded.as_ref().map(|_| ".."))
            .field("timings", &self.timings)
            .finish_non_exhaustive()
    }
}
