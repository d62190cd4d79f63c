pub mod content;
pub mod event;
pub mod node;
pub mod query;
pub mod style;
pub mod text;

pub use content::Content;
pub use event::{Modifiers, MouseButton, PointerEvent, PointerKind};
pub use node::{Node, Tag};
pub use query::{
    ancestors, closest, find, find_mut, first_descendant_with_class, nth_with_class_mut,
    query_class,
};
pub use style::InlineStyle;
