use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::content::Content;
use crate::style::InlineStyle;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

/// The kind of node, mirroring the handful of table elements a body emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Table,
    Colgroup,
    Col,
    Tbody,
    Tr,
    Td,
    Div,
    Span,
}

impl Tag {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Colgroup => "colgroup",
            Self::Col => "col",
            Self::Tbody => "tbody",
            Self::Tr => "tr",
            Self::Td => "td",
            Self::Div => "div",
            Self::Span => "span",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    // Identity
    pub id: String,
    pub tag: Tag,
    /// Reconciliation key, stable across renders when the producer derives it
    /// from data identity.
    pub key: Option<String>,

    // Content
    pub content: Content,

    // Visual
    pub classes: Vec<String>,
    pub style: Option<InlineStyle>,

    // Markup attributes (rowspan, colspan, name, width, ...)
    pub attrs: BTreeMap<String, String>,

    // Custom data storage (row/column indices, measured widths, etc.)
    pub data: HashMap<String, String>,
}

impl Node {
    pub fn new(tag: Tag) -> Self {
        Self {
            id: generate_id(tag.name()),
            tag,
            key: None,
            content: Content::None,
            classes: Vec::new(),
            style: None,
            attrs: BTreeMap::new(),
            data: HashMap::new(),
        }
    }

    pub fn table() -> Self {
        Self::new(Tag::Table)
    }

    pub fn colgroup() -> Self {
        Self::new(Tag::Colgroup)
    }

    pub fn col() -> Self {
        Self::new(Tag::Col)
    }

    pub fn tbody() -> Self {
        Self::new(Tag::Tbody)
    }

    pub fn tr() -> Self {
        Self::new(Tag::Tr)
    }

    pub fn td() -> Self {
        Self::new(Tag::Td)
    }

    pub fn div() -> Self {
        Self::new(Tag::Div)
    }

    /// Inline text node.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Content::Text(content.into()),
            ..Self::new(Tag::Span)
        }
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    // Classes

    /// Append a single class token. Empty tokens are dropped.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.add_class(class);
        self
    }

    /// Append every whitespace-separated token of each item.
    pub fn classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for class in classes {
            for token in class.as_ref().split_whitespace() {
                self.add_class(token);
            }
        }
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        if class.is_empty() || self.has_class(&class) {
            return;
        }
        self.classes.push(class);
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Space-separated class attribute value.
    pub fn class_string(&self) -> String {
        self.classes.join(" ")
    }

    // Visual
    pub fn style(mut self, style: InlineStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn maybe_style(mut self, style: Option<InlineStyle>) -> Self {
        self.style = style;
        self
    }

    // Attributes
    pub fn attr(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.attrs.insert(name.into(), value.to_string());
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    // Custom data
    pub fn data(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.data.insert(key.into(), value.to_string());
        self
    }

    pub fn get_data(&self, key: &str) -> Option<&String> {
        self.data.get(key)
    }

    // Children
    pub fn child(mut self, child: Node) -> Self {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            _ => self.content = Content::Children(vec![child]),
        }
        self
    }

    pub fn children(mut self, new_children: impl IntoIterator<Item = Node>) -> Self {
        match &mut self.content {
            Content::Children(children) => children.extend(new_children),
            _ => self.content = Content::Children(new_children.into_iter().collect()),
        }
        self
    }

    pub fn child_nodes(&self) -> &[Node] {
        self.content.children()
    }

    /// Concatenated text of this node and all descendants, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match &self.content {
            Content::None => {}
            Content::Text(text) => out.push_str(text),
            Content::Children(children) => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }
}
