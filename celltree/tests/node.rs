use celltree::text::display_width;
use celltree::{InlineStyle, Node};

#[test]
fn test_class_tokens_split_and_deduplicated() {
    let node = Node::td().classes(["col-a is-center", "", "col-a", "custom"]);
    assert_eq!(node.class_string(), "col-a is-center custom");
}

#[test]
fn test_add_remove_class() {
    let mut node = Node::tr().class("el-table__row");
    node.add_class("hover-row");
    assert!(node.has_class("hover-row"));
    node.remove_class("hover-row");
    assert!(!node.has_class("hover-row"));
    assert_eq!(node.classes, vec!["el-table__row".to_string()]);
}

#[test]
fn test_attrs_and_data() {
    let node = Node::td().attr("colspan", 2).data("column-index", 3);
    assert_eq!(node.get_attr("colspan"), Some("2"));
    assert_eq!(node.get_data("column-index").map(String::as_str), Some("3"));
}

#[test]
fn test_text_content_concatenates_descendants() {
    let node = Node::div()
        .child(Node::text("Hello, "))
        .child(Node::div().child(Node::text("world")));
    assert_eq!(node.text_content(), "Hello, world");
}

#[test]
fn test_generated_ids_are_unique() {
    let a = Node::td();
    let b = Node::td();
    assert_ne!(a.id, b.id);
    assert!(a.id.starts_with("td-"));
}

#[test]
fn test_inline_style_css() {
    let style = InlineStyle::new().set("width", "10px").set("color", "red");
    assert_eq!(style.to_css(), "color: red; width: 10px");
    assert_eq!(style.get("width"), Some("10px"));

    let collected: InlineStyle = [("height", "4px")].into_iter().collect();
    assert_eq!(collected.to_css(), "height: 4px");
}

#[test]
fn test_display_width_counts_wide_glyphs() {
    assert_eq!(display_width("abc"), 3);
    assert_eq!(display_width("日本"), 4);
}
