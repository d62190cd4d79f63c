use celltree::{
    ancestors, closest, find, first_descendant_with_class, nth_with_class_mut, query_class,
    Node, Tag,
};

fn sample_tree() -> Node {
    Node::table().id("table").child(
        Node::tbody().id("body").children([
            Node::tr().id("r0").class("row").child(
                Node::td()
                    .id("r0c0")
                    .class("col-a")
                    .child(Node::div().id("r0c0-cell").class("cell").child(Node::text("alpha").id("t0"))),
            ),
            Node::tr().id("r1").class("row").child(
                Node::td()
                    .id("r1c0")
                    .class("col-a")
                    .child(Node::div().id("r1c0-cell").class("cell").child(Node::text("beta").id("t1"))),
            ),
        ]),
    )
}

// ============================================================================
// Lookup
// ============================================================================

#[test]
fn test_find_by_id() {
    let tree = sample_tree();
    assert_eq!(find(&tree, "r1c0").map(|n| n.tag), Some(Tag::Td));
    assert!(find(&tree, "missing").is_none());
}

#[test]
fn test_ancestors_root_to_target() {
    let tree = sample_tree();
    let path = ancestors(&tree, "t1").unwrap();
    let ids: Vec<&str> = path.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["table", "body", "r1", "r1c0", "r1c0-cell", "t1"]);
}

#[test]
fn test_closest_walks_up_to_cell() {
    let tree = sample_tree();
    let cell = closest(&tree, "t0", |n| n.tag == Tag::Td).unwrap();
    assert_eq!(cell.id, "r0c0");

    // The target itself is considered first
    let cell = closest(&tree, "r0c0", |n| n.tag == Tag::Td).unwrap();
    assert_eq!(cell.id, "r0c0");

    // Nothing above the tbody is a cell
    assert!(closest(&tree, "body", |n| n.tag == Tag::Td).is_none());
}

#[test]
fn test_first_descendant_with_class() {
    let tree = sample_tree();
    let td = find(&tree, "r1c0").unwrap();
    let inner = first_descendant_with_class(td, "cell").unwrap();
    assert_eq!(inner.id, "r1c0-cell");
    assert!(first_descendant_with_class(td, "col-a").is_none());
}

// ============================================================================
// Class queries
// ============================================================================

#[test]
fn test_query_class_document_order() {
    let tree = sample_tree();
    let rows: Vec<&str> = query_class(&tree, "row").iter().map(|n| n.id.as_str()).collect();
    assert_eq!(rows, vec!["r0", "r1"]);
}

#[test]
fn test_nth_with_class_mut_toggles_class() {
    let mut tree = sample_tree();
    if let Some(row) = nth_with_class_mut(&mut tree, "row", 1) {
        row.add_class("hover-row");
    }
    assert!(find(&tree, "r1").unwrap().has_class("hover-row"));
    assert!(!find(&tree, "r0").unwrap().has_class("hover-row"));
    assert!(nth_with_class_mut(&mut tree, "row", 2).is_none());
}
