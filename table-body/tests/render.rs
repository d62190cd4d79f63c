use std::sync::Arc;

use celltree::Tag;
use serde_json::{Value, json};
use table_body::prelude::*;
use table_body::render::{COLUMN_INDEX_DATA, ROW_INDEX_DATA};

fn data() -> Vec<Arc<Value>> {
    vec![
        Arc::new(json!({ "id": "u1", "name": "Ada", "team": "A" })),
        Arc::new(json!({ "id": "u2", "name": "Grace", "team": "B" })),
        Arc::new(json!({ "id": "u3", "name": "Edsger", "team": "B" })),
    ]
}

fn columns() -> Vec<Arc<Column<Value>>> {
    vec![
        Arc::new(Column::new("col_id").property("id").width(50)),
        Arc::new(Column::new("col_name").property("name").width(80)),
        Arc::new(Column::new("col_team").property("team").width(40)),
    ]
}

fn store() -> Store<Value> {
    Store::new(TableStates::new(data(), columns()))
}

fn colgroup(tree: &Node) -> &Node {
    &tree.child_nodes()[0]
}

fn body_rows(tree: &Node) -> &[Node] {
    tree.child_nodes()[1].child_nodes()
}

// ============================================================================
// Structure
// ============================================================================

#[test]
fn test_render_structure() {
    let tree = render_body(&store(), &BodyConfig::new());

    assert_eq!(tree.tag, Tag::Table);
    assert!(tree.has_class("el-table__body"));
    assert_eq!(tree.get_attr("cellspacing"), Some("0"));
    assert_eq!(tree.get_attr("cellpadding"), Some("0"));
    assert_eq!(tree.get_attr("border"), Some("0"));

    let rows = body_rows(&tree);
    assert_eq!(rows.len(), 3);
    for (index, row) in rows.iter().enumerate() {
        assert_eq!(row.tag, Tag::Tr);
        assert_eq!(row.child_nodes().len(), 3);
        assert_eq!(row.get_data(ROW_INDEX_DATA), Some(&index.to_string()));
    }
}

#[test]
fn test_colgroup_lists_every_column() {
    let tree = render_body(&store(), &BodyConfig::new());
    let cols = colgroup(&tree).child_nodes();

    let described: Vec<_> = cols
        .iter()
        .map(|col| (col.get_attr("name"), col.get_attr("width")))
        .collect();
    assert_eq!(
        described,
        vec![
            (Some("col_id"), Some("50")),
            (Some("col_name"), Some("80")),
            (Some("col_team"), Some("40")),
        ]
    );
}

#[test]
fn test_empty_data_keeps_colgroup() {
    let store = Store::new(TableStates::new(Vec::new(), columns()));
    let tree = render_body(&store, &BodyConfig::new());

    assert_eq!(colgroup(&tree).child_nodes().len(), 3);
    assert!(body_rows(&tree).is_empty());
}

#[test]
fn test_cells_carry_classes_indices_and_text() {
    let tree = render_body(&store(), &BodyConfig::new());
    let cell = &body_rows(&tree)[1].child_nodes()[1];

    assert_eq!(cell.tag, Tag::Td);
    assert_eq!(cell.class_string(), "col_name");
    assert_eq!(cell.get_attr("rowspan"), Some("1"));
    assert_eq!(cell.get_attr("colspan"), Some("1"));
    assert_eq!(cell.get_data(ROW_INDEX_DATA), Some(&"1".to_string()));
    assert_eq!(cell.get_data(COLUMN_INDEX_DATA), Some(&"1".to_string()));

    let content = &cell.child_nodes()[0];
    assert!(content.has_class("cell"));
    assert!(!content.has_class("el-tooltip"));
    assert_eq!(content.text_content(), "Grace");
}

#[test]
fn test_tooltip_column_marks_content() {
    let columns = vec![Arc::new(
        Column::new("col_name")
            .property("name")
            .width(80)
            .show_overflow_tooltip(),
    )];
    let store = Store::new(TableStates::new(data(), columns));
    let tree = render_body(&store, &BodyConfig::new());

    let content = &body_rows(&tree)[0].child_nodes()[0].child_nodes()[0];
    assert!(content.has_class("el-tooltip"));
    assert_eq!(content.get_data("width"), Some(&"80".to_string()));
}

#[test]
fn test_render_does_not_commit() {
    let store = store();
    let _ = render_body(&store, &BodyConfig::new().stripe());
    assert!(!store.is_dirty());
}

// ============================================================================
// Row keys
// ============================================================================

#[test]
fn test_row_keys_from_path() {
    let tree = render_body(&store(), &BodyConfig::new().row_key(RowKey::path("id")));
    let keys: Vec<_> = body_rows(&tree).iter().map(|r| r.key.clone()).collect();
    assert_eq!(
        keys,
        vec![
            Some("u1".to_string()),
            Some("u2".to_string()),
            Some("u3".to_string())
        ]
    );
}

#[test]
fn test_row_keys_fall_back_to_index() {
    let tree = render_body(&store(), &BodyConfig::new());
    let keys: Vec<_> = body_rows(&tree).iter().map(|r| r.key.clone()).collect();
    assert_eq!(
        keys,
        vec![
            Some("0".to_string()),
            Some("1".to_string()),
            Some("2".to_string())
        ]
    );
}

// ============================================================================
// Spans
// ============================================================================

#[test]
fn test_suppressed_cell_is_omitted() {
    let config = BodyConfig::new().span_method(SpanMethod::typed(|ctx: &SpanContext<'_, Value>| {
        if ctx.row_index == 1 && ctx.column_index == 2 {
            SpanValue::Named {
                rowspan: 1,
                colspan: 0,
            }
        } else {
            SpanValue::Unset
        }
    }));
    let tree = render_body(&store(), &config);
    let rows = body_rows(&tree);

    assert_eq!(rows[0].child_nodes().len(), 3);
    assert_eq!(rows[1].child_nodes().len(), 2);
    assert_eq!(rows[2].child_nodes().len(), 3);
    assert!(rows[1].child_nodes().iter().all(|cell| !cell.has_class("col_team")));
}

#[test]
fn test_colspan_widens_the_cell() {
    let config = BodyConfig::new().span_method(SpanMethod::typed(|ctx: &SpanContext<'_, Value>| {
        match (ctx.row_index, ctx.column_index) {
            (0, 0) => SpanValue::Pair(1, 2),
            (0, 1) => SpanValue::Pair(0, 0),
            _ => SpanValue::Unset,
        }
    }));
    let tree = render_body(&store(), &config);
    let first_row = &body_rows(&tree)[0];

    assert_eq!(first_row.child_nodes().len(), 2);
    let merged = &first_row.child_nodes()[0];
    assert_eq!(merged.get_attr("colspan"), Some("2"));
    assert_eq!(
        merged.child_nodes()[0].get_data("width"),
        Some(&"129".to_string())
    );

    // The column model itself is untouched.
    let col = &colgroup(&tree).child_nodes()[0];
    assert_eq!(col.get_attr("width"), Some("50"));
    let unmerged = &body_rows(&tree)[1].child_nodes()[0];
    assert_eq!(unmerged.child_nodes()[0].get_data("width"), Some(&"50".to_string()));
}

#[test]
fn test_renderer_sees_widened_column() {
    let columns = vec![
        Arc::new(
            Column::new("col_a")
                .width(50)
                .renderer(|ctx: &RenderContext<'_, Value>| {
                    Node::text(ctx.column.real_width.to_string())
                }),
        ),
        Arc::new(Column::new("col_b").width(80)),
    ];
    let store = Store::new(TableStates::new(data(), columns));
    let config = BodyConfig::new().span_method(SpanMethod::dynamic(|ctx: &SpanContext<'_, Value>| {
        match ctx.column_index {
            0 => json!([1, 2]),
            _ => json!([0, 0]),
        }
    }));
    let tree = render_body(&store, &config);

    for row in body_rows(&tree) {
        assert_eq!(row.child_nodes().len(), 1);
        assert_eq!(row.child_nodes()[0].text_content(), "129");
    }
}

#[test]
fn test_rowspan_is_emitted() {
    let config = BodyConfig::new().span_method(SpanMethod::typed(|ctx: &SpanContext<'_, Value>| {
        match (ctx.row_index, ctx.column_index) {
            (1, 2) => SpanValue::Pair(2, 1),
            (2, 2) => SpanValue::Pair(0, 0),
            _ => SpanValue::Unset,
        }
    }));
    let tree = render_body(&store(), &config);
    let rows = body_rows(&tree);

    assert_eq!(rows[1].child_nodes()[2].get_attr("rowspan"), Some("2"));
    assert_eq!(rows[2].child_nodes().len(), 2);
}

#[test]
fn test_overlapping_spans_are_not_corrected() {
    let config = BodyConfig::new().span_method(SpanMethod::typed(|ctx: &SpanContext<'_, Value>| {
        if ctx.row_index == 0 && ctx.column_index == 0 {
            SpanValue::Pair(1, 2)
        } else {
            SpanValue::Unset
        }
    }));
    let tree = render_body(&store(), &config);
    assert_eq!(body_rows(&tree)[0].child_nodes().len(), 3);
}

#[test]
fn test_malformed_span_renders_single_cell() {
    let config = BodyConfig::new()
        .span_method(SpanMethod::dynamic(|_: &SpanContext<'_, Value>| json!("nope")));
    let tree = render_body(&store(), &config);

    for row in body_rows(&tree) {
        assert_eq!(row.child_nodes().len(), 3);
        assert!(row.child_nodes().iter().all(|c| c.get_attr("colspan") == Some("1")));
    }
}

// ============================================================================
// Classes, styles, scope
// ============================================================================

#[test]
fn test_stripe_and_current_row_in_tree() {
    let data = data();
    let mut states = TableStates::new(data.clone(), columns());
    states.current_row = Some(Arc::clone(&data[2]));
    let store = Store::new(states);
    let tree = render_body(&store, &BodyConfig::new().stripe());
    let rows = body_rows(&tree);

    assert_eq!(rows[0].class_string(), "el-table__row");
    assert_eq!(rows[1].class_string(), "el-table__row el-table__row--striped");
    assert_eq!(rows[2].class_string(), "el-table__row current-row");
}

#[test]
fn test_fixed_columns_hidden_in_main_body() {
    let states = TableStates::new(data(), columns())
        .with_fixed_counts(1, 1)
        .unwrap();
    let tree = render_body(&Store::new(states), &BodyConfig::new());
    let hidden: Vec<bool> = body_rows(&tree)[0]
        .child_nodes()
        .iter()
        .map(|cell| cell.has_class("is-hidden"))
        .collect();
    assert_eq!(hidden, vec![true, false, true]);
}

#[test]
fn test_styles_are_applied() {
    let config = BodyConfig::new()
        .row_style(InlineStyle::new().set("height", "32px"))
        .cell_style(InlineStyle::new().set("padding", "0"));
    let tree = render_body(&store(), &config);
    let row = &body_rows(&tree)[0];

    assert_eq!(row.style.as_ref().map(|s| s.to_css()), Some("height: 32px".to_string()));
    assert_eq!(
        row.child_nodes()[0].style.as_ref().map(|s| s.to_css()),
        Some("padding: 0".to_string())
    );
}

#[test]
fn test_renderer_receives_scope() {
    let columns = vec![Arc::new(Column::new("col_scope").renderer(
        |ctx: &RenderContext<'_, Value>| {
            let label = ctx
                .scope
                .and_then(|scope| scope.downcast_ref::<String>())
                .cloned()
                .unwrap_or_default();
            Node::text(format!("{label}:{}", ctx.row_index))
        },
    ))];
    let store = Store::new(TableStates::new(data(), columns));
    let scope: Scope = Arc::new("owner".to_string());
    let tree = render_body(&store, &BodyConfig::new().scope(scope));

    assert_eq!(body_rows(&tree)[2].text_content(), "owner:2");
}

// ============================================================================
// Expanded rows
// ============================================================================

#[test]
fn test_expanded_row_follows_its_row() {
    let data = data();
    let mut columns = columns();
    columns.insert(0, Arc::new(Column::new("col_expand").kind(ColumnKind::Expand)));
    let mut states = TableStates::new(data.clone(), columns);
    states.expanded_rows.push(Arc::clone(&data[1]));
    let store = Store::new(states);

    let config = BodyConfig::new()
        .row_key(RowKey::path("id"))
        .render_expanded(|ctx: &ExpandContext<'_, Value>| {
            Node::text(format!("details of {}", ctx.row.field("name").unwrap_or_default()))
        });
    let tree = render_body(&store, &config);
    let rows = body_rows(&tree);

    assert_eq!(rows.len(), 4);
    assert!(rows[1].has_class("expanded"));
    assert_eq!(rows[2].key.as_deref(), Some("expanded-row__u2"));

    let cell = &rows[2].child_nodes()[0];
    assert!(cell.has_class("el-table__expanded-cell"));
    assert_eq!(cell.get_attr("colspan"), Some("4"));
    assert_eq!(cell.text_content(), "details of Grace");
}

#[test]
fn test_no_expanded_row_without_expand_column() {
    let data = data();
    let mut states = TableStates::new(data.clone(), columns());
    states.expanded_rows.push(Arc::clone(&data[0]));
    let store = Store::new(states);
    let config = BodyConfig::new()
        .render_expanded(|_: &ExpandContext<'_, Value>| Node::text("details"));

    assert_eq!(body_rows(&render_body(&store, &config)).len(), 3);
}

#[test]
fn test_rendered_snapshot_is_kept_beside_the_tree() {
    let store = store();
    let rendered = render_snapshot(&store, &BodyConfig::new());
    store.commit(Mutation::SetData(Vec::new()));

    let cell = &body_rows(&rendered.tree)[2].child_nodes()[1];
    assert_eq!(rendered.column_of(cell).map(|c| c.id.as_str()), Some("col_name"));
    assert_eq!(
        rendered.row_at(2).and_then(|row| row.field("name")),
        Some("Edsger".to_string())
    );
    assert!(rendered.column_of(&rendered.tree).is_none());
}
