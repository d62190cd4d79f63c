//! Renders a small body with a merged cell, a fixed column and striping,
//! then replays a click and a hover through the component.
//!
//! Run with `cargo run --example render_demo`; debug logs go to
//! `render_demo.log`.

use std::fs::File;
use std::sync::Arc;
use std::time::Instant;

use serde_json::json;
use simplelog::{Config, LevelFilter, WriteLogger};
use table_body::prelude::*;

fn print_tree(node: &Node, depth: usize) {
    let indent = "  ".repeat(depth);
    let mut line = format!("{indent}<{}", node.tag.name());
    if let Some(key) = &node.key {
        line.push_str(&format!(" key=\"{key}\""));
    }
    if !node.classes.is_empty() {
        line.push_str(&format!(" class=\"{}\"", node.class_string()));
    }
    for (name, value) in &node.attrs {
        line.push_str(&format!(" {name}=\"{value}\""));
    }
    if let Some(style) = &node.style {
        line.push_str(&format!(" style=\"{}\"", style.to_css()));
    }
    line.push('>');
    println!("{line}");

    match &node.content {
        celltree::Content::Text(text) => println!("{indent}  {text}"),
        celltree::Content::Children(children) => {
            for child in children {
                print_tree(child, depth + 1);
            }
        }
        celltree::Content::None => {}
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Ok(log_file) = File::create("render_demo.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), log_file);
    }

    let rows: Vec<Arc<serde_json::Value>> = vec![
        Arc::new(json!({
            "id": "u1", "name": "Ada Lovelace", "team": "Analytical", "role": "Lead"
        })),
        Arc::new(json!({
            "id": "u2", "name": "Grace Hopper", "team": "Compilers", "role": "Admiral"
        })),
        Arc::new(json!({
            "id": "u3", "name": "Edsger Dijkstra", "team": "Compilers", "role": "Author"
        })),
    ];
    let columns = vec![
        Arc::new(Column::new("col_id").property("id").width(60)),
        Arc::new(Column::new("col_name").property("name").width(80).show_overflow_tooltip()),
        Arc::new(Column::new("col_team").property("team").width(120).align(Alignment::Center)),
        Arc::new(Column::new("col_role").property("role").width(90)),
    ];

    let states = match TableStates::new(rows, columns).with_fixed_counts(1, 0) {
        Ok(states) => states,
        Err(err) => {
            eprintln!("Error: {err}");
            return;
        }
    };
    let store = Store::new(states);

    // Merge the team column down over the two compiler rows.
    let config = BodyConfig::new()
        .stripe()
        .row_key(RowKey::path("id"))
        .span_method(SpanMethod::typed(|ctx| match (ctx.row_index, ctx.column_index) {
            (1, 2) => SpanValue::Pair(2, 1),
            (2, 2) => SpanValue::Pair(0, 0),
            _ => SpanValue::Unset,
        }));

    let mut body = TableBody::new(store.clone(), config);
    let first_cell = {
        let tree = body.render();
        print_tree(tree, 0);
        celltree::query_class(tree, "col_name")
            .first()
            .map(|cell| cell.id.clone())
    };

    if let Some(cell) = first_cell {
        let now = Instant::now();
        body.handle(PointerEvent::new(PointerKind::Enter, cell.clone()), now);
        body.handle(PointerEvent::new(PointerKind::Click, cell), now);
    }
    body.settle().await;

    for event in body.drain_events() {
        println!(
            "{} row={:?} column={:?}",
            event.kind.name(),
            event.row.as_ref().and_then(|row| row.field("id")),
            event.column.as_ref().map(|column| column.id.clone())
        );
    }
    println!("hover row: {:?}", store.hover_row());

    body.teardown();
}
