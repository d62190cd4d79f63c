use crate::node::Node;

/// Find a node by ID in the tree.
pub fn find<'a>(root: &'a Node, id: &str) -> Option<&'a Node> {
    if root.id == id {
        return Some(root);
    }

    for child in root.child_nodes() {
        if let Some(found) = find(child, id) {
            return Some(found);
        }
    }

    None
}

pub fn find_mut<'a>(root: &'a mut Node, id: &str) -> Option<&'a mut Node> {
    if root.id == id {
        return Some(root);
    }

    let children = root.content.children_mut()?;
    for child in children.iter_mut() {
        if let Some(found) = find_mut(child, id) {
            return Some(found);
        }
    }

    None
}

/// The chain of nodes from `root` down to the node with `id`, inclusive.
/// Returns None if no such node exists.
pub fn ancestors<'a>(root: &'a Node, id: &str) -> Option<Vec<&'a Node>> {
    let mut path = Vec::new();
    if collect_path(root, id, &mut path) {
        Some(path)
    } else {
        None
    }
}

fn collect_path<'a>(node: &'a Node, id: &str, path: &mut Vec<&'a Node>) -> bool {
    path.push(node);
    if node.id == id {
        return true;
    }

    for child in node.child_nodes() {
        if collect_path(child, id, path) {
            return true;
        }
    }

    path.pop();
    false
}

/// Walk up from the node with `id` (itself included) and return the first
/// node matching `pred`.
pub fn closest<'a, F>(root: &'a Node, id: &str, pred: F) -> Option<&'a Node>
where
    F: Fn(&Node) -> bool,
{
    let path = ancestors(root, id)?;
    path.into_iter().rev().find(|node| pred(node))
}

/// First descendant (excluding `node` itself) carrying `class`, depth-first.
pub fn first_descendant_with_class<'a>(node: &'a Node, class: &str) -> Option<&'a Node> {
    for child in node.child_nodes() {
        if child.has_class(class) {
            return Some(child);
        }
        if let Some(found) = first_descendant_with_class(child, class) {
            return Some(found);
        }
    }
    None
}

/// All nodes carrying `class`, in document order.
pub fn query_class<'a>(root: &'a Node, class: &str) -> Vec<&'a Node> {
    let mut out = Vec::new();
    collect_class(root, class, &mut out);
    out
}

fn collect_class<'a>(node: &'a Node, class: &str, out: &mut Vec<&'a Node>) {
    if node.has_class(class) {
        out.push(node);
    }
    for child in node.child_nodes() {
        collect_class(child, class, out);
    }
}

/// Mutable access to the `n`th node carrying `class`, counted in document
/// order (the same order [`query_class`] returns).
pub fn nth_with_class_mut<'a>(root: &'a mut Node, class: &str, n: usize) -> Option<&'a mut Node> {
    let mut seen = 0;
    nth_class_mut(root, class, n, &mut seen)
}

fn nth_class_mut<'a>(
    node: &'a mut Node,
    class: &str,
    n: usize,
    seen: &mut usize,
) -> Option<&'a mut Node> {
    if node.has_class(class) {
        if *seen == n {
            return Some(node);
        }
        *seen += 1;
    }

    let children = node.content.children_mut()?;
    for child in children.iter_mut() {
        if let Some(found) = nth_class_mut(child, class, n, seen) {
            return Some(found);
        }
    }
    None
}
