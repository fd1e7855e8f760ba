//! Append-only ordered tree that renders with box-drawing connectors.
//!
//! ```text
//! root
//! ├── first
//! │   └── nested
//! └── last
//! ```

use crate::console::Console;

/// Handle to a node of the [`TreePrinter`] that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Node {
    label: String,
    children: Vec<NodeId>,
}

#[derive(Debug, Default)]
pub struct TreePrinter {
    nodes: Vec<Node>,
}

impl TreePrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the root slot. The first `child` call on it sets the root.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add `label` under `parent`.
    ///
    /// On an empty tree the label becomes the root and the root handle is
    /// returned. Otherwise the label is appended as the last child of
    /// `parent` and the returned handle is bound to the new child; `parent`
    /// stays usable for further siblings.
    pub fn child(&mut self, parent: NodeId, label: impl Into<String>) -> NodeId {
        let node = Node {
            label: label.into(),
            children: Vec::new(),
        };
        if self.nodes.is_empty() {
            self.nodes.push(node);
            return NodeId(0);
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn label(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(id.0).map(|n| n.label.as_str())
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.0)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
    }

    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        if let Some(root) = self.nodes.first() {
            push_label(&mut lines, "", "", &root.label);
            self.render_children(self.root(), "", &mut lines);
        }
        lines.join("\n")
    }

    /// Same as [`render`](Self::render) with every line shifted two columns,
    /// for nesting under another message.
    pub fn render_indented(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        self.render()
            .split('\n')
            .map(|line| format!("  {}", line))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn print(&self, console: &Console) {
        console.println(&self.render());
    }

    pub fn print_indented(&self, console: &Console) {
        console.println(&self.render_indented());
    }

    fn render_children(&self, id: NodeId, indent: &str, lines: &mut Vec<String>) {
        let children = &self.nodes[id.0].children;
        for (i, child) in children.iter().enumerate() {
            let last = i + 1 == children.len();
            let (edge, column) = if last {
                ("└── ", "    ")
            } else {
                ("├── ", "│   ")
            };
            let child_indent = format!("{}{}", indent, column);
            push_label(
                lines,
                &format!("{}{}", indent, edge),
                &child_indent,
                &self.nodes[child.0].label,
            );
            self.render_children(*child, &child_indent, lines);
        }
    }
}

// Multi-line labels keep their tail lines under the label text.
fn push_label(lines: &mut Vec<String>, first: &str, rest: &str, label: &str) {
    for (i, line) in label.split('\n').enumerate() {
        let prefix = if i == 0 { first } else { rest };
        lines.push(format!("{}{}", prefix, line));
    }
}
