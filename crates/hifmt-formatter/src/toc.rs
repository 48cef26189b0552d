use hifmt_markdown::{Html, Node};

use crate::slug::slugify;

/// One heading of the document outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub depth: u8,
    pub text: String,
    pub id: String,
}

impl TocEntry {
    pub fn new(depth: u8, text: String) -> Self {
        let id = slugify(&text);
        Self { depth, text, id }
    }
}

/// Collects every heading in document order, including headings nested in
/// block quotes, list items and footnotes.
pub fn collect_headings(nodes: &[Node]) -> Vec<TocEntry> {
    let mut headings = Vec::new();
    for node in nodes {
        visit(node, &mut headings);
    }
    headings
}

fn visit(node: &Node, headings: &mut Vec<TocEntry>) {
    if let Node::Heading(heading) = node {
        headings.push(TocEntry::new(heading.depth, node.value()));
    }

    let children = node.node_values();
    if !children.is_empty() {
        tracing::trace!(node = node.name(), children = children.len(), "visiting children");
    }

    for child in children {
        visit(child, headings);
    }
}

/// Numbered link lines, one per entry. Depth does not indent the line.
pub fn toc_items(entries: &[TocEntry]) -> Vec<Node> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            Node::Html(Html::new(format!(
                "{}. [{}](#{})",
                i + 1,
                escape_label(&entry.text),
                entry.id
            )))
        })
        .collect()
}

fn escape_label(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '[' | ']') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
