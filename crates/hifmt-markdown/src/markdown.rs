use std::{fmt, str::FromStr};

use itertools::Itertools;
use markdown::{Constructs, ParseOptions, mdast};
use miette::miette;

use crate::node::{Node, RenderOptions};

/// A parsed markdown document: the ordered top-level block sequence plus the
/// options used when printing it back to text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Markdown {
    pub nodes: Vec<Node>,
    pub options: RenderOptions,
}

impl FromStr for Markdown {
    type Err = miette::Error;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        Self::from_str(content)
    }
}

impl fmt::Display for Markdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pre_node: Option<&Node> = None;

        for node in &self.nodes {
            if let Some(pre) = pre_node {
                write!(f, "{}", "\n".repeat(Self::line_gap(pre, node)))?;
            }

            write!(f, "{}", node.to_string_with(&self.options))?;
            pre_node = Some(node);
        }

        if pre_node.is_some() {
            writeln!(f)?;
        }

        Ok(())
    }
}

impl Markdown {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self {
            nodes,
            options: RenderOptions::default(),
        }
    }

    pub fn set_options(&mut self, options: RenderOptions) {
        self.options = options;
    }

    pub fn to_html(&self) -> String {
        markdown::to_html(self.to_string().as_str())
    }

    pub fn to_text(&self) -> String {
        self.nodes
            .iter()
            .map(|node| format!("{}\n", node.value()))
            .join("")
    }

    fn from_str(content: &str) -> miette::Result<Self> {
        let root = markdown::to_mdast(
            content,
            &ParseOptions {
                constructs: Constructs {
                    frontmatter: true,
                    math_flow: true,
                    math_text: true,
                    ..Constructs::gfm()
                },
                ..ParseOptions::gfm()
            },
        )
        .map_err(|e| miette!(e.reason))?;

        let nodes = match root {
            mdast::Node::Root(root) => Node::from_mdast_nodes(root.children),
            node => Node::from_mdast_node(node).into_iter().collect(),
        };

        Ok(Self::new(nodes))
    }

    /// Newlines printed between two adjacent top-level nodes.
    ///
    /// Nodes that both came from the source keep their original line gap, but
    /// always with at least one blank line between them: a list's end point
    /// already covers the blank line after it. Synthesized raw lines stack
    /// directly on top of each other, and an empty raw line is itself the
    /// blank separator. Anything else gets one blank line so block boundaries
    /// survive a re-parse.
    fn line_gap(pre: &Node, node: &Node) -> usize {
        match (pre.position(), node.position()) {
            (Some(pre), Some(pos)) => pos.start.line.saturating_sub(pre.end.line).max(2),
            _ if pre.is_blank_line() || node.is_blank_line() => 1,
            _ if pre.is_html() && node.is_html() => 1,
            _ => 2,
        }
    }
}

pub fn to_html(s: &str) -> String {
    markdown::to_html(s)
}
