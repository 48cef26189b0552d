use hifmt_markdown::{Heading, Html, Markdown, Node};

use crate::{
    options::{FormatterOptions, RuleStyle},
    toc::{self, TocEntry},
};

const CENTER_OPEN: &str = "<div align=\"center\">";
const CENTER_CLOSE: &str = "</div>";
const DIVIDER: &str = "---";
const TOC_TITLE: &str = "Table of Contents";

/// Rewrites the top-level heading structure of a document.
///
/// The first depth-1 heading becomes a centered title followed by an optional
/// table of contents and a divider. Later depth-1 and depth-2 headings are
/// wrapped in rules and a centered block. Everything else passes through.
#[derive(Debug, Clone, Default)]
pub struct HeadingTransformer {
    options: FormatterOptions,
}

impl HeadingTransformer {
    pub fn new(options: Option<FormatterOptions>) -> Self {
        Self {
            options: options.unwrap_or_default(),
        }
    }

    pub fn options(&self) -> &FormatterOptions {
        &self.options
    }

    pub fn transform(&self, markdown: Markdown) -> Markdown {
        let headings = if self.options.generate_toc {
            toc::collect_headings(&markdown.nodes)
        } else {
            Vec::new()
        };
        tracing::debug!(headings = headings.len(), "collected headings");

        let Markdown { nodes, options } = markdown;
        let mut new_nodes: Vec<Node> = Vec::with_capacity(nodes.len() * 2);
        let mut title_pending = true;

        for node in nodes {
            match node {
                Node::Heading(heading) if title_pending && heading.depth == 1 => {
                    title_pending = false;
                    tracing::trace!(values = heading.values.len(), "title heading");

                    new_nodes.extend(self.title(heading).into_iter().flatten());

                    if self.options.generate_toc && headings.len() > 1 {
                        new_nodes.extend(Self::table_of_contents(&headings[1..]));
                    }

                    new_nodes.extend([Self::blank(), Self::html(DIVIDER)]);
                }
                Node::Heading(heading) if heading.depth == 1 => {
                    let rule = Self::rule(self.options.h1_style, &self.options.h1_thickness);
                    new_nodes.extend(self.section(heading, rule).into_iter().flatten());
                }
                Node::Heading(heading) if heading.depth == 2 => {
                    let rule = Self::rule(self.options.h2_style, &self.options.h2_thickness);
                    new_nodes.extend(self.section(heading, rule).into_iter().flatten());
                }
                node => new_nodes.push(node),
            }
        }

        tracing::debug!(nodes = new_nodes.len(), "rewrote document");

        Markdown {
            nodes: new_nodes,
            options,
        }
    }

    fn title(&self, heading: Heading) -> Vec<Option<Node>> {
        let center = self.options.center_headers;
        let hr = self.options.add_hr_lines;
        let rule = Self::rule(self.options.h1_style, &self.options.h1_thickness);
        let subtitle = Self::subtitle(&heading);

        vec![
            center.then(|| Self::html(CENTER_OPEN)),
            center.then(Self::blank),
            hr.then(|| rule.clone()),
            hr.then(Self::blank),
            Some(Node::Heading(heading)),
            Some(Self::blank()),
            subtitle,
            hr.then(Self::blank),
            hr.then(|| rule.clone()),
            center.then(Self::blank),
            center.then(|| Self::html(CENTER_CLOSE)),
        ]
    }

    fn section(&self, heading: Heading, rule: Node) -> Vec<Option<Node>> {
        let center = self.options.center_headers;
        let hr = self.options.add_hr_lines;

        vec![
            hr.then(Self::blank),
            hr.then(|| rule.clone()),
            center.then(Self::blank),
            center.then(|| Self::html(CENTER_OPEN)),
            Some(Self::blank()),
            Some(Node::Heading(heading)),
            center.then(Self::blank),
            center.then(|| Self::html(CENTER_CLOSE)),
            hr.then(Self::blank),
            hr.then(|| rule.clone()),
        ]
    }

    fn table_of_contents(entries: &[TocEntry]) -> Vec<Node> {
        let mut nodes = vec![
            Self::blank(),
            Node::Heading(Heading {
                depth: 2,
                values: vec![TOC_TITLE.into()],
                position: None,
            }),
            Self::blank(),
        ];
        nodes.extend(toc::toc_items(entries));
        nodes
    }

    /// `### <text>` repeating the title, when its first inline child is plain text.
    fn subtitle(heading: &Heading) -> Option<Node> {
        match heading.values.first() {
            Some(text @ Node::Text(_)) => Some(Self::html(format!("### {}", text))),
            _ => None,
        }
    }

    fn rule(style: RuleStyle, thickness: &str) -> Node {
        Self::html(format!("<hr style=\"border: {} {};\">", thickness, style))
    }

    fn html(value: impl Into<String>) -> Node {
        Node::Html(Html::new(value))
    }

    fn blank() -> Node {
        Self::html("")
    }
}
