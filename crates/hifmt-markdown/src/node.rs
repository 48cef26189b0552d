use std::fmt::{self, Display};

use itertools::Itertools;
use markdown::mdast;

type Level = u8;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOptions {
    pub list_style: ListStyle,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ListStyle {
    #[default]
    Dash,
    Plus,
    Star,
}

impl Display for ListStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListStyle::Dash => write!(f, "-"),
            ListStyle::Plus => write!(f, "+"),
            ListStyle::Star => write!(f, "*"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TableAlignKind {
    Left,
    Right,
    Center,
    #[default]
    None,
}

impl From<mdast::AlignKind> for TableAlignKind {
    fn from(value: mdast::AlignKind) -> Self {
        match value {
            mdast::AlignKind::Left => Self::Left,
            mdast::AlignKind::Right => Self::Right,
            mdast::AlignKind::Center => Self::Center,
            mdast::AlignKind::None => Self::None,
        }
    }
}

impl Display for TableAlignKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableAlignKind::Left => write!(f, ":---"),
            TableAlignKind::Right => write!(f, "---:"),
            TableAlignKind::Center => write!(f, ":---:"),
            TableAlignKind::None => write!(f, "---"),
        }
    }
}

/// How a reference-style link or image names its definition.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ReferenceKind {
    /// `[text]`
    #[default]
    Shortcut,
    /// `[text][]`
    Collapsed,
    /// `[text][label]`
    Full,
}

impl From<mdast::ReferenceKind> for ReferenceKind {
    fn from(value: mdast::ReferenceKind) -> Self {
        match value {
            mdast::ReferenceKind::Shortcut => Self::Shortcut,
            mdast::ReferenceKind::Collapsed => Self::Collapsed,
            mdast::ReferenceKind::Full => Self::Full,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub start: Point,
    pub end: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub line: usize,
    pub column: usize,
}

impl From<markdown::unist::Position> for Position {
    fn from(value: markdown::unist::Position) -> Self {
        Self {
            start: Point {
                line: value.start.line,
                column: value.start.column,
            },
            end: Point {
                line: value.end.line,
                column: value.end.column,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Blockquote {
    pub values: Vec<Node>,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Break;

#[derive(Debug, Clone, PartialEq)]
pub struct Code {
    pub value: String,
    pub lang: Option<String>,
    pub meta: Option<String>,
    pub fence: bool,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CodeInline {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub ident: String,
    pub label: Option<String>,
    pub url: String,
    pub title: Option<String>,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    pub values: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Emphasis {
    pub values: Vec<Node>,
}

/// A footnote definition: `[^ident]: content`.
#[derive(Debug, Clone, PartialEq)]
pub struct Footnote {
    pub ident: String,
    pub label: Option<String>,
    pub values: Vec<Node>,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FootnoteRef {
    pub ident: String,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    pub depth: Level,
    pub values: Vec<Node>,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HorizontalRule {
    pub position: Option<Position>,
}

/// Raw markup printed verbatim. Used for both flow and inline HTML.
#[derive(Debug, Clone, PartialEq)]
pub struct Html {
    pub value: String,
    pub position: Option<Position>,
}

impl Html {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            position: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub alt: String,
    pub url: String,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageRef {
    pub alt: String,
    pub ident: String,
    pub label: Option<String>,
    pub kind: ReferenceKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub url: String,
    pub title: Option<String>,
    pub values: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinkRef {
    pub ident: String,
    pub label: Option<String>,
    pub kind: ReferenceKind,
    pub values: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct List {
    pub ordered: bool,
    pub start: Option<u32>,
    pub spread: bool,
    pub items: Vec<ListItem>,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    pub checked: Option<bool>,
    pub spread: bool,
    pub values: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Math {
    pub value: String,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MathInline {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub values: Vec<Node>,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Strong {
    pub values: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub align: Vec<TableAlignKind>,
    pub rows: Vec<TableRow>,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    pub values: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toml {
    pub value: String,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Yaml {
    pub value: String,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Blockquote(Blockquote),
    Break(Break),
    Code(Code),
    CodeInline(CodeInline),
    Definition(Definition),
    Delete(Delete),
    Emphasis(Emphasis),
    Footnote(Footnote),
    FootnoteRef(FootnoteRef),
    Heading(Heading),
    HorizontalRule(HorizontalRule),
    Html(Html),
    Image(Image),
    ImageRef(ImageRef),
    Link(Link),
    LinkRef(LinkRef),
    List(List),
    Math(Math),
    MathInline(MathInline),
    Paragraph(Paragraph),
    Strong(Strong),
    Table(Table),
    Text(Text),
    Toml(Toml),
    Yaml(Yaml),
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Self::Text(Text { value })
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Self::Text(Text {
            value: value.to_string(),
        })
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_with(&RenderOptions::default()))
    }
}

impl Node {
    pub fn to_string_with(&self, options: &RenderOptions) -> String {
        match self {
            Self::Blockquote(Blockquote { values, .. }) => {
                Self::blocks_to_string(values, options, true)
                    .lines()
                    .map(|line| {
                        if line.is_empty() {
                            ">".to_string()
                        } else {
                            format!("> {}", line)
                        }
                    })
                    .join("\n")
            }
            Self::Break(_) => "\\\n".to_string(),
            Self::Code(Code {
                value,
                lang,
                meta,
                fence,
                ..
            }) => {
                if lang.is_none() && !fence {
                    return value.lines().map(|line| format!("    {}", line)).join("\n");
                }

                let marker = "`".repeat(Self::longest_run(value, '`').max(2) + 1);
                let info = lang
                    .as_ref()
                    .map(|lang| match meta {
                        Some(meta) => format!("{} {}", lang, meta),
                        None => lang.clone(),
                    })
                    .unwrap_or_default();

                if value.is_empty() {
                    format!("{}{}\n{}", marker, info, marker)
                } else {
                    format!("{}{}\n{}\n{}", marker, info, value, marker)
                }
            }
            Self::CodeInline(CodeInline { value }) => {
                if value.contains('`') {
                    format!("`` {} ``", value)
                } else {
                    format!("`{}`", value)
                }
            }
            Self::Definition(Definition {
                ident,
                label,
                url,
                title,
                ..
            }) => format!(
                "[{}]: {}{}",
                label.as_ref().unwrap_or(ident),
                Self::url_to_string(url),
                Self::title_to_string(title)
            ),
            Self::Delete(Delete { values }) => {
                format!("~~{}~~", Self::values_to_string(values, options))
            }
            Self::Emphasis(Emphasis { values }) => {
                format!("*{}*", Self::values_to_string(values, options))
            }
            Self::Footnote(Footnote {
                ident,
                label,
                values,
                ..
            }) => {
                let content = Self::blocks_to_string(values, options, true);
                format!(
                    "[^{}]: {}",
                    label.as_ref().unwrap_or(ident),
                    Self::indent_continuation(&content, 4)
                )
            }
            Self::FootnoteRef(FootnoteRef { ident, label }) => {
                format!("[^{}]", label.as_ref().unwrap_or(ident))
            }
            Self::Heading(Heading { depth, values, .. }) => {
                let text = Self::values_to_string(values, options);
                if text.is_empty() {
                    "#".repeat(*depth as usize)
                } else {
                    format!("{} {}", "#".repeat(*depth as usize), text)
                }
            }
            Self::HorizontalRule(_) => "---".to_string(),
            Self::Html(Html { value, .. }) => value.clone(),
            Self::Image(Image { alt, url, title }) => format!(
                "![{}]({}{})",
                alt,
                Self::url_to_string(url),
                Self::title_to_string(title)
            ),
            Self::ImageRef(ImageRef {
                alt,
                ident,
                label,
                kind,
            }) => format!(
                "!{}",
                Self::reference_to_string(alt, label.as_ref().unwrap_or(ident), kind)
            ),
            Self::Link(Link { url, title, values }) => format!(
                "[{}]({}{})",
                Self::values_to_string(values, options),
                Self::url_to_string(url),
                Self::title_to_string(title)
            ),
            Self::LinkRef(LinkRef {
                ident,
                label,
                kind,
                values,
            }) => {
                let text = Self::values_to_string(values, options);
                match (kind, label) {
                    // Shortcut and collapsed references match on the source label.
                    (ReferenceKind::Collapsed | ReferenceKind::Shortcut, Some(label)) => {
                        Self::reference_to_string(label, label, kind)
                    }
                    _ => Self::reference_to_string(&text, label.as_ref().unwrap_or(ident), kind),
                }
            }
            Self::List(List {
                ordered,
                start,
                spread,
                items,
                ..
            }) => items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    let marker = if *ordered {
                        format!("{}.", start.unwrap_or(1) as usize + i)
                    } else {
                        options.list_style.to_string()
                    };
                    let checked = item
                        .checked
                        .map(|it| if it { "[x] " } else { "[ ] " })
                        .unwrap_or_default();
                    let content = Self::blocks_to_string(&item.values, options, item.spread);

                    if content.is_empty() && checked.is_empty() {
                        marker
                    } else {
                        format!(
                            "{} {}{}",
                            marker,
                            checked,
                            Self::indent_continuation(&content, marker.len() + 1)
                        )
                    }
                })
                .join(if *spread { "\n\n" } else { "\n" }),
            Self::Math(Math { value, .. }) => format!("$$\n{}\n$$", value),
            Self::MathInline(MathInline { value }) => format!("${}$", value),
            Self::Paragraph(Paragraph { values, .. }) => Self::values_to_string(values, options),
            Self::Strong(Strong { values }) => {
                format!("**{}**", Self::values_to_string(values, options))
            }
            Self::Table(Table { align, rows, .. }) => {
                let columns = rows
                    .first()
                    .map(|row| row.cells.len())
                    .unwrap_or_default()
                    .max(align.len());
                let row_to_string = |row: &TableRow| {
                    format!(
                        "|{}|",
                        row.cells
                            .iter()
                            .map(|cell| Self::values_to_string(&cell.values, options))
                            .join("|")
                    )
                };
                let header = format!(
                    "|{}|",
                    (0..columns)
                        .map(|i| align.get(i).copied().unwrap_or_default().to_string())
                        .join("|")
                );

                rows.first()
                    .map(row_to_string)
                    .into_iter()
                    .chain(std::iter::once(header))
                    .chain(rows.iter().skip(1).map(row_to_string))
                    .join("\n")
            }
            Self::Text(Text { value }) => Self::escape_text(value),
            Self::Toml(Toml { value, .. }) => format!("+++\n{}\n+++", value),
            Self::Yaml(Yaml { value, .. }) => format!("---\n{}\n---", value),
        }
    }

    /// Plain text of the node: literal values, image alt text and the
    /// concatenated text of children. Structural nodes contribute nothing.
    pub fn value(&self) -> String {
        match self {
            Self::Text(Text { value })
            | Self::CodeInline(CodeInline { value })
            | Self::MathInline(MathInline { value })
            | Self::Html(Html { value, .. })
            | Self::Code(Code { value, .. })
            | Self::Math(Math { value, .. })
            | Self::Toml(Toml { value, .. })
            | Self::Yaml(Yaml { value, .. }) => value.clone(),
            Self::Image(Image { alt, .. }) | Self::ImageRef(ImageRef { alt, .. }) => alt.clone(),
            Self::Break(_)
            | Self::Definition(_)
            | Self::FootnoteRef(_)
            | Self::HorizontalRule(_) => String::new(),
            _ => Self::values_to_value(self.node_values()),
        }
    }

    /// Direct child nodes. List items and table cells are looked through.
    pub fn node_values(&self) -> Vec<&Node> {
        match self {
            Self::Blockquote(Blockquote { values, .. })
            | Self::Delete(Delete { values })
            | Self::Emphasis(Emphasis { values })
            | Self::Footnote(Footnote { values, .. })
            | Self::Heading(Heading { values, .. })
            | Self::Link(Link { values, .. })
            | Self::LinkRef(LinkRef { values, .. })
            | Self::Paragraph(Paragraph { values, .. })
            | Self::Strong(Strong { values }) => values.iter().collect(),
            Self::List(List { items, .. }) => {
                items.iter().flat_map(|item| item.values.iter()).collect()
            }
            Self::Table(Table { rows, .. }) => rows
                .iter()
                .flat_map(|row| row.cells.iter())
                .flat_map(|cell| cell.values.iter())
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Blockquote(_) => "blockquote",
            Self::Break(_) => "break",
            Self::Code(_) => "code",
            Self::CodeInline(_) => "code_inline",
            Self::Definition(_) => "definition",
            Self::Delete(_) => "delete",
            Self::Emphasis(_) => "emphasis",
            Self::Footnote(_) => "footnote",
            Self::FootnoteRef(_) => "footnote_ref",
            Self::Heading(_) => "heading",
            Self::HorizontalRule(_) => "horizontal_rule",
            Self::Html(_) => "html",
            Self::Image(_) => "image",
            Self::ImageRef(_) => "image_ref",
            Self::Link(_) => "link",
            Self::LinkRef(_) => "link_ref",
            Self::List(_) => "list",
            Self::Math(_) => "math",
            Self::MathInline(_) => "math_inline",
            Self::Paragraph(_) => "paragraph",
            Self::Strong(_) => "strong",
            Self::Table(_) => "table",
            Self::Text(_) => "text",
            Self::Toml(_) => "toml",
            Self::Yaml(_) => "yaml",
        }
    }

    /// Source position. Only block nodes produced by the parser carry one.
    pub fn position(&self) -> Option<&Position> {
        match self {
            Self::Blockquote(Blockquote { position, .. })
            | Self::Code(Code { position, .. })
            | Self::Definition(Definition { position, .. })
            | Self::Footnote(Footnote { position, .. })
            | Self::Heading(Heading { position, .. })
            | Self::HorizontalRule(HorizontalRule { position })
            | Self::Html(Html { position, .. })
            | Self::List(List { position, .. })
            | Self::Math(Math { position, .. })
            | Self::Paragraph(Paragraph { position, .. })
            | Self::Table(Table { position, .. })
            | Self::Toml(Toml { position, .. })
            | Self::Yaml(Yaml { position, .. }) => position.as_ref(),
            _ => None,
        }
    }

    pub fn is_heading(&self, depth: Option<u8>) -> bool {
        match self {
            Self::Heading(heading) => depth.is_none_or(|depth| heading.depth == depth),
            _ => false,
        }
    }

    pub fn is_html(&self) -> bool {
        matches!(self, Self::Html(_))
    }

    /// An empty raw node, which prints as an empty line.
    pub fn is_blank_line(&self) -> bool {
        matches!(self, Self::Html(Html { value, .. }) if value.is_empty())
    }

    pub(crate) fn from_mdast_nodes(nodes: Vec<mdast::Node>) -> Vec<Node> {
        nodes.into_iter().filter_map(Self::from_mdast_node).collect()
    }

    pub(crate) fn from_mdast_node(node: mdast::Node) -> Option<Node> {
        let position = |p: Option<markdown::unist::Position>| p.map(Position::from);

        let node = match node {
            mdast::Node::Blockquote(mdast::Blockquote { children, position: p }) => {
                Self::Blockquote(Blockquote {
                    values: Self::from_mdast_nodes(children),
                    position: position(p),
                })
            }
            mdast::Node::Break(_) => Self::Break(Break),
            mdast::Node::Code(mdast::Code {
                value,
                lang,
                meta,
                position: p,
            }) => {
                // Indented code spans exactly its own lines, fenced code adds the fences.
                let fence = lang.is_some()
                    || p.as_ref()
                        .map(|p| value.lines().count() != p.end.line - p.start.line + 1)
                        .unwrap_or(true);

                Self::Code(Code {
                    value,
                    lang,
                    meta,
                    fence,
                    position: position(p),
                })
            }
            mdast::Node::InlineCode(mdast::InlineCode { value, .. }) => {
                Self::CodeInline(CodeInline { value })
            }
            mdast::Node::Definition(mdast::Definition {
                url,
                title,
                identifier,
                label,
                position: p,
            }) => Self::Definition(Definition {
                ident: identifier,
                label,
                url,
                title,
                position: position(p),
            }),
            mdast::Node::Delete(mdast::Delete { children, .. }) => Self::Delete(Delete {
                values: Self::from_mdast_nodes(children),
            }),
            mdast::Node::Emphasis(mdast::Emphasis { children, .. }) => Self::Emphasis(Emphasis {
                values: Self::from_mdast_nodes(children),
            }),
            mdast::Node::FootnoteDefinition(mdast::FootnoteDefinition {
                children,
                identifier,
                label,
                position: p,
            }) => Self::Footnote(Footnote {
                ident: identifier,
                label,
                values: Self::from_mdast_nodes(children),
                position: position(p),
            }),
            mdast::Node::FootnoteReference(mdast::FootnoteReference {
                identifier, label, ..
            }) => Self::FootnoteRef(FootnoteRef {
                ident: identifier,
                label,
            }),
            mdast::Node::Heading(mdast::Heading {
                children,
                depth,
                position: p,
            }) => Self::Heading(Heading {
                depth,
                values: Self::from_mdast_nodes(children),
                position: position(p),
            }),
            mdast::Node::ThematicBreak(mdast::ThematicBreak { position: p }) => {
                Self::HorizontalRule(HorizontalRule {
                    position: position(p),
                })
            }
            mdast::Node::Html(mdast::Html { value, position: p }) => Self::Html(Html {
                value,
                position: position(p),
            }),
            mdast::Node::Image(mdast::Image {
                alt, url, title, ..
            }) => Self::Image(Image { alt, url, title }),
            mdast::Node::ImageReference(mdast::ImageReference {
                alt,
                reference_kind,
                identifier,
                label,
                ..
            }) => Self::ImageRef(ImageRef {
                alt,
                ident: identifier,
                label,
                kind: reference_kind.into(),
            }),
            mdast::Node::InlineMath(mdast::InlineMath { value, .. }) => {
                Self::MathInline(MathInline { value })
            }
            mdast::Node::Link(mdast::Link {
                children,
                url,
                title,
                ..
            }) => Self::Link(Link {
                url,
                title,
                values: Self::from_mdast_nodes(children),
            }),
            mdast::Node::LinkReference(mdast::LinkReference {
                children,
                reference_kind,
                identifier,
                label,
                ..
            }) => Self::LinkRef(LinkRef {
                ident: identifier,
                label,
                kind: reference_kind.into(),
                values: Self::from_mdast_nodes(children),
            }),
            mdast::Node::List(mdast::List {
                children,
                ordered,
                start,
                spread,
                position: p,
            }) => Self::List(List {
                ordered,
                start,
                spread,
                items: children
                    .into_iter()
                    .filter_map(|child| match child {
                        mdast::Node::ListItem(mdast::ListItem {
                            children,
                            spread,
                            checked,
                            ..
                        }) => Some(ListItem {
                            checked,
                            spread,
                            values: Self::from_mdast_nodes(children),
                        }),
                        _ => None,
                    })
                    .collect(),
                position: position(p),
            }),
            mdast::Node::Math(mdast::Math {
                value, position: p, ..
            }) => Self::Math(Math {
                value,
                position: position(p),
            }),
            mdast::Node::Paragraph(mdast::Paragraph { children, position: p }) => {
                Self::Paragraph(Paragraph {
                    values: Self::from_mdast_nodes(children),
                    position: position(p),
                })
            }
            mdast::Node::Strong(mdast::Strong { children, .. }) => Self::Strong(Strong {
                values: Self::from_mdast_nodes(children),
            }),
            mdast::Node::Table(mdast::Table {
                children,
                align,
                position: p,
            }) => Self::Table(Table {
                align: align.into_iter().map(TableAlignKind::from).collect(),
                rows: children
                    .into_iter()
                    .filter_map(|row| match row {
                        mdast::Node::TableRow(mdast::TableRow { children, .. }) => {
                            Some(TableRow {
                                cells: children
                                    .into_iter()
                                    .filter_map(|cell| match cell {
                                        mdast::Node::TableCell(mdast::TableCell {
                                            children,
                                            ..
                                        }) => Some(TableCell {
                                            values: Self::from_mdast_nodes(children),
                                        }),
                                        _ => None,
                                    })
                                    .collect(),
                            })
                        }
                        _ => None,
                    })
                    .collect(),
                position: position(p),
            }),
            mdast::Node::Text(mdast::Text { value, .. }) => Self::Text(Text { value }),
            mdast::Node::Toml(mdast::Toml { value, position: p }) => Self::Toml(Toml {
                value,
                position: position(p),
            }),
            mdast::Node::Yaml(mdast::Yaml { value, position: p }) => Self::Yaml(Yaml {
                value,
                position: position(p),
            }),
            _ => return None,
        };

        Some(node)
    }

    fn values_to_string(values: &[Node], options: &RenderOptions) -> String {
        values
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let rendered = value.to_string_with(options);
                match (value, values.get(i + 1)) {
                    // `!` followed by a link would turn it into an image.
                    (
                        Self::Text(_),
                        Some(Self::Link(_) | Self::LinkRef(_) | Self::FootnoteRef(_)),
                    ) if rendered.ends_with('!') => {
                        format!("{}\\!", &rendered[..rendered.len() - 1])
                    }
                    _ => rendered,
                }
            })
            .collect::<String>()
    }

    fn blocks_to_string(values: &[Node], options: &RenderOptions, spread: bool) -> String {
        values
            .iter()
            .map(|value| value.to_string_with(options))
            .join(if spread { "\n\n" } else { "\n" })
    }

    fn values_to_value<'a>(values: impl IntoIterator<Item = &'a Node>) -> String {
        values
            .into_iter()
            .map(|value| value.value())
            .collect::<String>()
    }

    fn indent_continuation(content: &str, width: usize) -> String {
        let indent = " ".repeat(width);
        content
            .split('\n')
            .enumerate()
            .map(|(i, line)| {
                if i == 0 || line.is_empty() {
                    line.to_string()
                } else {
                    format!("{}{}", indent, line)
                }
            })
            .join("\n")
    }

    fn url_to_string(url: &str) -> String {
        if url.is_empty() || url.contains(' ') {
            format!("<{}>", url)
        } else {
            url.to_string()
        }
    }

    fn title_to_string(title: &Option<String>) -> String {
        title
            .as_ref()
            .map(|title| format!(" \"{}\"", title.replace('"', "\\\"")))
            .unwrap_or_default()
    }

    fn reference_to_string(text: &str, label: &str, kind: &ReferenceKind) -> String {
        match kind {
            ReferenceKind::Full => format!("[{}][{}]", text, label),
            ReferenceKind::Collapsed => format!("[{}][]", text),
            ReferenceKind::Shortcut => format!("[{}]", text),
        }
    }

    /// Backslash-escapes the characters that would otherwise be read back as
    /// markup, so printed text parses to the same literal text.
    fn escape_text(value: &str) -> String {
        value.split('\n').map(Self::escape_line).join("\n")
    }

    fn escape_line(line: &str) -> String {
        let rest = line.trim_start_matches([' ', '\t']);
        let chars = rest.chars().collect::<Vec<_>>();
        let marker = Self::block_marker(&chars);

        let mut escaped = String::with_capacity(line.len() + 4);
        escaped.push_str(&line[..line.len() - rest.len()]);

        for (i, &c) in chars.iter().enumerate() {
            let prev = i.checked_sub(1).map(|j| chars[j]);
            let next = chars.get(i + 1).copied();
            let escape = match c {
                '\\' => next.is_none_or(|n| n.is_ascii_punctuation()),
                '*' | '`' | '[' | ']' | '~' | '$' | '|' => true,
                '_' => !(prev.is_some_and(char::is_alphanumeric)
                    && next.is_some_and(char::is_alphanumeric)),
                '<' => next.is_none_or(|n| n.is_ascii_alphabetic() || matches!(n, '/' | '!' | '?')),
                '&' => next.is_some_and(|n| n.is_ascii_alphanumeric() || n == '#'),
                // A trailing run of `#` would close an ATX heading.
                '#' if prev.is_none_or(|p| p == ' ' || p == '\t') => {
                    Some(i) == marker || chars[i..].iter().all(|&ch| ch == '#')
                }
                _ => Some(i) == marker,
            };

            if escape {
                escaped.push('\\');
            }
            escaped.push(c);
        }

        escaped
    }

    /// Index of the character that would start a block construct at the
    /// beginning of a line: headings, quotes, list markers, setext underlines.
    fn block_marker(chars: &[char]) -> Option<usize> {
        let is_end = |i: usize| chars.get(i).is_none_or(|&c| c == ' ' || c == '\t');

        match chars.first()? {
            '#' => {
                let run = chars.iter().take_while(|&&c| c == '#').count();
                (run <= 6 && is_end(run)).then_some(0)
            }
            '>' => Some(0),
            '-' | '+' | '=' if chars.iter().all(|&c| c == chars[0] || c == ' ' || c == '\t') => {
                Some(0)
            }
            '-' | '+' => is_end(1).then_some(0),
            c if c.is_ascii_digit() => {
                let digits = chars.iter().take_while(|c| c.is_ascii_digit()).count();
                let delimiter = chars.get(digits).is_some_and(|&c| c == '.' || c == ')');
                (digits <= 9 && delimiter && is_end(digits + 1)).then_some(digits)
            }
            _ => None,
        }
    }

    fn longest_run(value: &str, c: char) -> usize {
        value
            .split(|ch| ch != c)
            .map(|run| run.chars().count())
            .max()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn text(value: &str) -> Node {
        value.into()
    }

    #[rstest]
    #[case::heading(
        Node::Heading(Heading{depth: 2, values: vec![text("Title")], position: None}),
        "## Title"
    )]
    #[case::empty_heading(
        Node::Heading(Heading{depth: 3, values: vec![], position: None}),
        "###"
    )]
    #[case::html(Node::Html(Html::new("<div align=\"center\">")), "<div align=\"center\">")]
    #[case::blank_line(Node::Html(Html::new("")), "")]
    #[case::emphasis(Node::Emphasis(Emphasis{values: vec![text("a")]}), "*a*")]
    #[case::strong(Node::Strong(Strong{values: vec![text("a")]}), "**a**")]
    #[case::delete(Node::Delete(Delete{values: vec![text("a")]}), "~~a~~")]
    #[case::code_inline(Node::CodeInline(CodeInline{value: "a".to_string()}), "`a`")]
    #[case::code_inline_backtick(Node::CodeInline(CodeInline{value: "a`b".to_string()}), "`` a`b ``")]
    #[case::link(
        Node::Link(Link{url: "https://example.com".to_string(), title: Some("t".to_string()), values: vec![text("a")]}),
        "[a](https://example.com \"t\")"
    )]
    #[case::link_with_space(
        Node::Link(Link{url: "a b".to_string(), title: None, values: vec![text("a")]}),
        "[a](<a b>)"
    )]
    #[case::link_ref_full(
        Node::LinkRef(LinkRef{ident: "b".to_string(), label: Some("B".to_string()), kind: ReferenceKind::Full, values: vec![text("a")]}),
        "[a][B]"
    )]
    #[case::link_ref_collapsed(
        Node::LinkRef(LinkRef{ident: "a".to_string(), label: None, kind: ReferenceKind::Collapsed, values: vec![text("a")]}),
        "[a][]"
    )]
    #[case::image_ref_shortcut(
        Node::ImageRef(ImageRef{alt: "a".to_string(), ident: "a".to_string(), label: None, kind: ReferenceKind::Shortcut}),
        "![a]"
    )]
    #[case::task_list(
        Node::List(List{ordered: false, start: None, spread: false, position: None, items: vec![
            ListItem{checked: Some(true), spread: false, values: vec![Node::Paragraph(Paragraph{values: vec![text("done")], position: None})]},
            ListItem{checked: Some(false), spread: false, values: vec![Node::Paragraph(Paragraph{values: vec![text("todo")], position: None})]},
        ]}),
        "- [x] done\n- [ ] todo"
    )]
    #[case::ordered_list(
        Node::List(List{ordered: true, start: Some(3), spread: false, position: None, items: vec![
            ListItem{checked: None, spread: false, values: vec![Node::Paragraph(Paragraph{values: vec![text("a")], position: None})]},
            ListItem{checked: None, spread: false, values: vec![Node::Paragraph(Paragraph{values: vec![text("b")], position: None})]},
        ]}),
        "3. a\n4. b"
    )]
    #[case::nested_list(
        Node::List(List{ordered: false, start: None, spread: false, position: None, items: vec![
            ListItem{checked: None, spread: false, values: vec![
                Node::Paragraph(Paragraph{values: vec![text("a")], position: None}),
                Node::List(List{ordered: false, start: None, spread: false, position: None, items: vec![
                    ListItem{checked: None, spread: false, values: vec![Node::Paragraph(Paragraph{values: vec![text("b")], position: None})]},
                ]}),
            ]},
        ]}),
        "- a\n  - b"
    )]
    #[case::blockquote(
        Node::Blockquote(Blockquote{position: None, values: vec![
            Node::Paragraph(Paragraph{values: vec![text("a")], position: None}),
            Node::Paragraph(Paragraph{values: vec![text("b")], position: None}),
        ]}),
        "> a\n>\n> b"
    )]
    #[case::indented_code(
        Node::Code(Code{value: "a\nb".to_string(), lang: None, meta: None, fence: false, position: None}),
        "    a\n    b"
    )]
    #[case::fenced_code_with_meta(
        Node::Code(Code{value: "x".to_string(), lang: Some("rust".to_string()), meta: Some("title=a".to_string()), fence: true, position: None}),
        "```rust title=a\nx\n```"
    )]
    #[case::fenced_code_with_backticks(
        Node::Code(Code{value: "```".to_string(), lang: None, meta: None, fence: true, position: None}),
        "````\n```\n````"
    )]
    fn test_to_string_with(#[case] node: Node, #[case] expected: &str) {
        assert_eq!(node.to_string_with(&RenderOptions::default()), expected);
    }

    #[rstest]
    #[case::text(text("Title"), "Title")]
    #[case::heading(
        Node::Heading(Heading{depth: 1, position: None, values: vec![
            text("Hello "),
            Node::Strong(Strong{values: vec![text("big")]}),
            text(" "),
            Node::CodeInline(CodeInline{value: "world".to_string()}),
        ]}),
        "Hello big world"
    )]
    #[case::link(
        Node::Link(Link{url: "u".to_string(), title: None, values: vec![text("docs")]}),
        "docs"
    )]
    #[case::image(
        Node::Image(Image{alt: "logo".to_string(), url: "u".to_string(), title: None}),
        "logo"
    )]
    #[case::break_(Node::Break(Break), "")]
    #[case::footnote_ref(Node::FootnoteRef(FootnoteRef{ident: "a".to_string(), label: None}), "")]
    fn test_value(#[case] node: Node, #[case] expected: &str) {
        assert_eq!(node.value(), expected);
    }

    #[rstest]
    #[case::any_heading(Node::Heading(Heading{depth: 2, values: vec![], position: None}), None, true)]
    #[case::matching_depth(Node::Heading(Heading{depth: 2, values: vec![], position: None}), Some(2), true)]
    #[case::other_depth(Node::Heading(Heading{depth: 2, values: vec![], position: None}), Some(1), false)]
    #[case::text(text("a"), None, false)]
    fn test_is_heading(#[case] node: Node, #[case] depth: Option<u8>, #[case] expected: bool) {
        assert_eq!(node.is_heading(depth), expected);
    }

    #[test]
    fn test_is_blank_line() {
        assert!(Node::Html(Html::new("")).is_blank_line());
        assert!(!Node::Html(Html::new("---")).is_blank_line());
        assert!(!text("").is_blank_line());
    }

    #[test]
    fn test_node_values_looks_through_list_items() {
        let list = Node::List(List {
            ordered: false,
            start: None,
            spread: false,
            position: None,
            items: vec![ListItem {
                checked: None,
                spread: false,
                values: vec![Node::Heading(Heading {
                    depth: 2,
                    values: vec![text("nested")],
                    position: None,
                })],
            }],
        });

        let values = list.node_values();
        assert_eq!(values.len(), 1);
        assert!(values[0].is_heading(Some(2)));
        assert_eq!(list.name(), "list");
    }
}
