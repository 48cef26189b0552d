//! # hifmt-markdown: Markdown parsing and printing for hifmt
//!
//! This crate turns markdown text into a small owned document tree and prints
//! that tree back to markdown. The heading formatter consumes it as its
//! parser/printer pair.
//!
//! ## Quick Start
//!
//! ```rust
//! use hifmt_markdown::Markdown;
//!
//! let doc = "# Heading\n\nParagraph with *emphasis*".parse::<Markdown>().unwrap();
//!
//! assert_eq!(doc.nodes.len(), 2);
//! assert_eq!(doc.to_string(), "# Heading\n\nParagraph with *emphasis*\n");
//! assert_eq!(doc.to_text(), "Heading\nParagraph with emphasis\n");
//! ```
//!
//! ### Custom Rendering Options
//!
//! ```rust
//! use hifmt_markdown::{ListStyle, Markdown, RenderOptions};
//!
//! let mut doc = "- Item 1\n- Item 2".parse::<Markdown>().unwrap();
//! doc.set_options(RenderOptions {
//!     list_style: ListStyle::Plus,
//! });
//!
//! assert_eq!(doc.to_string(), "+ Item 1\n+ Item 2\n");
//! ```
//!
//! Nodes synthesized after parsing carry no source position. When printed,
//! raw [`Html`] lines without a position are stacked one per line, and an
//! empty one prints as a blank line.
mod markdown;
mod node;
pub use self::markdown::{Markdown, to_html};
pub use node::{
    Blockquote, Break, Code, CodeInline, Definition, Delete, Emphasis, Footnote, FootnoteRef,
    Heading, HorizontalRule, Html, Image, ImageRef, Link, LinkRef, List, ListItem, ListStyle,
    Math, MathInline, Node, Paragraph, Point, Position, ReferenceKind, RenderOptions, Strong,
    Table, TableAlignKind, TableCell, TableRow, Text, Toml, Yaml,
};
