#![no_main]

use arbitrary::Arbitrary;
use hifmt_formatter::{FormatterOptions, HeadingTransformer, RuleStyle, format_markdown};
use hifmt_markdown::Markdown;
use itertools::Itertools;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Clone, Arbitrary)]
enum Block {
    Heading(u8, String),
    Paragraph(String),
    Quote(Box<Block>),
    Item(Box<Block>),
    Code(String),
    Raw(String),
}

impl Block {
    fn to_markdown(&self) -> String {
        match self {
            Block::Heading(depth, text) => {
                format!("{} {}", "#".repeat(usize::from(depth % 6) + 1), text)
            }
            Block::Paragraph(text) => text.clone(),
            Block::Quote(block) => format!("> {}", block.to_markdown()),
            Block::Item(block) => format!("- {}", block.to_markdown()),
            Block::Code(code) => format!("```\n{}\n```", code),
            Block::Raw(raw) => raw.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Arbitrary)]
enum Style {
    Solid,
    Dashed,
    None,
}

impl From<Style> for RuleStyle {
    fn from(style: Style) -> Self {
        match style {
            Style::Solid => RuleStyle::Solid,
            Style::Dashed => RuleStyle::Dashed,
            Style::None => RuleStyle::None,
        }
    }
}

#[derive(Debug, Clone, Arbitrary)]
struct Context {
    blocks: Vec<Block>,
    generate_toc: bool,
    center_headers: bool,
    add_hr_lines: bool,
    h1_style: Style,
    h2_style: Style,
}

fuzz_target!(|context: Context| {
    let content = context.blocks.iter().map(Block::to_markdown).join("\n\n");
    let options = FormatterOptions {
        generate_toc: context.generate_toc,
        center_headers: context.center_headers,
        add_hr_lines: context.add_hr_lines,
        h1_style: context.h1_style.into(),
        h2_style: context.h2_style.into(),
        ..Default::default()
    };

    let Ok(markdown) = content.parse::<Markdown>() else {
        return;
    };
    let headings = markdown.nodes.iter().filter(|node| node.is_heading(None)).count();
    let transformed = HeadingTransformer::new(Some(options.clone())).transform(markdown);
    let kept = transformed.nodes.iter().filter(|node| node.is_heading(None)).count();
    assert!(kept >= headings);

    let formatted = format_markdown(&content, Some(options));
    assert!(formatted.is_ok(), "{:?}", formatted);
});
