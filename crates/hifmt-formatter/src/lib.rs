//! # hifmt-formatter: heading hierarchy formatting for README files
//!
//! Centers headings, wraps them in depth-styled horizontal rules and inserts
//! a table of contents after the document title.
//!
//! ```rust
//! use hifmt_formatter::{FormatterOptions, format_markdown};
//!
//! let output = format_markdown("# Title\n\n## Install\n\n## Usage", None).unwrap();
//!
//! assert!(output.contains("## Table of Contents"));
//! assert!(output.contains("1. [Install](#install)\n2. [Usage](#usage)"));
//!
//! let options = FormatterOptions {
//!     generate_toc: false,
//!     ..Default::default()
//! };
//! let output = format_markdown("# Title\n\n## Install", Some(options)).unwrap();
//! assert!(!output.contains("Table of Contents"));
//! ```
//!
//! The transform is additive: formatting an already formatted document
//! decorates it again.
use std::{fs, path::Path};

mod error;
mod options;
pub mod plugin;
mod slug;
pub mod toc;
mod transformer;

pub use error::FormatError;
pub use options::{FormatterOptions, RuleStyle};
pub use plugin::{Pipeline, Plugin, ReadmeFormatter};
pub use slug::slugify;
pub use toc::{TocEntry, collect_headings};
pub use transformer::HeadingTransformer;

/// Formats markdown text without touching the file system.
pub fn format_markdown(
    content: &str,
    options: Option<FormatterOptions>,
) -> Result<String, FormatError> {
    ReadmeFormatter::new(options).format(content)
}

/// Reads `input`, formats it and writes the result to `output`, or back to
/// `input` when no output is given. Returns the formatted text.
///
/// Nothing is written when reading or formatting fails.
pub fn format_file(
    input: impl AsRef<Path>,
    output: Option<&Path>,
    options: Option<FormatterOptions>,
) -> Result<String, FormatError> {
    let input = input.as_ref();

    if !input.exists() {
        return Err(FormatError::NotFound {
            path: input.to_path_buf(),
        });
    }

    let content = fs::read_to_string(input).map_err(|source| FormatError::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let formatted = format_markdown(&content, options)?;

    let output = output.unwrap_or(input);
    fs::write(output, &formatted).map_err(|source| FormatError::Write {
        path: output.to_path_buf(),
        source,
    })?;
    tracing::debug!(input = %input.display(), output = %output.display(), "formatted file");

    Ok(formatted)
}
