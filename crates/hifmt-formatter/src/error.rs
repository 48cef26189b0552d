use std::path::PathBuf;

use miette::Diagnostic;

#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum FormatError {
    #[error("File not found: {}", path.display())]
    #[diagnostic(code(hifmt::not_found))]
    NotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    #[diagnostic(code(hifmt::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    #[diagnostic(code(hifmt::write))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse markdown: {0}")]
    #[diagnostic(code(hifmt::parse))]
    Parse(String),

    #[error("Invalid config file {}: {message}", path.display())]
    #[diagnostic(
        code(hifmt::config),
        help("keys are camelCase, e.g. generateToc, h1Style, h1Thickness")
    )]
    Config { path: PathBuf, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::not_found(
        FormatError::NotFound { path: PathBuf::from("README.md") },
        "File not found: README.md"
    )]
    #[case::parse(FormatError::Parse("boom".to_string()), "Failed to parse markdown: boom")]
    #[case::config(
        FormatError::Config { path: PathBuf::from("hifmt.toml"), message: "bad".to_string() },
        "Invalid config file hifmt.toml: bad"
    )]
    fn test_display(#[case] error: FormatError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn test_diagnostic_code() {
        let error = FormatError::NotFound {
            path: PathBuf::from("a.md"),
        };
        assert_eq!(
            error.code().map(|code| code.to_string()),
            Some("hifmt::not_found".to_string())
        );
    }
}
