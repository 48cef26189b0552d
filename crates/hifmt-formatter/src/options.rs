use std::{fmt, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::FormatError;

/// Border style of the horizontal rules drawn around headings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleStyle {
    #[default]
    Solid,
    Dashed,
    None,
}

impl fmt::Display for RuleStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleStyle::Solid => write!(f, "solid"),
            RuleStyle::Dashed => write!(f, "dashed"),
            RuleStyle::None => write!(f, "none"),
        }
    }
}

/// Resolved formatter configuration.
///
/// Deserializing accepts any subset of the camelCase keys; missing keys keep
/// their default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct FormatterOptions {
    /// Insert a "Table of Contents" section right after the document title.
    pub generate_toc: bool,
    /// Wrap every styled heading in a centered block.
    pub center_headers: bool,
    /// Draw horizontal rules around depth-1 and depth-2 headings.
    pub add_hr_lines: bool,
    pub h1_style: RuleStyle,
    pub h1_thickness: String,
    pub h2_style: RuleStyle,
    pub h2_thickness: String,
}

impl Default for FormatterOptions {
    fn default() -> Self {
        Self {
            generate_toc: true,
            center_headers: true,
            add_hr_lines: true,
            h1_style: RuleStyle::Solid,
            h1_thickness: "2px".to_string(),
            h2_style: RuleStyle::Dashed,
            h2_thickness: "1px".to_string(),
        }
    }
}

impl FormatterOptions {
    /// Loads options from a `.toml` file, or from JSON for any other extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FormatError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(FormatError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path).map_err(|source| FormatError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        let options = if is_toml {
            toml::from_str(&content).map_err(|e| e.to_string())
        } else {
            serde_json::from_str(&content).map_err(|e| e.to_string())
        };

        options.map_err(|message| FormatError::Config {
            path: path.to_path_buf(),
            message,
        })
    }
}
