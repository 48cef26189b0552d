use clap::{CommandFactory, Parser};
use colored::Colorize;
use hifmt_formatter::{FormatError, FormatterOptions, RuleStyle, format_file, format_markdown};
use miette::IntoDiagnostic;
use miette::miette;
use std::io::{self, BufWriter, Write};
use std::{fs, path::PathBuf};

#[derive(Parser, Debug, Default)]
#[command(name = "readme-format")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(disable_version_flag = true)]
#[command(after_help = "# Examples:\n\n\
    ## Format in-place:\n\
    readme-format README.md\n\n\
    ## Format to a new file:\n\
    readme-format input.md output.md\n\n\
    ## Format to a new file with -o:\n\
    readme-format README.md -o formatted.md")]
#[command(
    about = "Formats a README's heading hierarchy with centered headings, styled rules and a table of contents.",
    long_about = None
)]
pub struct Cli {
    /// Markdown file to format
    input: Option<PathBuf>,

    /// Output file (default: overwrites input)
    output: Option<PathBuf>,

    /// Output file, takes precedence over the positional output
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output_file: Option<PathBuf>,

    /// Load formatter options from a JSON or TOML file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[clap(flatten)]
    style: StyleArgs,

    /// Exit with an error if the output file is not up to date, without writing
    #[arg(long, default_value_t = false)]
    check: bool,

    /// Print the result to stdout instead of writing a file
    #[arg(long, default_value_t = false, conflicts_with = "check")]
    stdout: bool,

    /// Do not print progress messages
    #[arg(short, long, default_value_t = false)]
    quiet: bool,

    /// Print version
    #[arg(
        short = 'v',
        long = "version",
        action = clap::ArgAction::Version,
        value_parser = clap::value_parser!(bool)
    )]
    version: (),
}

#[derive(Clone, Debug, clap::Args, Default)]
struct StyleArgs {
    /// Do not generate a table of contents
    #[arg(long, default_value_t = false)]
    no_toc: bool,

    /// Do not center headings
    #[arg(long, default_value_t = false)]
    no_center: bool,

    /// Do not draw horizontal rules around headings
    #[arg(long, default_value_t = false)]
    no_hr: bool,

    /// Rule style around depth-1 headings
    #[arg(long, value_enum)]
    h1_style: Option<RuleStyleArg>,

    /// Rule thickness around depth-1 headings, e.g. 2px
    #[arg(long, value_name = "THICKNESS")]
    h1_thickness: Option<String>,

    /// Rule style around depth-2 headings
    #[arg(long, value_enum)]
    h2_style: Option<RuleStyleArg>,

    /// Rule thickness around depth-2 headings, e.g. 1px
    #[arg(long, value_name = "THICKNESS")]
    h2_thickness: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
enum RuleStyleArg {
    #[default]
    Solid,
    Dashed,
    None,
}

impl From<RuleStyleArg> for RuleStyle {
    fn from(value: RuleStyleArg) -> Self {
        match value {
            RuleStyleArg::Solid => RuleStyle::Solid,
            RuleStyleArg::Dashed => RuleStyle::Dashed,
            RuleStyleArg::None => RuleStyle::None,
        }
    }
}

impl Cli {
    pub fn run(&self) -> miette::Result<()> {
        let Some(input) = &self.input else {
            Self::command().print_help().into_diagnostic()?;
            return Ok(());
        };

        if !input.exists() {
            return Err(FormatError::NotFound {
                path: input.clone(),
            }
            .into());
        }

        let output = self
            .output_file
            .as_ref()
            .or(self.output.as_ref())
            .unwrap_or(input);
        let options = self.resolve_options()?;
        tracing::debug!(?options, output = %output.display(), "resolved options");

        if self.stdout || self.check {
            let content = fs::read_to_string(input).into_diagnostic()?;
            let formatted = format_markdown(&content, Some(options))?;

            if self.stdout {
                let stdout = io::stdout();
                let mut handle = BufWriter::new(stdout.lock());
                handle.write_all(formatted.as_bytes()).into_diagnostic()?;
                return handle.flush().into_diagnostic();
            }

            let current = if output.exists() {
                fs::read_to_string(output).into_diagnostic()?
            } else {
                String::new()
            };

            if current != formatted {
                return Err(miette!("{} is not formatted", output.display()));
            }

            self.info(format!("{} {} is up to date", "✓".green(), output.display()));
            return Ok(());
        }

        self.info(format!("Formatting {}...", input.display()));
        format_file(input, Some(output), Some(options))?;
        self.info(format!(
            "{} Formatted and saved to {}",
            "✓".green(),
            output.display()
        ));

        Ok(())
    }

    /// Defaults, then the config file, then command-line flags.
    fn resolve_options(&self) -> miette::Result<FormatterOptions> {
        let mut options = match &self.config {
            Some(path) => FormatterOptions::from_file(path)?,
            None => FormatterOptions::default(),
        };

        let style = &self.style;
        if style.no_toc {
            options.generate_toc = false;
        }
        if style.no_center {
            options.center_headers = false;
        }
        if style.no_hr {
            options.add_hr_lines = false;
        }
        if let Some(h1_style) = style.h1_style {
            options.h1_style = h1_style.into();
        }
        if let Some(h1_thickness) = &style.h1_thickness {
            options.h1_thickness = h1_thickness.clone();
        }
        if let Some(h2_style) = style.h2_style {
            options.h2_style = h2_style.into();
        }
        if let Some(h2_thickness) = &style.h2_thickness {
            options.h2_thickness = h2_thickness.clone();
        }

        Ok(options)
    }

    fn info(&self, message: String) {
        if !self.quiet {
            println!("{}", message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[rstest]
    #[case::defaults(vec!["readme-format", "README.md"], FormatterOptions::default())]
    #[case::no_toc(
        vec!["readme-format", "README.md", "--no-toc"],
        FormatterOptions { generate_toc: false, ..Default::default() }
    )]
    #[case::bare(
        vec!["readme-format", "README.md", "--no-center", "--no-hr"],
        FormatterOptions { center_headers: false, add_hr_lines: false, ..Default::default() }
    )]
    #[case::styles(
        vec!["readme-format", "README.md", "--h1-style", "dashed", "--h1-thickness", "3px", "--h2-style", "none", "--h2-thickness", "4px"],
        FormatterOptions {
            h1_style: RuleStyle::Dashed,
            h1_thickness: "3px".to_string(),
            h2_style: RuleStyle::None,
            h2_thickness: "4px".to_string(),
            ..Default::default()
        }
    )]
    fn test_resolve_options(#[case] args: Vec<&str>, #[case] expected: FormatterOptions) {
        let cli = Cli::parse_from(args);
        assert_eq!(cli.resolve_options().unwrap(), expected);
    }

    #[rstest]
    #[case::positional(vec!["readme-format", "in.md", "out.md"], Some("out.md"), None)]
    #[case::flag(vec!["readme-format", "in.md", "-o", "flag.md"], None, Some("flag.md"))]
    #[case::long_flag(vec!["readme-format", "in.md", "--output", "flag.md"], None, Some("flag.md"))]
    fn test_output_arguments(
        #[case] args: Vec<&str>,
        #[case] output: Option<&str>,
        #[case] output_file: Option<&str>,
    ) {
        let cli = Cli::parse_from(args);
        assert_eq!(cli.input, Some(PathBuf::from("in.md")));
        assert_eq!(cli.output, output.map(PathBuf::from));
        assert_eq!(cli.output_file, output_file.map(PathBuf::from));
    }

    #[test]
    fn test_stdout_conflicts_with_check() {
        let result = Cli::try_parse_from(["readme-format", "in.md", "--stdout", "--check"]);
        assert!(result.is_err());
    }
}
