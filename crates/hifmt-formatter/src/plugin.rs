use std::fmt;

use hifmt_markdown::{Markdown, RenderOptions};

use crate::{FormatError, FormatterOptions, HeadingTransformer};

/// A stage of a [`Pipeline`]: takes the parsed document and returns the
/// document handed to the next stage.
pub trait Plugin {
    fn name(&self) -> &str;

    fn transform(&self, markdown: Markdown) -> Result<Markdown, FormatError>;
}

impl Plugin for HeadingTransformer {
    fn name(&self) -> &str {
        "heading-hierarchy"
    }

    fn transform(&self, markdown: Markdown) -> Result<Markdown, FormatError> {
        Ok(HeadingTransformer::transform(self, markdown))
    }
}

/// Parse, run every plugin in registration order, print.
#[derive(Default)]
pub struct Pipeline {
    plugins: Vec<Box<dyn Plugin + Send + Sync>>,
    render_options: RenderOptions,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field(
                "plugins",
                &self.plugins.iter().map(|plugin| plugin.name()).collect::<Vec<_>>(),
            )
            .field("render_options", &self.render_options)
            .finish()
    }
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plugin(mut self, plugin: impl Plugin + Send + Sync + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    pub fn run(&self, markdown: Markdown) -> Result<Markdown, FormatError> {
        self.plugins.iter().try_fold(markdown, |markdown, plugin| {
            tracing::debug!(plugin = plugin.name(), "running plugin");
            plugin.transform(markdown)
        })
    }

    pub fn process(&self, content: &str) -> Result<String, FormatError> {
        let mut markdown = content
            .parse::<Markdown>()
            .map_err(|e| FormatError::Parse(e.to_string()))?;
        markdown.set_options(self.render_options.clone());

        Ok(self.run(markdown)?.to_string())
    }
}

/// Formats text with a single [`HeadingTransformer`] stage.
#[derive(Debug)]
pub struct ReadmeFormatter {
    pipeline: Pipeline,
}

impl ReadmeFormatter {
    pub fn new(options: Option<FormatterOptions>) -> Self {
        Self {
            pipeline: Pipeline::new().with_plugin(HeadingTransformer::new(options)),
        }
    }

    pub fn format(&self, markdown: &str) -> Result<String, FormatError> {
        self.pipeline.process(markdown)
    }
}

impl Default for ReadmeFormatter {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hifmt_markdown::{Html, ListStyle, Node};

    struct Append(&'static str);

    impl Plugin for Append {
        fn name(&self) -> &str {
            "append"
        }

        fn transform(&self, mut markdown: Markdown) -> Result<Markdown, FormatError> {
            markdown.nodes.push(Node::Html(Html::new(self.0)));
            Ok(markdown)
        }
    }

    struct Fail;

    impl Plugin for Fail {
        fn name(&self) -> &str {
            "fail"
        }

        fn transform(&self, _: Markdown) -> Result<Markdown, FormatError> {
            Err(FormatError::Parse("stage failed".to_string()))
        }
    }

    #[test]
    fn test_empty_pipeline_round_trips() {
        let output = Pipeline::new().process("# Title\n\ntext").unwrap();
        assert_eq!(output, "# Title\n\ntext\n");
    }

    #[test]
    fn test_plugins_run_in_order() {
        let output = Pipeline::new()
            .with_plugin(Append("a"))
            .with_plugin(Append("b"))
            .process("text")
            .unwrap();

        assert_eq!(output, "text\n\na\nb\n");
    }

    #[test]
    fn test_plugin_error_stops_pipeline() {
        let result = Pipeline::new()
            .with_plugin(Fail)
            .with_plugin(Append("never"))
            .process("text");

        assert!(matches!(result, Err(FormatError::Parse(message)) if message == "stage failed"));
    }

    #[test]
    fn test_heading_transformer_as_plugin_matches_direct_call() {
        let input = "# Title\n\n## A\n\ntext\n";
        let transformer = HeadingTransformer::default();
        let direct = transformer
            .transform(input.parse::<Markdown>().unwrap())
            .to_string();

        let piped = Pipeline::new().with_plugin(transformer).process(input).unwrap();
        assert_eq!(piped, direct);
    }

    #[test]
    fn test_render_options_apply_to_output() {
        let output = Pipeline::new()
            .with_render_options(RenderOptions {
                list_style: ListStyle::Plus,
            })
            .process("- a\n- b")
            .unwrap();

        assert_eq!(output, "+ a\n+ b\n");
    }

    #[test]
    fn test_readme_formatter() {
        let formatter = ReadmeFormatter::new(Some(FormatterOptions {
            generate_toc: false,
            ..Default::default()
        }));

        let output = formatter.format("# Title\n\n## A").unwrap();
        assert!(output.starts_with("<div align=\"center\">"));
        assert!(!output.contains("Table of Contents"));
        assert!(format!("{:?}", formatter).contains("heading-hierarchy"));
    }
}
