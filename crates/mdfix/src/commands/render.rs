//! `mdfix render` command implementation.

use std::path::PathBuf;

use clap::Args;
use mdfix_ast::{ChangeJournal, default_options, parse_markdown};
use mdfix_config::{CliSettings, Config};

use super::{processors, read_input, renderer, write_stdout};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render (`-` for stdin).
    input: PathBuf,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover mdfix.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Disable the alert rewrite.
    #[arg(long)]
    no_alerts: bool,

    /// Disable the image reference link repair.
    #[arg(long)]
    no_image_ref_fix: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl RenderArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            alerts: self.no_alerts.then_some(false),
            image_ref_links: self.no_image_ref_fix.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(config = %path.display(), "Loaded configuration");
        }

        let source = read_input(&self.input)?;
        tracing::info!(input = %self.input.display(), bytes = source.len(), "Rendering");
        let html = render_source(&source, &config);

        match self.output {
            Some(path) => {
                std::fs::write(&path, html)?;
                Output::new().success(&format!("Wrote {}", path.display()));
            }
            None => write_stdout(&html)?,
        }
        Ok(())
    }
}

/// Parse, post-process and render `source` as configured.
fn render_source(source: &str, config: &Config) -> String {
    let mut doc = parse_markdown(source, default_options());
    let mut journal = ChangeJournal::new();
    let summary = processors(config).run(&mut doc, &mut journal);
    tracing::debug!(
        visited = summary.visited,
        patched = summary.patched,
        changes = journal.changes().len(),
        "Post-processing finished"
    );

    let mut html = renderer(config).render(&doc);
    html.push('\n');
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_alert() {
        let html = render_source("> [!IMPORTANT]\n> Read me", &Config::default());
        assert_eq!(
            html,
            concat!(
                r#"<div class="markdown-alert markdown-alert-important">"#,
                r#"<p class="markdown-alert-title">important</p>"#,
                "<p>Read me</p></div>\n",
            )
        );
    }

    #[test]
    fn test_render_alerts_disabled() {
        let mut config = Config::default();
        config.extensions.alerts = false;

        let html = render_source("> [!IMPORTANT]\n> Read me", &config);

        assert_eq!(
            html,
            "<blockquote><p>[!IMPORTANT]\nRead me</p></blockquote>\n"
        );
    }
}
