//! CLI command implementations.

pub(crate) mod render;
pub(crate) mod tree;

pub(crate) use render::RenderArgs;
pub(crate) use tree::TreeArgs;

use std::io::{Read, Write};
use std::path::Path;

use mdfix_ast::NodeTag;
use mdfix_config::Config;
use mdfix_passes::{AlertPostProcessor, ImageRefLinkFix, PostProcessorSet};
use mdfix_renderer::HtmlRenderer;

use crate::error::CliError;

/// Post-processors enabled by `[extensions]`.
pub(crate) fn processors(config: &Config) -> PostProcessorSet {
    let mut set = PostProcessorSet::new();
    if config.extensions.alerts {
        set.register(Box::new(AlertPostProcessor));
    }
    if config.extensions.image_ref_links {
        set.register(Box::new(ImageRefLinkFix));
    }
    set
}

/// HTML renderer matching the enabled extensions.
pub(crate) fn renderer(config: &Config) -> HtmlRenderer {
    let renderer = HtmlRenderer::new();
    if config.extensions.alerts {
        renderer
    } else {
        renderer.without_handler(NodeTag::Alert)
    }
}

/// Read markdown from `path`, or from stdin when `path` is `-`.
pub(crate) fn read_input(path: &Path) -> Result<String, CliError> {
    let result = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).map(|_| buf)
    } else {
        std::fs::read_to_string(path)
    };
    result.map_err(|source| CliError::Input {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `text` to stdout.
pub(crate) fn write_stdout(text: &str) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
