//! `mdfix tree` command implementation.

use std::fmt::Write;
use std::path::PathBuf;

use clap::Args;
use mdfix_ast::{Change, ChangeJournal, Document, default_options, parse_markdown};
use mdfix_config::Config;

use super::{processors, read_input, write_stdout};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the tree command.
#[derive(Args)]
pub(crate) struct TreeArgs {
    /// Markdown file to inspect (`-` for stdin).
    input: PathBuf,

    /// Path to configuration file (default: auto-discover mdfix.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the tree as parsed, before post-processing.
    #[arg(long)]
    raw: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl TreeArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;
        let source = read_input(&self.input)?;

        if self.raw {
            let doc = parse_markdown(&source, default_options());
            output.highlight("Parsed tree");
            return write_stdout(&doc.outline(doc.root()));
        }

        let (doc, journal) = process(&source, &config);
        output.highlight("Processed tree");
        write_stdout(&doc.outline(doc.root()))?;

        if journal.is_empty() {
            output.muted("No changes");
        } else {
            output.highlight("Changes");
            write_stdout(&format_journal(&doc, &journal))?;
        }
        Ok(())
    }
}

fn process(source: &str, config: &Config) -> (Document, ChangeJournal) {
    let mut doc = parse_markdown(source, default_options());
    let mut journal = ChangeJournal::new();
    processors(config).run(&mut doc, &mut journal);
    (doc, journal)
}

/// One line per change: sign, node tag, arena index.
fn format_journal(doc: &Document, journal: &ChangeJournal) -> String {
    let mut out = String::new();
    for &change in journal.changes() {
        let (sign, subtree) = match change {
            Change::Added(_) => ('+', ""),
            Change::AddedWithChildren(_) => ('+', " (subtree)"),
            Change::Removed(_) => ('-', ""),
            Change::RemovedWithChildren(_) => ('-', " (subtree)"),
        };
        let node = change.node();
        writeln!(
            out,
            "{sign} {} #{}{subtree}",
            doc.kind(node).tag(),
            node.index()
        )
        .unwrap();
    }
    out
}
