//! cmddoc: regenerate the LALib README from the command registrations in `index.js`.
//!
//! The source script is scanned for `// GROUP:` markers, `rsc('name',`
//! declarations and their hint strings. The existing README contributes its
//! requirements section and the fenced examples under each command. The
//! README is then rewritten, keeping a backup of the previous version.
//!
//! Running `cmddoc` with no arguments works on `index.js` and `README.md` in
//! the current directory.

mod error;
mod model;
mod output;
mod parser;
mod render;

use anyhow::{bail, Context, Result};
use clap::Parser;
use render::markdown::{
    MarkdownRenderer, DEFAULT_DESCRIPTION, DEFAULT_SUMMARY_EXCLUDE, DEFAULT_TITLE,
};
use render::Renderer;
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "cmddoc",
    about = "Regenerate a command reference README from annotated slash-command registrations"
)]
struct Cli {
    /// Source script containing the command registrations
    #[arg(short = 's', long, default_value = "index.js")]
    source: PathBuf,

    /// README to regenerate in place
    #[arg(short = 'r', long, default_value = "README.md")]
    readme: PathBuf,

    /// Backup path for the previous README (default: README.bak.md next to it)
    #[arg(short = 'b', long)]
    backup: Option<PathBuf>,

    /// Document title
    #[arg(long, default_value = DEFAULT_TITLE)]
    title: String,

    /// One-line description under the title
    #[arg(long, default_value = DEFAULT_DESCRIPTION)]
    description: String,

    /// Group left out of the summary list. Can be specified multiple times.
    #[arg(
        long = "exclude-summary",
        value_name = "GROUP",
        default_values = DEFAULT_SUMMARY_EXCLUDE.iter().copied()
    )]
    exclude_summary: Vec<String>,

    /// Print the regenerated README to stdout instead of writing it
    #[arg(long, conflicts_with = "check")]
    stdout: bool,

    /// Fail if the README is not up to date. Writes nothing.
    #[arg(long)]
    check: bool,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(&cli)
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .try_init();
}

/// Extract, merge, render, then back up and write. The README is only touched
/// once the new contents are fully rendered.
fn run(cli: &Cli) -> Result<()> {
    let source = fs::read_to_string(&cli.source)
        .with_context(|| format!("failed to read {}", cli.source.display()))?;
    let readme = fs::read_to_string(&cli.readme)
        .with_context(|| format!("failed to read {}", cli.readme.display()))?;

    let doc = parser::build_document(&source, &readme)
        .with_context(|| format!("failed to merge {}", cli.readme.display()))?;

    let renderer = MarkdownRenderer {
        title: cli.title.clone(),
        description: cli.description.clone(),
        summary_exclude: cli.exclude_summary.clone(),
    };
    let rendered = renderer.render(&doc);

    if cli.stdout {
        print!("{}", rendered);
        return Ok(());
    }

    if cli.check {
        if rendered != readme {
            bail!(
                "{} is out of date, run cmddoc to regenerate it",
                cli.readme.display()
            );
        }
        info!(path = %cli.readme.display(), "README is up to date");
        return Ok(());
    }

    let backup_path = cli
        .backup
        .clone()
        .unwrap_or_else(|| output::default_backup_path(&cli.readme));
    output::backup(&cli.readme, &backup_path)?;
    output::write(&cli.readme, &rendered)?;

    Ok(())
}
