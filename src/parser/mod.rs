//! Source extraction followed by README merge.

pub mod merge;
pub mod source;

use crate::error::MergeError;
use crate::model::Document;
use tracing::info;

/// Extract commands from `source` and attach the prose preserved in `readme`.
pub fn build_document(source: &str, readme: &str) -> Result<Document, MergeError> {
    let index = source::extract(source);
    info!(
        groups = index.groups.len(),
        commands = index.command_count(),
        "extracted commands"
    );

    let doc = merge::merge(index, readme)?;
    let examples: usize = doc
        .index
        .groups
        .iter()
        .flat_map(|g| &g.commands)
        .map(|c| c.examples.len())
        .sum();
    info!(examples, requirements = !doc.requirements.is_empty(), "merged existing README");
    Ok(doc)
}
