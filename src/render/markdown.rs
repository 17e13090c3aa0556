//! README renderer.
//!
//! Blank-line runs between sections match the layout the README has always
//! been generated with, so regenerating an up-to-date README is a no-op.

use crate::model::*;
use crate::render::Renderer;

/// Body of the fenced block written for commands without recovered examples.
pub const PLACEHOLDER_EXAMPLE: &str = "some code here\n";

pub const DEFAULT_TITLE: &str = "LALib";

pub const DEFAULT_DESCRIPTION: &str = "Library of STScript commands.";

/// Groups left out of the summary list by default.
pub const DEFAULT_SUMMARY_EXCLUDE: &[&str] = &["Help", "Undocumented"];

pub struct MarkdownRenderer {
    pub title: String,
    pub description: String,
    /// Groups omitted from the summary; they still get a reference section
    pub summary_exclude: Vec<String>,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            summary_exclude: DEFAULT_SUMMARY_EXCLUDE
                .iter()
                .map(|g| g.to_string())
                .collect(),
        }
    }
}

impl Renderer for MarkdownRenderer {
    fn render(&self, doc: &Document) -> String {
        let mut output = String::new();

        output.push_str(&format!("# {}\n\n", self.title));
        output.push_str(&format!("{}\n\n", self.description));
        for group in &doc.index.groups {
            if self.summary_exclude.contains(&group.name) {
                continue;
            }
            output.push_str(&render_summary_line(group));
        }

        output.push_str(&blank_lines(6));
        output.push_str("## Requirements\n\n");
        if !doc.requirements.is_empty() {
            output.push_str(&doc.requirements);
            output.push('\n');
        }

        output.push_str(&blank_lines(6));
        output.push_str("## Commands\n\n");
        for group in &doc.index.groups {
            output.push_str(&blank_lines(6));
            output.push_str(&format!("### {}", group.name));
            for cmd in &group.commands {
                output.push_str(&blank_lines(4));
                output.push_str(&render_command(cmd));
            }
        }

        output
    }
}

/// `\n- Math (add, sub)`
fn render_summary_line(group: &Group) -> String {
    let names: Vec<&str> = group.commands.iter().map(|c| c.name.as_str()).collect();
    format!("\n- {} ({})", group.name, names.join(", "))
}

fn render_command(cmd: &Command) -> String {
    let mut out = format!("#### `/{}`\n", cmd.name);
    if !cmd.signature.is_empty() {
        out.push_str(&format!("`{}`\n\n", cmd.signature));
    }
    out.push_str(&format!("{}\n\n", cmd.hint));
    out.push_str("##### Examples\n\n");
    if cmd.examples.is_empty() {
        out.push_str(&render_fence(PLACEHOLDER_EXAMPLE));
    } else {
        for example in &cmd.examples {
            out.push_str(&render_fence(example));
        }
    }
    out
}

/// Examples carry their own trailing newline.
fn render_fence(body: &str) -> String {
    format!("```\n{}```\n\n", body)
}

fn blank_lines(n: usize) -> String {
    "\n".repeat(n)
}
