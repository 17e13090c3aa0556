//! Merge hand-written prose from the existing documentation into the
//! extracted command index.
//!
//! Two things survive regeneration: the requirements block and the fenced
//! examples under each `` #### `/command` `` heading. Everything else in the
//! old file is rebuilt from the source script.

use crate::error::MergeError;
use crate::model::*;
use tracing::{debug, warn};

const REQUIREMENTS_HEADING: &str = "## Requirements";
const TOP_HEADING: &str = "## ";
const GROUP_HEADING: &str = "### ";
const COMMAND_HEADING: &str = "#### ";
const FENCE: &str = "```";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Requirements {
    NotSeen,
    Capturing,
    Done,
}

struct Merger {
    index: CommandIndex,
    requirements: Requirements,
    requirements_text: String,
    current_group: Option<String>,
    /// (group, command) positions of the heading currently in scope
    current_command: Option<(usize, usize)>,
    /// Open example accumulator; `Some` while inside a fence
    example: Option<String>,
}

impl Merger {
    fn new(index: CommandIndex) -> Self {
        Self {
            index,
            requirements: Requirements::NotSeen,
            requirements_text: String::new(),
            current_group: None,
            current_command: None,
            example: None,
        }
    }

    fn process_line(&mut self, line_no: usize, line: &str) -> Result<(), MergeError> {
        // Requirements prose is copied as-is, headings and fences included
        if self.requirements == Requirements::Capturing {
            if line.starts_with(TOP_HEADING) {
                self.requirements = Requirements::Done;
            } else {
                self.requirements_text.push_str(line);
                self.requirements_text.push('\n');
            }
            return Ok(());
        }

        if let Some(example) = self.example.as_mut() {
            if line == FENCE {
                self.close_example();
            } else {
                example.push_str(line);
                example.push('\n');
            }
            return Ok(());
        }

        if self.requirements == Requirements::NotSeen && line.trim_end() == REQUIREMENTS_HEADING {
            self.requirements = Requirements::Capturing;
            return Ok(());
        }

        if let Some(rest) = line.strip_prefix(GROUP_HEADING) {
            self.current_group = Some(rest.trim().to_string());
            self.current_command = None;
            return Ok(());
        }

        let Some(group_name) = self.current_group.as_deref() else {
            return Ok(());
        };

        if line.starts_with(COMMAND_HEADING) {
            let name = command_name(line).ok_or_else(|| MergeError::MalformedCommandHeading {
                line: line_no,
                heading: line.to_string(),
            })?;
            let g = self
                .index
                .position(group_name)
                .ok_or_else(|| MergeError::UnknownGroup {
                    line: line_no,
                    group: group_name.to_string(),
                })?;
            let c = self.index.groups[g]
                .position(name)
                .ok_or_else(|| MergeError::UnknownCommand {
                    line: line_no,
                    group: group_name.to_string(),
                    command: name.to_string(),
                })?;
            self.current_command = Some((g, c));
            return Ok(());
        }

        if self.current_command.is_some() && line == FENCE {
            self.example = Some(String::new());
        }

        Ok(())
    }

    fn close_example(&mut self) {
        let (Some(text), Some((g, c))) = (self.example.take(), self.current_command) else {
            return;
        };
        let cmd = &mut self.index.groups[g].commands[c];
        debug!(command = %cmd.name, bytes = text.len(), "recovered example");
        cmd.examples.push(text);
    }

    fn finish(self) -> Document {
        if let (Some(partial), Some((g, c))) = (&self.example, self.current_command) {
            warn!(
                command = %self.index.groups[g].commands[c].name,
                bytes = partial.len(),
                "unterminated example block at end of file, dropping it"
            );
        }
        if self.requirements == Requirements::NotSeen {
            warn!("no `{}` section found, writing it empty", REQUIREMENTS_HEADING);
        }
        Document {
            index: self.index,
            requirements: trim_blank_lines(&self.requirements_text),
        }
    }
}

// -- Public API ---------------------------------------------------------------

/// Attach the requirements prose and every fenced example found in `readme`
/// to the commands in `index`.
///
/// A command heading that names a group or command missing from `index`
/// aborts the merge.
pub fn merge(index: CommandIndex, readme: &str) -> Result<Document, MergeError> {
    let mut state = Merger::new(index);
    for (idx, line) in readme.lines().enumerate() {
        state.process_line(idx + 1, line)?;
    }
    Ok(state.finish())
}

/// Name inside the first code span of a command heading, without the slash.
///
/// `` #### `/add` `` → `add`
fn command_name(heading: &str) -> Option<&str> {
    heading.split('`').nth(1)?.strip_prefix('/')
}

/// Drop blank lines at both ends, keep everything in between verbatim.
fn trim_blank_lines(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let Some(start) = lines.iter().position(|l| !l.trim().is_empty()) else {
        return String::new();
    };
    let end = lines
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .unwrap_or(start);
    lines[start..=end].join("\n")
}
