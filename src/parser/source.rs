//! Command extraction from the annotated source script, as a line-by-line state machine.
//!
//! Three line classes are recognized, tried in this order:
//!
//! - `// GROUP: <name>` switches the current group
//! - `rsc('<name>',` declares a command in the current group
//! - `'<span class="monospace">SIG</span> – HINT',` fills in the pending command
//!
//! Everything else is skipped.

use crate::model::*;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

// -- Regex patterns -----------------------------------------------------------

// Group names are trimmed so they survive the `### ` heading round trip
static RE_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^// GROUP: \s*(\S.*?)\s*$").unwrap());

static RE_DECL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^rsc\('([^']+)',\s*$").unwrap());

static RE_HINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*'(?:<span class="monospace">(.*?)</span>)? – (.+)',$"#).unwrap()
});

// -- Parser state -------------------------------------------------------------

struct Extractor {
    index: CommandIndex,
    current_group: String,
    /// (group, command) positions of the declaration still waiting for a hint
    pending: Option<(usize, usize)>,
}

impl Extractor {
    fn new() -> Self {
        Self {
            index: CommandIndex::default(),
            current_group: DEFAULT_GROUP.to_string(),
            pending: None,
        }
    }

    fn process_line(&mut self, line_no: usize, line: &str) {
        if let Some(caps) = RE_GROUP.captures(line) {
            self.current_group = caps[1].to_string();
            self.index.ensure_group(&self.current_group);
            return;
        }

        if let Some(caps) = RE_DECL.captures(line) {
            self.warn_unhinted();
            let name = &caps[1];
            let g = self.index.ensure_group(&self.current_group);
            let group = &mut self.index.groups[g];
            if group.position(name).is_some() {
                warn!(
                    line = line_no,
                    group = %group.name,
                    command = name,
                    "duplicate command name, documentation merges into the first one"
                );
            }
            group.commands.push(Command::new(name));
            self.pending = Some((g, group.commands.len() - 1));
            return;
        }

        let Some((g, c)) = self.pending else {
            return;
        };
        if let Some(caps) = RE_HINT.captures(line) {
            let group = &mut self.index.groups[g];
            let cmd = &mut group.commands[c];
            cmd.signature = caps
                .get(1)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            cmd.hint = caps[2].to_string();
            debug!(group = %group.name, command = %cmd.name, "extracted command");
            self.pending = None;
        }
    }

    fn warn_unhinted(&self) {
        if let Some((g, c)) = self.pending {
            let group = &self.index.groups[g];
            warn!(
                group = %group.name,
                command = %group.commands[c].name,
                "command declared without a hint line"
            );
        }
    }
}

// -- Public API ---------------------------------------------------------------

/// Extract every declared command from the source script, grouped by the
/// `// GROUP:` marker active at its declaration.
pub fn extract(input: &str) -> CommandIndex {
    let mut state = Extractor::new();
    for (idx, line) in input.lines().enumerate() {
        state.process_line(idx + 1, line);
    }
    state.warn_unhinted();
    state.index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_group_with_signature() {
        let input = "// GROUP: Math\nrsc('add',\n'<span class=\"monospace\">a b</span> – adds two numbers',\n";
        let index = extract(input);
        assert_eq!(index.groups.len(), 1);
        let group = &index.groups[0];
        assert_eq!(group.name, "Math");
        assert_eq!(group.commands.len(), 1);
        assert_eq!(group.commands[0].name, "add");
        assert_eq!(group.commands[0].signature, "a b");
        assert_eq!(group.commands[0].hint, "adds two numbers");
        assert!(group.commands[0].examples.is_empty());
    }

    #[test]
    fn extract_hint_without_signature() {
        let input = "// GROUP: Help\nrsc('lalib?',\n    ' – Lists LALib commands',\n";
        let index = extract(input);
        let cmd = &index.groups[0].commands[0];
        assert_eq!(cmd.signature, "");
        assert_eq!(cmd.hint, "Lists LALib commands");
    }

    #[test]
    fn extract_realistic_registration() {
        let input = r#"// GROUP: Lists
rsc('pop',
    (args, value)=>{
        return value;
    },
    [],
    '<span class="monospace">[optional index=int] (variable)</span> – Removes the last element.',
    true,
);
"#;
        let index = extract(input);
        let cmd = &index.groups[0].commands[0];
        assert_eq!(cmd.name, "pop");
        assert_eq!(cmd.signature, "[optional index=int] (variable)");
        assert_eq!(cmd.hint, "Removes the last element.");
    }

    #[test]
    fn commands_before_marker_are_ungrouped() {
        let input = "rsc('first',\n' – one',\n// GROUP: Later\nrsc('second',\n' – two',\n";
        let index = extract(input);
        let names: Vec<_> = index.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, [DEFAULT_GROUP, "Later"]);
        assert_eq!(index.groups[0].commands[0].name, "first");
        assert_eq!(index.groups[1].commands[0].name, "second");
    }

    #[test]
    fn hint_without_pending_declaration_is_ignored() {
        let input = "// GROUP: Math\n' – orphan hint',\nrsc('add',\n' – adds',\n' – second hint',\n";
        let index = extract(input);
        assert_eq!(index.groups[0].commands.len(), 1);
        assert_eq!(index.groups[0].commands[0].hint, "adds");
    }

    #[test]
    fn declaration_without_hint_keeps_empty_fields() {
        let input = "// GROUP: Math\nrsc('a',\nrsc('b',\n' – bee',\n";
        let index = extract(input);
        let cmds = &index.groups[0].commands;
        assert_eq!(cmds[0].hint, "");
        assert_eq!(cmds[0].signature, "");
        assert_eq!(cmds[1].hint, "bee");
    }

    #[test]
    fn reopened_group_appends_in_order() {
        let input = "// GROUP: A\nrsc('one',\n// GROUP: B\nrsc('two',\n// GROUP: A\nrsc('three',\n";
        let index = extract(input);
        assert_eq!(index.groups.len(), 2);
        let a: Vec<_> = index.groups[0].commands.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(a, ["one", "three"]);
    }

    #[test]
    fn empty_group_marker_still_creates_group() {
        let index = extract("// GROUP: Undocumented\n");
        assert_eq!(index.groups.len(), 1);
        assert!(index.groups[0].commands.is_empty());
    }

    #[test]
    fn indented_declaration_is_not_matched() {
        let index = extract("    rsc('nested',\n");
        assert_eq!(index.command_count(), 0);
    }

    #[test]
    fn group_marker_keeps_pending_command() {
        let input = "rsc('a',\n// GROUP: Next\n' – late hint',\n";
        let index = extract(input);
        assert_eq!(index.groups[0].commands[0].hint, "late hint");
        assert_eq!(index.groups[1].name, "Next");
    }

    #[test]
    fn group_marker_name_is_trimmed() {
        let input = "// GROUP:   Math \t\nrsc('add',\n' – adds',\n// GROUP: Two Words  \n";
        let index = extract(input);
        let names: Vec<_> = index.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["Math", "Two Words"]);
    }

    #[test]
    fn blank_group_marker_is_ignored() {
        let index = extract("// GROUP:    \nrsc('add',\n");
        assert_eq!(index.groups[0].name, DEFAULT_GROUP);
    }

    #[test]
    fn crlf_lines_are_accepted() {
        let input = "// GROUP: Math\r\nrsc('add',\r\n' – adds',\r\n";
        let index = extract(input);
        assert_eq!(index.groups[0].name, "Math");
        assert_eq!(index.groups[0].commands[0].hint, "adds");
    }
}
