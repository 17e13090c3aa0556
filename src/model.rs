//! Format-agnostic data model for extracted command documentation.

/// Group that collects commands declared before any `// GROUP:` marker.
pub const DEFAULT_GROUP: &str = "Ungrouped";

/// A single documented command.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    /// Argument signature from the monospace span, empty when absent
    pub signature: String,
    pub hint: String,
    /// Verbatim fenced blocks recovered from the old documentation
    pub examples: Vec<String>,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// A named bucket of commands, in declaration order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Group {
    pub name: String,
    pub commands: Vec<Command>,
}

impl Group {
    /// First command with the given name. Duplicates shadow later entries.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.commands.iter().position(|c| c.name == name)
    }
}

/// Group name → commands, preserving first-seen group order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CommandIndex {
    pub groups: Vec<Group>,
}

impl CommandIndex {
    pub fn position(&self, name: &str) -> Option<usize> {
        self.groups.iter().position(|g| g.name == name)
    }

    /// Index of the named group, appending an empty one if it is new.
    pub fn ensure_group(&mut self, name: &str) -> usize {
        match self.position(name) {
            Some(idx) => idx,
            None => {
                self.groups.push(Group {
                    name: name.to_string(),
                    commands: Vec::new(),
                });
                self.groups.len() - 1
            }
        }
    }

    pub fn command_count(&self) -> usize {
        self.groups.iter().map(|g| g.commands.len()).sum()
    }
}

/// Everything the writer needs: commands plus the preserved prose.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Document {
    pub index: CommandIndex,
    /// Requirements prose without surrounding blank lines
    pub requirements: String,
}
