//! Fatal merge errors. Line numbers are 1-based positions in the documentation file.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MergeError {
    #[error("line {line}: group `{group}` is not declared in the source file")]
    UnknownGroup { line: usize, group: String },

    #[error("line {line}: command `/{command}` is not declared in group `{group}`")]
    UnknownCommand {
        line: usize,
        group: String,
        command: String,
    },

    #[error("line {line}: command heading has no `/name` code span: {heading}")]
    MalformedCommandHeading { line: usize, heading: String },
}
