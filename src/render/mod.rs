//! Renders a merged [`Document`] into file contents.

pub mod markdown;

use crate::model::Document;

/// Trait for rendering a Document into a specific output format.
pub trait Renderer {
    fn render(&self, doc: &Document) -> String;
}
