//! Visual model for the structure visualizer.
//!
//! This crate is deliberately pure: it knows nothing about buffers, history,
//! or rendering surfaces. Given an ordered token sequence and a structure
//! kind it produces an abstract geometry (`LayoutModel`) that a presentation
//! layer paints however it likes. Keeping the geometry here, away from both
//! the state controller and any renderer, keeps every layout decision
//! testable without a display.

use serde::Serialize;

mod layout;
mod structure;

pub use layout::{
    Edge, LayoutModel, LayoutNode, NODE_SIZE, TREE_LEVEL_HEIGHT, Viewport, layout,
};
pub use structure::StructureKind;

/// Descriptive metadata for one structure kind, consumed by info panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StructureInfo {
    /// Short display name, e.g. "Stack (LIFO)".
    pub label: &'static str,
    /// One-sentence description of the access discipline.
    pub blurb: &'static str,
    /// Labels for the two visual endpoints (entry side first).
    pub endpoints: (&'static str, &'static str),
}
