//! Structure kinds and their descriptive metadata.

use crate::StructureInfo;
use serde::Serialize;
use std::fmt;

/// Which classic data structure the token sequence is rendered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureKind {
    #[default]
    Stack,
    Queue,
    LinkedList,
    Tree,
}

impl StructureKind {
    /// All kinds in presentation order.
    pub const ALL: [StructureKind; 4] = [
        StructureKind::Stack,
        StructureKind::Queue,
        StructureKind::LinkedList,
        StructureKind::Tree,
    ];

    /// Parse a user-facing name. Accepts the short aliases the original UI
    /// used as option values.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "stack" => Some(StructureKind::Stack),
            "queue" => Some(StructureKind::Queue),
            "linkedlist" | "list" => Some(StructureKind::LinkedList),
            "tree" => Some(StructureKind::Tree),
            _ => None,
        }
    }

    pub fn info(self) -> StructureInfo {
        match self {
            StructureKind::Stack => StructureInfo {
                label: "Stack (LIFO)",
                blurb: "Last In, First Out. Items are added and removed from the top.",
                endpoints: ("TOP", "BOTTOM"),
            },
            StructureKind::Queue => StructureInfo {
                label: "Queue (FIFO)",
                blurb: "First In, First Out. Items are added at the rear and removed from the front.",
                endpoints: ("FRONT", "REAR"),
            },
            StructureKind::LinkedList => StructureInfo {
                label: "Linked List",
                blurb: "A linear collection where each element points to the next.",
                endpoints: ("HEAD", "NULL"),
            },
            StructureKind::Tree => StructureInfo {
                label: "Binary Tree",
                blurb: "A hierarchical structure where each node has at most two children.",
                endpoints: ("ROOT", "LEAVES"),
            },
        }
    }
}

impl fmt::Display for StructureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.info().label)
    }
}
