//! Deterministic layout strategies for the four structure kinds.
//!
//! One layout pass maps an ordered token sequence onto positioned nodes and
//! connector edges. Output is recomputed from scratch on every pass; nodes
//! carry no identity across passes, so callers must treat the model as a
//! value, not a retained scene graph.
//!
//! Sizing policy: geometry is container-size-independent. The binary tree
//! always uses its formula bounds (`2^levels * TREE_SLOT` wide,
//! `levels * TREE_LEVEL_SPAN` tall); the linear kinds center within a
//! supplied viewport and fall back to content-sized bounds without one.
//!
//! Tree geometry uses the complete-binary-tree index convention: the node at
//! index `i` has children at `2i + 1` and `2i + 2`, so index arithmetic
//! stands in for parent/child pointers and no tree data structure is needed.

use crate::StructureKind;
use serde::Serialize;
use std::collections::HashSet;

/// Square node extent used by every strategy.
pub const NODE_SIZE: f64 = 75.0;
/// Vertical distance between consecutive tree levels.
pub const TREE_LEVEL_HEIGHT: f64 = 120.0;

/// Horizontal slot width reserved per bottom-level tree node.
const TREE_SLOT: f64 = 100.0;
/// Height reserved per tree level in the content bounds.
const TREE_LEVEL_SPAN: f64 = 150.0;
/// Center-to-center spacing for vertically stacked nodes.
const STACK_SPAN: f64 = 90.0;
/// Center-to-center spacing for horizontally chained nodes.
const CHAIN_SPAN: f64 = 115.0;

/// Target drawing area supplied by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// One positioned token. `x`/`y` address the node center.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutNode {
    pub token_index: usize,
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub highlighted: bool,
    /// Staggered-reveal index for presentation (stack counts from the
    /// physical top; the other kinds count in token order).
    pub reveal_order: usize,
}

/// Connector between two token indices (tree parent→child, chain adjacency).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
}

/// Output of one layout pass.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct LayoutModel {
    /// Nodes in visual order (stack: top to bottom; others: token order).
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<Edge>,
    /// Content bounds (or the viewport bounds for linear kinds given one).
    pub width: f64,
    pub height: f64,
    /// True only for the linked list: an explicit end marker follows the
    /// last node.
    pub terminated: bool,
}

impl LayoutModel {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Compute the layout for `tokens` under `kind`.
///
/// Empty input yields an empty model; the caller renders its own placeholder.
/// Any node whose token index appears in `highlights` is flagged; the flag is
/// derived fresh every pass and never stored.
pub fn layout(
    tokens: &[String],
    kind: StructureKind,
    viewport: Option<Viewport>,
    highlights: &HashSet<usize>,
) -> LayoutModel {
    if tokens.is_empty() {
        return LayoutModel::default();
    }
    match kind {
        StructureKind::Stack => layout_stack(tokens, viewport, highlights),
        StructureKind::Queue => layout_chain(tokens, viewport, highlights, false),
        StructureKind::LinkedList => layout_chain(tokens, viewport, highlights, true),
        StructureKind::Tree => layout_tree(tokens, highlights),
    }
}

fn mk_node(
    token_index: usize,
    text: &str,
    x: f64,
    y: f64,
    reveal_order: usize,
    highlights: &HashSet<usize>,
) -> LayoutNode {
    LayoutNode {
        token_index,
        text: text.to_owned(),
        x,
        y,
        highlighted: highlights.contains(&token_index),
        reveal_order,
    }
}

/// Vertical column, last token on top. Nodes are emitted top to bottom so the
/// vector order matches the visual order.
fn layout_stack(
    tokens: &[String],
    viewport: Option<Viewport>,
    highlights: &HashSet<usize>,
) -> LayoutModel {
    let n = tokens.len();
    let content_height = n as f64 * STACK_SPAN;
    let (width, height) = match viewport {
        Some(v) => (v.width, v.height.max(content_height)),
        None => (NODE_SIZE, content_height),
    };
    let nodes = tokens
        .iter()
        .enumerate()
        .rev()
        .map(|(i, text)| {
            // Distance from the physical top doubles as the reveal order.
            let from_top = n - 1 - i;
            let y = from_top as f64 * STACK_SPAN + STACK_SPAN / 2.0;
            mk_node(i, text, width / 2.0, y, from_top, highlights)
        })
        .collect();
    LayoutModel {
        nodes,
        edges: Vec::new(),
        width,
        height,
        terminated: false,
    }
}

/// Horizontal chain in token order with adjacency edges; shared by queue and
/// linked list (the latter additionally carries the end marker flag).
fn layout_chain(
    tokens: &[String],
    viewport: Option<Viewport>,
    highlights: &HashSet<usize>,
    terminated: bool,
) -> LayoutModel {
    let n = tokens.len();
    let content_width = n as f64 * CHAIN_SPAN;
    let (width, height) = match viewport {
        Some(v) => (v.width.max(content_width), v.height),
        None => (content_width, NODE_SIZE),
    };
    let y = height / 2.0;
    let nodes = tokens
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let x = i as f64 * CHAIN_SPAN + CHAIN_SPAN / 2.0;
            mk_node(i, text, x, y, i, highlights)
        })
        .collect();
    let edges = (1..n).map(|i| Edge { from: i - 1, to: i }).collect();
    LayoutModel {
        nodes,
        edges,
        width,
        height,
        terminated,
    }
}

/// Number of levels in a complete binary tree holding `n` nodes:
/// `ceil(log2(n + 1))`.
fn tree_levels(n: usize) -> u32 {
    let slots = n + 1;
    slots.ilog2() + u32::from(!slots.is_power_of_two())
}

/// Position of tree node `i` inside formula bounds of the given width.
fn tree_position(i: usize, width: f64) -> (f64, f64) {
    let level = (i + 1).ilog2();
    let pos_in_level = i - (2usize.pow(level) - 1);
    let nodes_in_level = 2usize.pow(level);
    let x = (width / (nodes_in_level as f64 + 1.0)) * (pos_in_level as f64 + 1.0);
    let y = (level as f64 + 1.0) * TREE_LEVEL_HEIGHT;
    (x, y)
}

/// Complete binary tree by array-index convention. Always formula-sized;
/// a viewport never squeezes the tree (collision-free by construction).
fn layout_tree(tokens: &[String], highlights: &HashSet<usize>) -> LayoutModel {
    let n = tokens.len();
    let levels = tree_levels(n);
    let width = 2f64.powi(levels as i32) * TREE_SLOT;
    let height = levels as f64 * TREE_LEVEL_SPAN;

    let nodes = tokens
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let (x, y) = tree_position(i, width);
            mk_node(i, text, x, y, i, highlights)
        })
        .collect();

    let mut edges = Vec::new();
    for i in 0..n {
        for child in [2 * i + 1, 2 * i + 2] {
            if child < n {
                edges.push(Edge { from: i, to: child });
            }
        }
    }

    LayoutModel {
        nodes,
        edges,
        width,
        height,
        terminated: false,
    }
}
