//! Output seam between the layout engine and whatever draws it.

use std::collections::HashMap;
use std::fmt::Write;

use crate::domain::{NodeId, ProgressStatus};
use crate::layout::{Layout, PositionedNode};

/// Turns a computed layout into some presentation
pub trait Renderer {
    /// What the renderer produces
    type Output;

    /// Render the layout
    fn render(&self, layout: &Layout) -> Self::Output;
}

/// Indented plain-text outline of a layout, one node per line, depth first
#[derive(Debug, Clone)]
pub struct OutlineRenderer {
    indent: usize,
    coordinates: bool,
}

impl Default for OutlineRenderer {
    fn default() -> Self {
        Self {
            indent: 2,
            coordinates: true,
        }
    }
}

impl OutlineRenderer {
    /// Renderer with two-space indentation and coordinates
    pub fn new() -> Self {
        Self::default()
    }

    /// Spaces per level
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Leave out the coordinates
    pub fn without_coordinates(mut self) -> Self {
        self.coordinates = false;
        self
    }

    fn glyph(status: ProgressStatus) -> char {
        match status {
            ProgressStatus::Completed => '✓',
            ProgressStatus::InProgress => '◐',
            ProgressStatus::NotStarted => '○',
        }
    }

    fn line(&self, out: &mut String, node: &PositionedNode) {
        let enriched = &node.node;
        // writing to a String cannot fail
        let _ = write!(
            out,
            "{:width$}{} #{} {}",
            "",
            Self::glyph(enriched.status),
            enriched.id(),
            enriched.node.title,
            width = node.depth * self.indent
        );
        if enriched.node.checkpoint {
            out.push_str(" ★");
        }
        if enriched.locked {
            out.push_str(" [locked]");
        }
        if self.coordinates {
            let _ = write!(out, " ({:.0}, {:.0})", node.x, node.y);
        }
        out.push('\n');
    }
}

impl Renderer for OutlineRenderer {
    type Output = String;

    fn render(&self, layout: &Layout) -> String {
        let mut children: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
        for connector in &layout.connectors {
            children.entry(connector.from).or_default().push(connector.to);
        }

        let mut out = String::new();
        let mut stack: Vec<NodeId> = layout.level(0).map(|n| n.id()).collect();
        stack.reverse();
        while let Some(id) = stack.pop() {
            let Some(node) = layout.get(id) else {
                continue;
            };
            self.line(&mut out, node);
            if let Some(kids) = children.get(&id) {
                stack.extend(kids.iter().rev());
            }
        }
        out
    }
}
