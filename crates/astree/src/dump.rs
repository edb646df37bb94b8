//! Human-readable tree dumps for debugging.
//!
//! The traversal visits a node, then its first child one level deeper, then
//! the node's next sibling at the same level. Every node produces a line with
//! its depth, index and kind, followed by a line of raw topology links:
//!
//! ```text
//! --- TREE MAP ---
//! 0: (idx: 0) sequence node
//! parent: -1, first_child: 1, next_sibling: -1, prev_sibling: -1
//! 	1: (idx: 1) literal node: 3
//! 	parent: 0, first_child: -1, next_sibling: -1, prev_sibling: -1
//! --- END TREE MAP ---
//! ```
//!
//! Lines are handed to a [`DumpSink`] together with a [`Level`], so callers
//! decide whether they end up in `tracing`, a string, or somewhere else.

use tracing::Level;

use crate::{
    arena::{NodeId, display_link},
    options::DumpOptions,
    tree::Tree,
};

pub const TREE_MAP_BEGIN: &str = "--- TREE MAP ---";
pub const TREE_MAP_END: &str = "--- END TREE MAP ---";

/// Receives rendered dump lines.
pub trait DumpSink {
    fn emit(&mut self, level: Level, line: &str);
}

/// Collects lines separated by `\n`, ignoring levels.
impl DumpSink for String {
    fn emit(&mut self, _level: Level, line: &str) {
        self.push_str(line);
        self.push('\n');
    }
}

impl DumpSink for Vec<String> {
    fn emit(&mut self, _level: Level, line: &str) {
        self.push(line.to_string());
    }
}

/// Forwards every line to the current `tracing` subscriber at the line's level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DumpSink for TracingSink {
    fn emit(&mut self, level: Level, line: &str) {
        match level {
            Level::ERROR => tracing::error!(target: "astree::dump", "{}", line),
            Level::WARN => tracing::warn!(target: "astree::dump", "{}", line),
            Level::INFO => tracing::info!(target: "astree::dump", "{}", line),
            Level::DEBUG => tracing::debug!(target: "astree::dump", "{}", line),
            Level::TRACE => tracing::trace!(target: "astree::dump", "{}", line),
        }
    }
}

impl Tree {
    /// Renders the subtree starting at `start` (and its following siblings) into `sink`.
    ///
    /// `start_depth` is the depth reported for `start`; banners are emitted
    /// only when it is zero. Never fails: an invalid or free start index is
    /// rendered as a single unknown node line.
    pub fn dump<S: DumpSink + ?Sized>(
        &self,
        start: NodeId,
        start_depth: usize,
        options: &DumpOptions,
        sink: &mut S,
    ) {
        if start_depth == 0 {
            sink.emit(options.level, TREE_MAP_BEGIN);
        }

        let arena = self.arena();
        let mut stack = vec![(start, start_depth)];
        let mut visited = 0;

        while let Some((id, depth)) = stack.pop() {
            let indent = "\t".repeat(depth);

            let Ok(node) = arena.get_active(id) else {
                sink.emit(
                    options.level,
                    &format!("{}{}: (idx: {}) unknown node", indent, depth, id),
                );
                continue;
            };

            visited += 1;
            if visited > arena.capacity() {
                tracing::warn!(node = %id, "tree dump visited more nodes than the arena holds");
                break;
            }

            sink.emit(
                options.level,
                &format!("{}{}: (idx: {}) {}", indent, depth, id, node.kind),
            );

            if options.show_links {
                sink.emit(
                    options.link_level,
                    &format!(
                        "{}parent: {}, first_child: {}, next_sibling: {}, prev_sibling: {}",
                        indent,
                        display_link(node.parent),
                        display_link(node.first_child),
                        display_link(node.next_sibling),
                        display_link(node.prev_sibling),
                    ),
                );
            }

            if let Some(next) = node.next_sibling {
                stack.push((next, depth));
            }
            if let Some(first) = node.first_child {
                stack.push((first, depth + 1));
            }
        }

        if start_depth == 0 {
            sink.emit(options.level, TREE_MAP_END);
        }
    }

    /// Dumps the whole tree to `tracing` with default options.
    pub fn trace_dump(&self) {
        self.dump(self.root(), 0, &DumpOptions::default(), &mut TracingSink);
    }

    /// Renders the whole tree with default options.
    pub fn render(&self) -> String {
        self.render_with(&DumpOptions::default())
    }

    pub fn render_with(&self, options: &DumpOptions) -> String {
        let mut output = String::new();
        self.dump(self.root(), 0, options, &mut output);
        output
    }
}
