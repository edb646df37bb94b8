use tracing::Level;

/// Largest arena the default options allow.
///
/// Parse trees hold a single function or expression, so a 16-bit index
/// space is plenty.
pub const DEFAULT_MAX_CAPACITY: usize = 1 << 15;

/// Sizing for a tree's node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeOptions {
    /// Number of slots allocated up front. Zero is treated as one.
    pub initial_capacity: usize,
    /// Growth stops with [`TreeError::CapacityOverflow`](crate::TreeError::CapacityOverflow)
    /// once doubling would exceed this many slots.
    pub max_capacity: usize,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            initial_capacity: 1,
            max_capacity: DEFAULT_MAX_CAPACITY,
        }
    }
}

/// Controls what [`Tree::dump`](crate::Tree::dump) emits and at which levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DumpOptions {
    /// Level for banner and node lines.
    pub level: Level,
    /// Level for the raw topology link lines.
    pub link_level: Level,
    pub show_links: bool,
}

impl Default for DumpOptions {
    fn default() -> Self {
        Self {
            level: Level::DEBUG,
            link_level: Level::INFO,
            show_links: true,
        }
    }
}

impl DumpOptions {
    /// Node lines only, no link lines.
    pub fn compact() -> Self {
        Self {
            show_links: false,
            ..Self::default()
        }
    }
}
