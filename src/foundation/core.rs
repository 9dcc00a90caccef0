use std::sync::atomic::{AtomicU64, Ordering};

/// Integer canvas coordinates of a node's top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    /// Horizontal offset, growing to the right.
    pub x: i32,
    /// Vertical offset, growing downwards.
    pub y: i32,
}

impl Position {
    /// Sentinel reported by nodes that never take part in flow layout.
    pub const OFF_CANVAS: Self = Self { x: -1, y: -1 };

    /// Build a position from its coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Both coordinates are non-negative, i.e. usable as an absolute placement.
    pub fn is_on_canvas(self) -> bool {
        self.x >= 0 && self.y >= 0
    }
}

/// Estimated on-canvas size of a node, used only to place the next one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Footprint {
    /// Width in canvas units.
    pub width: i32,
    /// Height in canvas units.
    pub height: i32,
}

impl Footprint {
    /// Zero-sized footprint for hidden nodes.
    pub const ZERO: Self = Self {
        width: 0,
        height: 0,
    };

    /// Build a footprint from its extents.
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Process-unique tag identifying one [`crate::Patch`] instance.
///
/// Node handles carry the tag of the patch that issued them so that a handle can be
/// rejected when it is used with any other patch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PatchId(u64);

impl PatchId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for PatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "patch#{}", self.0)
    }
}
