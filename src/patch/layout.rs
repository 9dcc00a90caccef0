//! Row/column flow layout.
//!
//! Each patch keeps two anchors: the row head (where the next row starts) and the row
//! tail (the node the current row continues from). A new node is placed relative to one
//! of them unless an absolute position is given.

use crate::{
    foundation::core::{Footprint, Position},
    patch::node::Node,
};

/// Position of the first flow-placed node in an empty patch.
pub const ORIGIN: Position = Position::new(25, 25);

/// Extra top margin per `new_row` step above 1.
pub const ROW_MARGIN: f64 = 25.0;

/// Extra left margin per `new_col` step.
pub const COL_MARGIN: f64 = 50.0;

/// Layout directive for one creation call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// `0` continues the current row, `1` starts a new row, values above `1` add a top
    /// margin.
    pub new_row: f64,
    /// `0` keeps the current baseline, `1` starts a new baseline, values above `1` add a
    /// left margin.
    pub new_col: f64,
    /// Absolute override; used only when both coordinates are non-negative.
    pub absolute: Option<Position>,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            new_row: 1.0,
            new_col: 0.0,
            absolute: None,
        }
    }
}

impl Placement {
    /// Continue the current row.
    pub fn same_row() -> Self {
        Self {
            new_row: 0.0,
            ..Self::default()
        }
    }

    /// Start a new row; `rows > 1` adds a top margin.
    pub fn new_row(rows: f64) -> Self {
        Self {
            new_row: rows,
            ..Self::default()
        }
    }

    /// Place at an absolute position, bypassing flow.
    pub fn at(x: i32, y: i32) -> Self {
        Self {
            absolute: Some(Position::new(x, y)),
            ..Self::default()
        }
    }

    /// Set the column directive.
    pub fn with_new_col(mut self, cols: f64) -> Self {
        self.new_col = cols;
        self
    }

    fn absolute_position(&self) -> Option<Position> {
        self.absolute.filter(|p| p.is_on_canvas())
    }
}

/// Position of the node that follows `anchor`, given the anchor's footprint.
pub fn next_position(
    anchor: Position,
    footprint: Footprint,
    new_row: f64,
    new_col: f64,
) -> Position {
    // Float-to-int casts saturate; keep the sums saturating too.
    let mut pos = anchor;
    let mut new_col = new_col;
    if new_row < 1.0 {
        pos.x = pos.x.saturating_add(footprint.width);
        new_col -= 1.0;
    } else {
        let margin = (ROW_MARGIN * (new_row - 1.0)) as i32;
        pos.y = pos.y.saturating_add(footprint.height).saturating_add(margin);
    }
    pos.x = pos.x.saturating_add(((COL_MARGIN * new_col) as i32).max(0));
    pos
}

/// Outcome of resolving a [`Placement`] against the current anchors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Resolved {
    pub position: Position,
    pub absolute: bool,
}

/// Per-patch flow anchors, stored as node indices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlowState {
    row_head: Option<usize>,
    row_tail: Option<usize>,
}

impl FlowState {
    /// Anchor for the next row start.
    pub fn row_head(&self) -> Option<usize> {
        self.row_head
    }

    /// Anchor the current row continues from.
    pub fn row_tail(&self) -> Option<usize> {
        self.row_tail
    }

    pub(crate) fn resolve(&self, nodes: &[Node], placement: &Placement) -> Resolved {
        if let Some(position) = placement.absolute_position() {
            return Resolved {
                position,
                absolute: true,
            };
        }

        let anchor = if placement.new_row < 1.0 {
            self.row_tail
        } else {
            self.row_head
        };
        let position = match anchor.and_then(|i| nodes.get(i)) {
            Some(node) => next_position(
                node.position(),
                node.footprint(),
                placement.new_row,
                placement.new_col,
            ),
            None => ORIGIN,
        };
        Resolved {
            position,
            absolute: false,
        }
    }

    pub(crate) fn commit(&mut self, index: usize, placement: &Placement, absolute: bool) {
        self.row_tail = Some(index);
        if absolute
            || self.row_head.is_none()
            || placement.new_col > 0.0
            || placement.new_row >= 1.0
        {
            self.row_head = Some(index);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/patch/layout.rs"]
mod tests;
