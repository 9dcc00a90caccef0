//! Write PureData patches as Rust programs.
//!
//! A [`Patch`] is an ordered list of nodes (objects, messages, number boxes, subpatches,
//! arrays) plus the wires between their outlets and inlets. Nodes are positioned
//! automatically with a row/column flow layout unless an absolute position is given,
//! and the finished patch renders to the line-oriented `.pd` text format.
//!
//! ```
//! use puredata_compiler::{Patch, render};
//!
//! let mut patch = Patch::new();
//! let loadbang = patch.obj("loadbang").add()?;
//! let hello = patch.msg("!").inlet(loadbang.outlet(0)).add()?;
//! patch.obj("print Hello world").inlet(hello.outlet(0)).add()?;
//!
//! let text = render(&patch);
//! assert!(text.starts_with("#N canvas 0 50 1000 600 10;\n#X obj 25 25 loadbang;\n"));
//! # Ok::<(), puredata_compiler::PatchError>(())
//! ```
//!
//! Key constraints:
//!
//! - **Append-only**: node indices never change once assigned, so wires are recorded
//!   eagerly as index pairs.
//! - **Patch-scoped handles**: a [`NodeHandle`] is only valid for the patch that created
//!   it; using it elsewhere fails with [`PatchError::ForeignNode`].
//! - **Deterministic output**: rendering an unchanged patch always yields the same text.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod description;
mod foundation;
mod patch;
mod render;
mod text;

pub use description::def::{
    ArrayDef, ConnectDef, FloatAtomDef, NodeDef, NodeKindDef, PatchDef, SubpatchDef,
};
pub use foundation::core::{Footprint, PatchId, Position};
pub use foundation::error::{PatchError, PatchResult};
pub use patch::dsl::{MessageText, NodeBuilder, NodeSpec, ObjectText, SubpatchSource};
pub use patch::graph::{ArrayHandle, Connection, Inlet, NodeHandle, Outlet, Patch};
pub use patch::layout::{COL_MARGIN, FlowState, ORIGIN, Placement, ROW_MARGIN, next_position};
pub use patch::node::{ArrayDecl, Node, NumberBox, Subpatch, TextBox};
pub use render::canvas::{CanvasOpts, RenderOpts, Rendered, render, render_with, write_file};
pub use text::codec::{WRAP_WIDTH, display_lines, escape, escape_symbol, unescape};
