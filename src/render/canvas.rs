use std::fmt;
use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::error::PatchResult,
    patch::graph::{Connection, Patch},
    patch::node::Node,
    text::codec::escape_symbol,
};

/// Window geometry written into a `#N canvas` header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CanvasOpts {
    /// Window x offset on screen.
    pub x: i32,
    /// Window y offset on screen.
    pub y: i32,
    /// Window width.
    pub width: u32,
    /// Window height.
    pub height: u32,
}

/// Header parameters for rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderOpts {
    /// Top-level window geometry.
    pub root: CanvasOpts,
    /// Top-level font size.
    pub font_size: u32,
    /// Geometry of every subpatch window.
    pub subpatch: CanvasOpts,
    /// Whether subpatch windows open on load.
    pub subpatch_open: bool,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            root: CanvasOpts {
                x: 0,
                y: 50,
                width: 1000,
                height: 600,
            },
            font_size: 10,
            subpatch: CanvasOpts {
                x: 0,
                y: 0,
                width: 300,
                height: 180,
            },
            subpatch_open: false,
        }
    }
}

/// A patch paired with header options; its `Display` output is the file text.
pub struct Rendered<'a> {
    patch: &'a Patch,
    opts: &'a RenderOpts,
}

impl<'a> Rendered<'a> {
    /// Pair `patch` with `opts`.
    pub fn new(patch: &'a Patch, opts: &'a RenderOpts) -> Self {
        Self { patch, opts }
    }
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.opts.root;
        writeln!(
            f,
            "#N canvas {} {} {} {} {};",
            c.x, c.y, c.width, c.height, self.opts.font_size
        )?;
        write_body(f, self.patch, self.opts)
    }
}

impl fmt::Display for Patch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Rendered::new(self, &RenderOpts::default()).fmt(f)
    }
}

/// Render `patch` with default headers.
pub fn render(patch: &Patch) -> String {
    render_with(patch, &RenderOpts::default())
}

/// Render `patch` into the line-oriented `.pd` text format.
///
/// All nodes come first in creation order, then all connections; subpatches nest
/// recursively. Every line ends with `;` and a newline.
#[tracing::instrument(skip_all, fields(nodes = patch.nodes().len(), connections = patch.connections().len()))]
pub fn render_with(patch: &Patch, opts: &RenderOpts) -> String {
    Rendered::new(patch, opts).to_string()
}

/// Write rendered text to `path`, creating parent directories as needed.
pub fn write_file(path: impl AsRef<Path>, text: &str) -> PatchResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, text).with_context(|| format!("write patch '{}'", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "wrote patch");
    Ok(())
}

fn write_body(f: &mut fmt::Formatter<'_>, patch: &Patch, opts: &RenderOpts) -> fmt::Result {
    for node in patch.nodes() {
        write_node(f, node, opts)?;
    }
    for c in patch.connections() {
        write_connection(f, c)?;
    }
    Ok(())
}

fn write_node(f: &mut fmt::Formatter<'_>, node: &Node, opts: &RenderOpts) -> fmt::Result {
    match node {
        Node::Object(b) => writeln!(f, "#X obj {} {} {};", b.position.x, b.position.y, b.text()),
        Node::Message(b) => writeln!(f, "#X msg {} {} {};", b.position.x, b.position.y, b.text()),
        Node::NumberBox(n) => writeln!(
            f,
            "#X floatatom {} {} {} {} {} {} {} {};",
            n.position.x,
            n.position.y,
            n.width,
            n.upper_limit,
            n.lower_limit,
            escape_symbol(&n.label),
            escape_symbol(&n.receive),
            escape_symbol(&n.send)
        ),
        Node::Subpatch(s) => {
            let c = opts.subpatch;
            writeln!(
                f,
                "#N canvas {} {} {} {} (subpatch) {};",
                c.x,
                c.y,
                c.width,
                c.height,
                u8::from(opts.subpatch_open)
            )?;
            write_body(f, &s.patch, opts)?;
            writeln!(
                f,
                "#X restore {} {} pd {};",
                s.position.x,
                s.position.y,
                escape_symbol(&s.name)
            )
        }
        Node::Array(a) => writeln!(
            f,
            "#X array {} {} {} {};",
            escape_symbol(&a.name),
            a.length,
            escape_symbol(&a.element_type),
            u8::from(a.save_contents)
        ),
    }
}

fn write_connection(f: &mut fmt::Formatter<'_>, c: &Connection) -> fmt::Result {
    writeln!(
        f,
        "#X connect {} {} {} {};",
        c.source, c.outlet, c.sink, c.inlet
    )
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
