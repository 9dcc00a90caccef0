use crate::{
    foundation::core::{PatchId, Position},
    foundation::error::{PatchError, PatchResult},
    patch::layout::{FlowState, Placement},
    patch::node::{ArrayDecl, Node, NumberBox, Subpatch, TextBox},
};

/// Handle to a node, valid only for the [`Patch`] that created it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    patch: PatchId,
    index: usize,
}

impl NodeHandle {
    /// Select an outlet of this node. Outlet counts are not modelled, so any index is
    /// accepted.
    pub fn outlet(self, index: u8) -> Outlet {
        Outlet { node: self, index }
    }

    /// Index of the node in its patch, as written in `#X connect` lines.
    pub fn index(self) -> usize {
        self.index
    }

    /// Tag of the patch that issued this handle.
    pub fn patch_id(self) -> PatchId {
        self.patch
    }
}

/// Handle to an array declaration. Arrays cannot be wired.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ArrayHandle {
    patch: PatchId,
    index: usize,
}

impl ArrayHandle {
    /// Index of the array in its patch.
    pub fn index(self) -> usize {
        self.index
    }

    /// Tag of the patch that issued this handle.
    pub fn patch_id(self) -> PatchId {
        self.patch
    }
}

/// One outlet of a node, used as a connection source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Outlet {
    /// Owning node.
    pub node: NodeHandle,
    /// Outlet number.
    pub index: u8,
}

/// What feeds one inlet of a node being created or connected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Inlet {
    /// Zero (inlet left unconnected), one, or several (fan-in) outlets.
    Outlets(Vec<Outlet>),
    /// A node given where an outlet was required. Always rejected.
    Node(NodeHandle),
}

impl Inlet {
    /// Leave this inlet unconnected.
    pub fn none() -> Self {
        Inlet::Outlets(Vec::new())
    }
}

impl From<Outlet> for Inlet {
    fn from(o: Outlet) -> Self {
        Inlet::Outlets(vec![o])
    }
}

impl From<Vec<Outlet>> for Inlet {
    fn from(v: Vec<Outlet>) -> Self {
        Inlet::Outlets(v)
    }
}

impl From<&[Outlet]> for Inlet {
    fn from(v: &[Outlet]) -> Self {
        Inlet::Outlets(v.to_vec())
    }
}

impl<const N: usize> From<[Outlet; N]> for Inlet {
    fn from(v: [Outlet; N]) -> Self {
        Inlet::Outlets(v.to_vec())
    }
}

impl From<NodeHandle> for Inlet {
    fn from(n: NodeHandle) -> Self {
        Inlet::Node(n)
    }
}

/// A wire from `(source, outlet)` to `(sink, inlet)`, by node index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Connection {
    /// Source node index.
    pub source: usize,
    /// Source outlet number.
    pub outlet: u8,
    /// Sink node index.
    pub sink: usize,
    /// Sink inlet number.
    pub inlet: usize,
}

/// A patch: ordered nodes, ordered connections and flow-layout anchors.
///
/// Nodes are only ever appended, so the index assigned at creation is stable and is
/// the identity used in connections and in the rendered file.
///
/// Cloning yields a new patch with its own id: handles issued before the clone keep
/// pointing at the original only.
#[derive(Debug)]
pub struct Patch {
    id: PatchId,
    nodes: Vec<Node>,
    connections: Vec<Connection>,
    flow: FlowState,
}

impl Clone for Patch {
    fn clone(&self) -> Self {
        Self {
            id: PatchId::next(),
            nodes: self.nodes.clone(),
            connections: self.connections.clone(),
            flow: self.flow,
        }
    }
}

impl Default for Patch {
    fn default() -> Self {
        Self::new()
    }
}

impl Patch {
    /// Create an empty patch.
    pub fn new() -> Self {
        Self {
            id: PatchId::next(),
            nodes: Vec::new(),
            connections: Vec::new(),
            flow: FlowState::default(),
        }
    }

    /// Tag carried by every handle this patch issues.
    pub fn id(&self) -> PatchId {
        self.id
    }

    /// Nodes in creation order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Connections in creation order.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Current flow anchors.
    pub fn flow(&self) -> FlowState {
        self.flow
    }

    /// Look up a node by handle.
    pub fn node(&self, handle: NodeHandle) -> PatchResult<&Node> {
        self.check_handle(handle)?;
        Ok(&self.nodes[handle.index])
    }

    /// Create an object box.
    pub fn create_object(
        &mut self,
        text: &str,
        inlets: Vec<Inlet>,
        placement: Placement,
    ) -> PatchResult<NodeHandle> {
        self.place(inlets, placement, |position| {
            Node::Object(TextBox::new(position, text))
        })
    }

    /// Create a message box.
    pub fn create_message(
        &mut self,
        text: &str,
        inlets: Vec<Inlet>,
        placement: Placement,
    ) -> PatchResult<NodeHandle> {
        self.place(inlets, placement, |position| {
            Node::Message(TextBox::new(position, text))
        })
    }

    /// Create a number box. `params.position` is ignored and replaced by the resolved
    /// placement.
    pub fn create_number_box(
        &mut self,
        params: NumberBox,
        inlets: Vec<Inlet>,
        placement: Placement,
    ) -> PatchResult<NodeHandle> {
        self.place(inlets, placement, |position| {
            Node::NumberBox(NumberBox { position, ..params })
        })
    }

    /// Insert `patch` as a named subpatch. The nested patch keeps its own coordinates.
    pub fn create_subpatch(
        &mut self,
        name: &str,
        patch: Patch,
        inlets: Vec<Inlet>,
        placement: Placement,
    ) -> PatchResult<NodeHandle> {
        self.place(inlets, placement, |position| {
            Node::Subpatch(Subpatch {
                position,
                name: name.to_string(),
                patch,
            })
        })
    }

    /// Declare a float array. Arrays take no part in flow layout and have no ports.
    pub fn create_array(&mut self, name: &str, length: usize) -> ArrayHandle {
        self.create_array_decl(ArrayDecl::new(name, length))
    }

    /// Declare an array with explicit element type and save flag.
    pub fn create_array_decl(&mut self, decl: ArrayDecl) -> ArrayHandle {
        let index = self.nodes.len();
        tracing::debug!(patch = %self.id, index, name = %decl.name, "declared array");
        self.nodes.push(Node::Array(decl));
        ArrayHandle {
            patch: self.id,
            index,
        }
    }

    /// Wire outlets into the inlets of an existing node. The `i`-th entry of `inlets`
    /// feeds inlet `i`; empty entries are skipped.
    ///
    /// All entries are validated before any connection is recorded.
    pub fn connect(&mut self, node: NodeHandle, inlets: Vec<Inlet>) -> PatchResult<()> {
        self.check_handle(node)?;
        let wires = self.resolve_inlets(node.index, &inlets)?;
        self.record(wires);
        Ok(())
    }

    fn place(
        &mut self,
        inlets: Vec<Inlet>,
        placement: Placement,
        make: impl FnOnce(Position) -> Node,
    ) -> PatchResult<NodeHandle> {
        let index = self.nodes.len();
        let wires = self.resolve_inlets(index, &inlets)?;

        let resolved = self.flow.resolve(&self.nodes, &placement);
        let node = make(resolved.position);
        tracing::debug!(
            patch = %self.id,
            index,
            kind = node.kind_name(),
            x = resolved.position.x,
            y = resolved.position.y,
            absolute = resolved.absolute,
            "placed node"
        );
        self.nodes.push(node);
        self.record(wires);
        self.flow.commit(index, &placement, resolved.absolute);

        Ok(NodeHandle {
            patch: self.id,
            index,
        })
    }

    fn resolve_inlets(&self, sink: usize, inlets: &[Inlet]) -> PatchResult<Vec<Connection>> {
        let mut wires = Vec::new();
        for (inlet, entry) in inlets.iter().enumerate() {
            let outlets = match entry {
                Inlet::Outlets(outlets) => outlets,
                Inlet::Node(n) => {
                    return Err(PatchError::malformed(format!(
                        "inlet {inlet}: node {} given where an outlet was expected \
                         (select one with `.outlet(n)`)",
                        n.index
                    )));
                }
            };
            for o in outlets {
                self.check_handle(o.node)?;
                wires.push(Connection {
                    source: o.node.index,
                    outlet: o.index,
                    sink,
                    inlet,
                });
            }
        }
        Ok(wires)
    }

    fn record(&mut self, wires: Vec<Connection>) {
        for c in &wires {
            tracing::debug!(
                patch = %self.id,
                source = c.source,
                outlet = c.outlet,
                sink = c.sink,
                inlet = c.inlet,
                "connected"
            );
        }
        self.connections.extend(wires);
    }

    fn check_handle(&self, handle: NodeHandle) -> PatchResult<()> {
        if handle.patch != self.id {
            return Err(PatchError::foreign(format!(
                "node {} belongs to {}, not {}",
                handle.index, handle.patch, self.id
            )));
        }
        if handle.index >= self.nodes.len() {
            return Err(PatchError::foreign(format!(
                "node {} is out of range for {} ({} nodes)",
                handle.index,
                self.id,
                self.nodes.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/patch/graph.rs"]
mod tests;
