use crate::{
    foundation::core::Position,
    foundation::error::PatchResult,
    patch::graph::{Inlet, NodeHandle, Patch},
    patch::layout::Placement,
    patch::node::NumberBox,
};

/// Node payload a [`NodeBuilder`] knows how to create.
pub trait NodeSpec {
    /// Create the node in `patch` through the matching `create_*` operation.
    fn create(
        self,
        patch: &mut Patch,
        inlets: Vec<Inlet>,
        placement: Placement,
    ) -> PatchResult<NodeHandle>;
}

/// Payload for `#X obj` boxes.
#[derive(Clone, Debug)]
pub struct ObjectText(pub String);

/// Payload for `#X msg` boxes.
#[derive(Clone, Debug)]
pub struct MessageText(pub String);

/// Payload for subpatches.
#[derive(Clone, Debug)]
pub struct SubpatchSource {
    /// Name shown after `pd`.
    pub name: String,
    /// Nested patch.
    pub patch: Patch,
}

impl NodeSpec for ObjectText {
    fn create(
        self,
        patch: &mut Patch,
        inlets: Vec<Inlet>,
        placement: Placement,
    ) -> PatchResult<NodeHandle> {
        patch.create_object(&self.0, inlets, placement)
    }
}

impl NodeSpec for MessageText {
    fn create(
        self,
        patch: &mut Patch,
        inlets: Vec<Inlet>,
        placement: Placement,
    ) -> PatchResult<NodeHandle> {
        patch.create_message(&self.0, inlets, placement)
    }
}

impl NodeSpec for NumberBox {
    fn create(
        self,
        patch: &mut Patch,
        inlets: Vec<Inlet>,
        placement: Placement,
    ) -> PatchResult<NodeHandle> {
        patch.create_number_box(self, inlets, placement)
    }
}

impl NodeSpec for SubpatchSource {
    fn create(
        self,
        patch: &mut Patch,
        inlets: Vec<Inlet>,
        placement: Placement,
    ) -> PatchResult<NodeHandle> {
        patch.create_subpatch(&self.name, self.patch, inlets, placement)
    }
}

/// Fluent builder for one node. Nothing is added to the patch until [`NodeBuilder::add`].
#[must_use = "call `.add()` to insert the node"]
pub struct NodeBuilder<'p, K> {
    patch: &'p mut Patch,
    spec: K,
    inlets: Vec<Inlet>,
    placement: Placement,
}

impl<'p, K: NodeSpec> NodeBuilder<'p, K> {
    fn new(patch: &'p mut Patch, spec: K) -> Self {
        Self {
            patch,
            spec,
            inlets: Vec::new(),
            placement: Placement::default(),
        }
    }

    /// Feed the next inlet from one outlet or a list of outlets.
    pub fn inlet(mut self, source: impl Into<Inlet>) -> Self {
        self.inlets.push(source.into());
        self
    }

    /// Leave the next inlet unconnected.
    pub fn skip_inlet(mut self) -> Self {
        self.inlets.push(Inlet::none());
        self
    }

    /// Continue the current row.
    pub fn same_row(mut self) -> Self {
        self.placement.new_row = 0.0;
        self
    }

    /// Set the row directive.
    pub fn new_row(mut self, rows: f64) -> Self {
        self.placement.new_row = rows;
        self
    }

    /// Set the column directive.
    pub fn new_col(mut self, cols: f64) -> Self {
        self.placement.new_col = cols;
        self
    }

    /// Place at an absolute position.
    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.placement.absolute = Some(Position::new(x, y));
        self
    }

    /// Replace the whole layout directive.
    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Insert the node and record its connections.
    pub fn add(self) -> PatchResult<NodeHandle> {
        self.spec.create(self.patch, self.inlets, self.placement)
    }
}

impl NodeBuilder<'_, NumberBox> {
    /// Width in characters.
    pub fn width(mut self, width: u32) -> Self {
        self.spec.width = width;
        self
    }

    /// Lower and upper clamp.
    pub fn limits(mut self, lower: f64, upper: f64) -> Self {
        self.spec.lower_limit = lower;
        self.spec.upper_limit = upper;
        self
    }

    /// Label symbol.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.spec.label = label.into();
        self
    }

    /// Receive symbol.
    pub fn receive(mut self, name: impl Into<String>) -> Self {
        self.spec.receive = name.into();
        self
    }

    /// Send symbol.
    pub fn send(mut self, name: impl Into<String>) -> Self {
        self.spec.send = name.into();
        self
    }
}

impl Patch {
    /// Start building an object box.
    pub fn obj(&mut self, text: impl Into<String>) -> NodeBuilder<'_, ObjectText> {
        NodeBuilder::new(self, ObjectText(text.into()))
    }

    /// Start building a message box.
    pub fn msg(&mut self, text: impl Into<String>) -> NodeBuilder<'_, MessageText> {
        NodeBuilder::new(self, MessageText(text.into()))
    }

    /// Start building a number box with default parameters.
    pub fn floatatom(&mut self) -> NodeBuilder<'_, NumberBox> {
        NodeBuilder::new(self, NumberBox::at(Position::default()))
    }

    /// Start building a subpatch wrapping `patch`.
    pub fn subpatch(
        &mut self,
        name: impl Into<String>,
        patch: Patch,
    ) -> NodeBuilder<'_, SubpatchSource> {
        NodeBuilder::new(
            self,
            SubpatchSource {
                name: name.into(),
                patch,
            },
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/patch/dsl.rs"]
mod tests;
