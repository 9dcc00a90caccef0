//! Declarative JSON descriptions of patches.
//!
//! ```json
//! {
//!   "nodes": [
//!     { "id": "lb", "obj": "loadbang" },
//!     { "msg": "pd dsp 1", "inlets": [{ "node": "lb", "outlet": 0 }] },
//!     { "id": "env", "subpatch": { "name": "env", "patch": { "nodes": [] } }, "new_row": 2 }
//!   ],
//!   "connections": [{ "to": "env", "inlets": [null, { "node": "lb" }] }]
//! }
//! ```
//!
//! Inlet entries are free-form so that they can be validated the same way as the
//! builder API: `null` or `[]` skips the inlet, an object names one outlet and an array
//! of objects fans in. Anything else is a malformed connection.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize as _;

use crate::{
    foundation::core::Position,
    foundation::error::{PatchError, PatchResult},
    patch::graph::{Inlet, NodeHandle, Outlet, Patch},
    patch::layout::Placement,
    patch::node::{ArrayDecl, NumberBox},
};

/// A whole patch: nodes in creation order, then extra connections.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct PatchDef {
    /// Nodes in creation order.
    #[serde(default)]
    pub nodes: Vec<NodeDef>,
    /// Connections added after all nodes exist.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub connections: Vec<ConnectDef>,
}

/// One node and its layout directives.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct NodeDef {
    /// Identifier other entries use to reference this node. Scoped to one patch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Node variant and parameters.
    #[serde(flatten)]
    pub kind: NodeKindDef,
    /// Per-inlet sources.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inlets: Vec<serde_json::Value>,
    /// Row directive (default `1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_row: Option<f64>,
    /// Column directive (default `0`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_col: Option<f64>,
    /// Absolute x; used only together with `y`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<i32>,
    /// Absolute y; used only together with `x`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<i32>,
}

/// Node variant keyed by its file-format name.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKindDef {
    /// Object box text.
    Obj(String),
    /// Message box text.
    Msg(String),
    /// Number box.
    Floatatom(FloatAtomDef),
    /// Nested patch.
    Subpatch(SubpatchDef),
    /// Array declaration.
    Array(ArrayDef),
}

/// Number box parameters; every field is optional.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FloatAtomDef {
    /// Width in characters.
    pub width: u32,
    /// Upper clamp.
    pub upper_limit: f64,
    /// Lower clamp.
    pub lower_limit: f64,
    /// Label symbol.
    pub label: String,
    /// Receive symbol.
    pub receive: String,
    /// Send symbol.
    pub send: String,
}

impl Default for FloatAtomDef {
    fn default() -> Self {
        let n = NumberBox::at(Position::default());
        Self {
            width: n.width,
            upper_limit: n.upper_limit,
            lower_limit: n.lower_limit,
            label: n.label,
            receive: n.receive,
            send: n.send,
        }
    }
}

/// Nested patch and its name.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SubpatchDef {
    /// Name shown after `pd`.
    pub name: String,
    /// Nested description.
    #[serde(default)]
    pub patch: PatchDef,
}

/// Array declaration.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ArrayDef {
    /// Array name.
    pub name: String,
    /// Element count.
    pub length: usize,
    /// Element type tag.
    #[serde(default = "default_element_type")]
    pub element_type: String,
    /// Save contents with the patch.
    #[serde(default)]
    pub save: bool,
}

fn default_element_type() -> String {
    "float".to_string()
}

/// Extra wiring into an existing node.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ConnectDef {
    /// Id of the sink node.
    pub to: String,
    /// Per-inlet sources.
    pub inlets: Vec<serde_json::Value>,
}

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct OutletRef {
    node: String,
    #[serde(default)]
    outlet: u8,
}

// Arrays keep their id reserved but cannot be wired.
type Scope = BTreeMap<String, Option<NodeHandle>>;

impl PatchDef {
    /// Parse a description from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> PatchResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| PatchError::description(format!("parse patch JSON: {e}")))
    }

    /// Parse a description from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> PatchResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PatchError::description(format!("open patch JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Build the described patch, recursing into subpatches.
    #[tracing::instrument(skip_all, fields(nodes = self.nodes.len()))]
    pub fn build(&self) -> PatchResult<Patch> {
        let mut patch = Patch::new();
        let mut scope = Scope::new();

        for (pos, def) in self.nodes.iter().enumerate() {
            if let Some(id) = &def.id {
                if scope.contains_key(id) {
                    return Err(PatchError::description(format!(
                        "node {pos}: duplicate id '{id}'"
                    )));
                }
            }

            let handle = match &def.kind {
                NodeKindDef::Array(a) => {
                    if !def.inlets.is_empty() {
                        return Err(PatchError::malformed(format!(
                            "node {pos}: array '{}' has no inlets",
                            a.name
                        )));
                    }
                    patch.create_array_decl(ArrayDecl {
                        name: a.name.clone(),
                        length: a.length,
                        element_type: a.element_type.clone(),
                        save_contents: a.save,
                    });
                    None
                }
                NodeKindDef::Obj(text) => Some(patch.create_object(
                    text,
                    parse_inlets(&def.inlets, &scope)?,
                    def.placement(),
                )?),
                NodeKindDef::Msg(text) => Some(patch.create_message(
                    text,
                    parse_inlets(&def.inlets, &scope)?,
                    def.placement(),
                )?),
                NodeKindDef::Floatatom(n) => Some(patch.create_number_box(
                    n.to_number_box(),
                    parse_inlets(&def.inlets, &scope)?,
                    def.placement(),
                )?),
                NodeKindDef::Subpatch(s) => {
                    let nested = s.patch.build()?;
                    Some(patch.create_subpatch(
                        &s.name,
                        nested,
                        parse_inlets(&def.inlets, &scope)?,
                        def.placement(),
                    )?)
                }
            };

            if let Some(id) = &def.id {
                scope.insert(id.clone(), handle);
            }
        }

        for c in &self.connections {
            let sink = lookup(&scope, &c.to)?;
            let inlets = parse_inlets(&c.inlets, &scope)?;
            patch.connect(sink, inlets)?;
        }

        Ok(patch)
    }
}

impl NodeDef {
    /// Layout directive described by this entry.
    pub fn placement(&self) -> Placement {
        let defaults = Placement::default();
        Placement {
            new_row: self.new_row.unwrap_or(defaults.new_row),
            new_col: self.new_col.unwrap_or(defaults.new_col),
            absolute: match (self.x, self.y) {
                (Some(x), Some(y)) => Some(Position::new(x, y)),
                _ => None,
            },
        }
    }
}

impl FloatAtomDef {
    fn to_number_box(&self) -> NumberBox {
        NumberBox {
            position: Position::default(),
            width: self.width,
            upper_limit: self.upper_limit,
            lower_limit: self.lower_limit,
            label: self.label.clone(),
            receive: self.receive.clone(),
            send: self.send.clone(),
        }
    }
}

fn lookup(scope: &Scope, id: &str) -> PatchResult<NodeHandle> {
    match scope.get(id) {
        Some(Some(handle)) => Ok(*handle),
        Some(None) => Err(PatchError::malformed(format!(
            "'{id}' is an array and has no ports"
        ))),
        None => Err(PatchError::description(format!("unknown node id '{id}'"))),
    }
}

fn parse_inlets(values: &[serde_json::Value], scope: &Scope) -> PatchResult<Vec<Inlet>> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| parse_inlet(i, v, scope))
        .collect()
}

fn parse_inlet(inlet: usize, value: &serde_json::Value, scope: &Scope) -> PatchResult<Inlet> {
    use serde_json::Value;

    match value {
        Value::Null => Ok(Inlet::none()),
        Value::Object(_) => Ok(Inlet::from(parse_outlet(inlet, value, scope)?)),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Object(_) => parse_outlet(inlet, item, scope),
                other => Err(PatchError::malformed(format!(
                    "inlet {inlet}: expected an outlet object in list, got {other}"
                ))),
            })
            .collect::<PatchResult<Vec<_>>>()
            .map(Inlet::Outlets),
        // A bare id names a node, not one of its outlets; the patch rejects it.
        Value::String(id) if scope.contains_key(id) => Ok(Inlet::Node(lookup(scope, id)?)),
        other => Err(PatchError::malformed(format!(
            "inlet {inlet}: expected an outlet object or a list of them, got {other}"
        ))),
    }
}

fn parse_outlet(inlet: usize, value: &serde_json::Value, scope: &Scope) -> PatchResult<Outlet> {
    let r = OutletRef::deserialize(value)
        .map_err(|e| PatchError::malformed(format!("inlet {inlet}: {e}")))?;
    Ok(lookup(scope, &r.node)?.outlet(r.outlet))
}

#[cfg(test)]
#[path = "../../tests/unit/description/def.rs"]
mod tests;
