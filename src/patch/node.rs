use crate::{
    foundation::core::{Footprint, Position},
    patch::graph::Patch,
    text::codec::{display_lines, escape},
};

/// One placed element of a patch.
#[derive(Clone, Debug)]
pub enum Node {
    /// `#X obj`: a primitive or abstraction instance.
    Object(TextBox),
    /// `#X msg`: a clickable message box.
    Message(TextBox),
    /// `#X floatatom`: a number box.
    NumberBox(NumberBox),
    /// `#N canvas ... #X restore`: an inline subpatch.
    Subpatch(Subpatch),
    /// `#X array`: a hidden array declaration.
    Array(ArrayDecl),
}

/// Text-bearing box shared by objects and messages.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBox {
    /// Top-left corner on the owning canvas.
    pub position: Position,
    text: String, // escaped
}

impl TextBox {
    /// Create a box at `position`, escaping `text` for storage.
    pub fn new(position: Position, text: &str) -> Self {
        Self {
            position,
            text: escape(text),
        }
    }

    /// Stored (escaped) text, exactly as it is written to the file.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Size estimate from the wrapped display lines.
    pub fn footprint(&self) -> Footprint {
        let lines = display_lines(&self.text);
        let max_chars = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let line_count = i32::try_from(lines.len()).unwrap_or(i32::MAX);
        Footprint::new(
            char_width(max_chars),
            10_i32.saturating_add(line_count.saturating_mul(15)),
        )
    }
}

/// Number box parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct NumberBox {
    /// Top-left corner on the owning canvas.
    pub position: Position,
    /// Width in characters.
    pub width: u32,
    /// Upper clamp; `0` together with a `0` lower limit means unbounded.
    pub upper_limit: f64,
    /// Lower clamp.
    pub lower_limit: f64,
    /// Label symbol, `-` for none.
    pub label: String,
    /// Receive symbol, `-` for none.
    pub receive: String,
    /// Send symbol, `-` for none.
    pub send: String,
}

impl NumberBox {
    /// Fixed on-canvas size of every number box.
    pub const FOOTPRINT: Footprint = Footprint::new(50, 25);

    /// Default number box at `position`.
    pub fn at(position: Position) -> Self {
        Self {
            position,
            width: 5,
            upper_limit: 0.0,
            lower_limit: 0.0,
            label: "-".to_string(),
            receive: "-".to_string(),
            send: "-".to_string(),
        }
    }
}

/// Inline subpatch owning its own nested patch.
#[derive(Clone, Debug)]
pub struct Subpatch {
    /// Position of the `pd <name>` box on the parent canvas.
    pub position: Position,
    /// Subpatch name shown after `pd`.
    pub name: String,
    /// Nested patch, laid out in its own coordinate space.
    pub patch: Patch,
}

impl Subpatch {
    /// Size of the `pd <name>` box.
    pub fn footprint(&self) -> Footprint {
        let chars = "pd ".len() + self.name.chars().count();
        Footprint::new(char_width(chars), 25)
    }
}

/// Array declaration. Arrays are hidden: they have no box and never join flow layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayDecl {
    /// Array (table) name.
    pub name: String,
    /// Number of elements.
    pub length: usize,
    /// Element type tag.
    pub element_type: String,
    /// Whether contents are saved with the patch.
    pub save_contents: bool,
}

impl ArrayDecl {
    /// Float array with contents not saved.
    pub fn new(name: impl Into<String>, length: usize) -> Self {
        Self {
            name: name.into(),
            length,
            element_type: "float".to_string(),
            save_contents: false,
        }
    }
}

impl Node {
    /// Hidden nodes report [`Position::OFF_CANVAS`] and a zero footprint.
    pub fn is_hidden(&self) -> bool {
        matches!(self, Node::Array(_))
    }

    /// Position used by flow layout.
    pub fn position(&self) -> Position {
        match self {
            Node::Object(b) | Node::Message(b) => b.position,
            Node::NumberBox(n) => n.position,
            Node::Subpatch(s) => s.position,
            Node::Array(_) => Position::OFF_CANVAS,
        }
    }

    /// Estimated on-canvas size.
    pub fn footprint(&self) -> Footprint {
        match self {
            Node::Object(b) | Node::Message(b) => b.footprint(),
            Node::NumberBox(_) => NumberBox::FOOTPRINT,
            Node::Subpatch(s) => s.footprint(),
            Node::Array(_) => Footprint::ZERO,
        }
    }

    /// Short variant name for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Object(_) => "obj",
            Node::Message(_) => "msg",
            Node::NumberBox(_) => "floatatom",
            Node::Subpatch(_) => "subpatch",
            Node::Array(_) => "array",
        }
    }
}

// 6 units per character plus 20 of padding, never narrower than 50.
fn char_width(chars: usize) -> i32 {
    let chars = i32::try_from(chars).unwrap_or(i32::MAX);
    chars.saturating_mul(6).saturating_add(20).max(50)
}

#[cfg(test)]
#[path = "../../tests/unit/patch/node.rs"]
mod tests;
