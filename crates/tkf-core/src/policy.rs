//! Property policy: how each configurable attribute is presented.
//!
//! Properties are either hidden (never shown), colour-valued (offer a
//! colour picker), enumerated (offer a suggestion list) or free text. The
//! same classification applies to layout options, where only the synthetic
//! `in` option is hidden.

use serde::Serialize;

// ─── Tables ──────────────────────────────────────────────────────────────

/// Aliases and low-value attributes that never surface in the inspector.
const HIDDEN_PROPERTIES: &[&str] = &[
    "background",
    "foreground",
    "class",
    "visual",
    "borderwidth",
    "highlightcolor",
];

/// Tk option aliases and the declared option they stand for.
const PROPERTY_ALIASES: &[(&str, &str)] = &[
    ("background", "bg"),
    ("foreground", "fg"),
    ("borderwidth", "bd"),
];

const COLOR_PROPERTIES: &[&str] = &[
    "bg",
    "fg",
    "highlightbackground",
    "highlightcolor",
    "activebackground",
    "activeforeground",
    "disabledforeground",
    "selectbackground",
    "selectforeground",
    "inactiveselectbackground",
    "troughcolor",
    "insertbackground",
    "selectcolor",
    "readonlybackground",
    "buttonbackground",
    "disabledbackground",
];

/// The layout option naming the container a widget is placed in.
/// Redundant with the tree edge.
const HIDDEN_LAYOUT_OPTIONS: &[&str] = &["in"];

const RELIEF: &[&str] = &["", "flat", "raised", "sunken", "groove", "ridge", "solid"];
const ANCHOR: &[&str] = &["", "n", "ne", "e", "se", "s", "sw", "w", "nw", "center"];
const JUSTIFY: &[&str] = &["", "left", "center", "right"];
const SIDE: &[&str] = &["", "top", "bottom", "left", "right"];
const ORIENT: &[&str] = &["", "horizontal", "vertical"];
const WRAP: &[&str] = &["", "none", "char", "word"];
const FILL: &[&str] = &["", "none", "x", "y", "both"];
const STYLE: &[&str] = &[
    "",
    "TButton",
    "TCombobox",
    "TFrame",
    "TLabel",
    "TLabelframe",
    "TNotebook",
    "TPanedwindow",
    "Horizontal.TProgressbar",
    "Vertical.TProgressbar",
    "TSeparator",
    "TSizegrip",
    "Treeview",
];
const MODE: &[&str] = &["", "determinate", "indeterminate"];
const STATE: &[&str] = &["", "normal", "active", "disabled", "readonly"];
const SELECTMODE: &[&str] = &["", "browse", "single", "multiple", "extended", "none"];
const COMPOUND: &[&str] = &["", "none", "top", "bottom", "left", "right", "center"];
const BORDERMODE: &[&str] = &["", "inside", "outside", "ignore"];
const VALIDATE: &[&str] = &["", "none", "focus", "focusin", "focusout", "key", "all"];

// ─── Classification ──────────────────────────────────────────────────────

/// True for properties that must never be shown in the inspector.
pub fn is_hidden(property: &str) -> bool {
    HIDDEN_PROPERTIES.contains(&property)
}

/// Resolve a Tk alias (`background`) to the option the schema declares (`bg`).
pub fn canonical_property(property: &str) -> &str {
    PROPERTY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == property)
        .map_or(property, |(_, canonical)| canonical)
}

/// True for properties whose value is a colour.
pub fn is_color(property: &str) -> bool {
    COLOR_PROPERTIES.contains(&canonical_property(property))
}

/// The suggestion list for an enumerated property or layout option.
///
/// The first entry is always `""` (unset). The list is advisory: any text is
/// still accepted by the model.
pub fn enumerated_choices(name: &str) -> Option<&'static [&'static str]> {
    let choices = match name {
        "relief" | "overrelief" => RELIEF,
        "anchor" | "labelanchor" => ANCHOR,
        "justify" => JUSTIFY,
        "side" => SIDE,
        "orient" => ORIENT,
        "wrap" => WRAP,
        "fill" => FILL,
        "style" => STYLE,
        "mode" => MODE,
        "state" => STATE,
        "selectmode" => SELECTMODE,
        "compound" => COMPOUND,
        "bordermode" => BORDERMODE,
        "validate" => VALIDATE,
        _ => return None,
    };
    Some(choices)
}

/// True only for the synthetic container-reference layout option.
pub fn is_hidden_layout_option(option: &str) -> bool {
    HIDDEN_LAYOUT_OPTIONS.contains(&option)
}

/// The editing affordance for one inspector field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldEditor {
    /// Plain text entry, committed on focus loss.
    Text,
    /// Text entry with a fixed suggestion list.
    Choice(&'static [&'static str]),
    /// Text entry that can open a colour picker.
    Color,
}

/// Pick the editor for a property or layout option by name.
pub fn field_editor(name: &str) -> FieldEditor {
    if is_color(name) {
        FieldEditor::Color
    } else if let Some(choices) = enumerated_choices(name) {
        FieldEditor::Choice(choices)
    } else {
        FieldEditor::Text
    }
}

// ─── Colors ──────────────────────────────────────────────────────────────

/// An 8-bit RGB colour as Tk understands it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Helper to parse a single hex digit.
fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a Tk hex colour: `#RGB`, `#RRGGBB` or `#RRRRGGGGBBBB`.
    /// Named colours (`red`, `SystemButtonFace`) are not hex and return `None`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let bytes = hex.strip_prefix('#')?.as_bytes();

        match bytes.len() {
            3 => Some(Self::rgb(
                hex_val(bytes[0])? * 17,
                hex_val(bytes[1])? * 17,
                hex_val(bytes[2])? * 17,
            )),
            6 => Some(Self::rgb(
                hex_val(bytes[0])? << 4 | hex_val(bytes[1])?,
                hex_val(bytes[2])? << 4 | hex_val(bytes[3])?,
                hex_val(bytes[4])? << 4 | hex_val(bytes[5])?,
            )),
            // 16 bits per channel; keep the high byte.
            12 => Some(Self::rgb(
                hex_val(bytes[0])? << 4 | hex_val(bytes[1])?,
                hex_val(bytes[4])? << 4 | hex_val(bytes[5])?,
                hex_val(bytes[8])? << 4 | hex_val(bytes[9])?,
            )),
            _ => None,
        }
    }

    /// Emit as `#rrggbb`, the form Tk's colour chooser returns.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Normalise a colour value coming back from a picker.
/// Hex forms collapse to `#rrggbb`; anything else is kept as typed.
pub fn normalize_color(value: &str) -> String {
    let trimmed = value.trim();
    Color::from_hex(trimmed).map_or_else(|| trimmed.to_string(), |c| c.to_hex())
}
