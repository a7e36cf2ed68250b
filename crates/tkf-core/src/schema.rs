//! Static widget schema: the options each kind declares, with the value a
//! freshly constructed widget reports, and the option set of each geometry
//! manager after its zero placement.
//!
//! Values follow Tk 8.6 on X11. Everything is a string because that is what
//! `cget` and `*_info()` return, and what generated code passes back.

use crate::registry::WidgetKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// One declared option and its default value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec {
    pub name: &'static str,
    pub default: &'static str,
}

type Group = &'static [(&'static str, &'static str)];

// ─── Layout strategies ───────────────────────────────────────────────────

/// The geometry manager a widget is placed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayoutStrategy {
    /// Explicit coordinates (`place`).
    Absolute,
    /// Row/column cells (`grid`).
    Grid,
    /// Sequential side-based packing (`pack`).
    Flow,
}

const PLACE_OPTIONS: &[OptionSpec] = &[
    OptionSpec { name: "in", default: "" },
    OptionSpec { name: "x", default: "0" },
    OptionSpec { name: "relx", default: "0" },
    OptionSpec { name: "y", default: "0" },
    OptionSpec { name: "rely", default: "0" },
    OptionSpec { name: "width", default: "" },
    OptionSpec { name: "relwidth", default: "" },
    OptionSpec { name: "height", default: "" },
    OptionSpec { name: "relheight", default: "" },
    OptionSpec { name: "anchor", default: "nw" },
    OptionSpec { name: "bordermode", default: "inside" },
];

const GRID_OPTIONS: &[OptionSpec] = &[
    OptionSpec { name: "in", default: "" },
    OptionSpec { name: "column", default: "0" },
    OptionSpec { name: "row", default: "0" },
    OptionSpec { name: "columnspan", default: "1" },
    OptionSpec { name: "rowspan", default: "1" },
    OptionSpec { name: "ipadx", default: "0" },
    OptionSpec { name: "ipady", default: "0" },
    OptionSpec { name: "padx", default: "0" },
    OptionSpec { name: "pady", default: "0" },
    OptionSpec { name: "sticky", default: "" },
];

const PACK_OPTIONS: &[OptionSpec] = &[
    OptionSpec { name: "in", default: "" },
    OptionSpec { name: "anchor", default: "center" },
    OptionSpec { name: "expand", default: "0" },
    OptionSpec { name: "fill", default: "none" },
    OptionSpec { name: "ipadx", default: "0" },
    OptionSpec { name: "ipady", default: "0" },
    OptionSpec { name: "padx", default: "0" },
    OptionSpec { name: "pady", default: "0" },
    OptionSpec { name: "side", default: "top" },
];

impl LayoutStrategy {
    pub const ALL: [LayoutStrategy; 3] = [
        LayoutStrategy::Absolute,
        LayoutStrategy::Grid,
        LayoutStrategy::Flow,
    ];

    /// The Tk geometry manager command.
    pub const fn manager(self) -> &'static str {
        match self {
            LayoutStrategy::Absolute => "place",
            LayoutStrategy::Grid => "grid",
            LayoutStrategy::Flow => "pack",
        }
    }

    pub fn from_manager(manager: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.manager() == manager)
    }

    /// The call that places a widget with this manager at its zero position.
    pub const fn zero_placement(self) -> &'static str {
        match self {
            LayoutStrategy::Absolute => "place(x=0, y=0)",
            LayoutStrategy::Grid => "grid(row=0, column=0)",
            LayoutStrategy::Flow => "pack()",
        }
    }

    /// Every option `*_info()` reports after the zero placement, `in` included.
    pub const fn options(self) -> &'static [OptionSpec] {
        match self {
            LayoutStrategy::Absolute => PLACE_OPTIONS,
            LayoutStrategy::Grid => GRID_OPTIONS,
            LayoutStrategy::Flow => PACK_OPTIONS,
        }
    }

    pub fn option(self, name: &str) -> Option<&'static OptionSpec> {
        self.options().iter().find(|o| o.name == name)
    }
}

impl fmt::Display for LayoutStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LayoutStrategy::Absolute => "PLACE",
            LayoutStrategy::Grid => "GRID",
            LayoutStrategy::Flow => "PACK",
        };
        f.write_str(label)
    }
}

// ─── Widget property groups ──────────────────────────────────────────────

const STD_COMMON: Group = &[
    ("bg", "#d9d9d9"),
    ("cursor", ""),
    ("highlightbackground", "#d9d9d9"),
    ("highlightcolor", "#000000"),
    ("highlightthickness", "0"),
    ("relief", "flat"),
    ("takefocus", ""),
];

const STD_TEXTUAL: Group = &[("fg", "#000000"), ("font", "TkDefaultFont")];

const STD_LABEL_LIKE: Group = &[
    ("activebackground", "#ececec"),
    ("activeforeground", "#000000"),
    ("anchor", "center"),
    ("bd", "2"),
    ("bitmap", ""),
    ("compound", "none"),
    ("disabledforeground", "#a3a3a3"),
    ("height", "0"),
    ("image", ""),
    ("justify", "center"),
    ("padx", "1"),
    ("pady", "1"),
    ("state", "normal"),
    ("text", ""),
    ("textvariable", ""),
    ("underline", "-1"),
    ("width", "0"),
    ("wraplength", "0"),
];

const STD_FRAME_LIKE: Group = &[
    ("bd", "0"),
    ("class", "Frame"),
    ("colormap", ""),
    ("container", "0"),
    ("height", "0"),
    ("padx", "0"),
    ("pady", "0"),
    ("takefocus", "0"),
    ("visual", ""),
    ("width", "0"),
];

const STD_INSERT_CURSOR: Group = &[
    ("insertbackground", "#000000"),
    ("insertborderwidth", "0"),
    ("insertofftime", "300"),
    ("insertontime", "600"),
    ("insertwidth", "2"),
];

const STD_SELECTION: Group = &[
    ("exportselection", "1"),
    ("selectbackground", "#c3c3c3"),
    ("selectborderwidth", "0"),
    ("selectforeground", "#000000"),
];

const STD_ENTRY: Group = &[
    ("bg", "#ffffff"),
    ("bd", "1"),
    ("disabledbackground", "#d9d9d9"),
    ("disabledforeground", "#a3a3a3"),
    ("highlightthickness", "1"),
    ("invalidcommand", ""),
    ("justify", "left"),
    ("readonlybackground", "#d9d9d9"),
    ("relief", "sunken"),
    ("show", ""),
    ("state", "normal"),
    ("textvariable", ""),
    ("validate", "none"),
    ("validatecommand", ""),
    ("width", "20"),
    ("xscrollcommand", ""),
];

const STD_TOGGLE: Group = &[
    ("command", ""),
    ("highlightthickness", "1"),
    ("indicatoron", "1"),
    ("offrelief", "raised"),
    ("overrelief", ""),
    ("selectcolor", "#ffffff"),
    ("selectimage", ""),
    ("tristateimage", ""),
    ("tristatevalue", ""),
    ("variable", ""),
];

const STD_REPEAT: Group = &[("repeatdelay", "300"), ("repeatinterval", "100")];

const THEMED_COMMON: Group = &[
    ("class", ""),
    ("cursor", ""),
    ("style", ""),
    ("takefocus", ""),
];

// ─── Declarations ────────────────────────────────────────────────────────

/// Accumulates option groups; later groups override earlier defaults.
#[derive(Default)]
struct Declared(Vec<OptionSpec>);

impl Declared {
    fn with(mut self, group: Group) -> Self {
        for &(name, default) in group {
            match self.0.iter_mut().find(|o| o.name == name) {
                Some(existing) => existing.default = default,
                None => self.0.push(OptionSpec { name, default }),
            }
        }
        self
    }

    fn finish(mut self) -> Vec<OptionSpec> {
        self.0.sort_by_key(|o| o.name);
        self.0
    }
}

fn declare(kind: WidgetKind) -> Vec<OptionSpec> {
    let std = Declared::default().with(STD_COMMON);
    let themed = Declared::default().with(THEMED_COMMON);

    let declared = match kind {
        WidgetKind::Frame => std.with(STD_FRAME_LIKE),
        WidgetKind::Toplevel => std.with(STD_FRAME_LIKE).with(&[
            ("class", "Toplevel"),
            ("menu", ""),
            ("screen", ""),
            ("use", ""),
        ]),
        WidgetKind::Label => std
            .with(STD_TEXTUAL)
            .with(STD_LABEL_LIKE)
            .with(&[("takefocus", "0")]),
        WidgetKind::Button => std.with(STD_TEXTUAL).with(STD_LABEL_LIKE).with(&[
            ("command", ""),
            ("default", "disabled"),
            ("highlightthickness", "1"),
            ("overrelief", ""),
            ("padx", "3m"),
            ("pady", "1m"),
            ("relief", "raised"),
            ("repeatdelay", "0"),
            ("repeatinterval", "0"),
        ]),
        WidgetKind::Checkbutton => std
            .with(STD_TEXTUAL)
            .with(STD_LABEL_LIKE)
            .with(STD_TOGGLE)
            .with(&[("offvalue", "0"), ("onvalue", "1")]),
        WidgetKind::Radiobutton => std
            .with(STD_TEXTUAL)
            .with(STD_LABEL_LIKE)
            .with(STD_TOGGLE)
            .with(&[("value", "")]),
        WidgetKind::Menubutton => std.with(STD_TEXTUAL).with(STD_LABEL_LIKE).with(&[
            ("bd", "1"),
            ("direction", "below"),
            ("indicatoron", "0"),
            ("menu", ""),
            ("padx", "4p"),
            ("pady", "3p"),
            ("takefocus", "0"),
        ]),
        WidgetKind::Message => std.with(STD_TEXTUAL).with(&[
            ("anchor", "center"),
            ("aspect", "150"),
            ("bd", "1"),
            ("justify", "left"),
            ("padx", "-1"),
            ("pady", "-1"),
            ("text", ""),
            ("textvariable", ""),
            ("width", "0"),
        ]),
        WidgetKind::Text => std
            .with(STD_TEXTUAL)
            .with(STD_INSERT_CURSOR)
            .with(STD_SELECTION)
            .with(&[
                ("autoseparators", "1"),
                ("bd", "1"),
                ("blockcursor", "0"),
                ("endline", ""),
                ("font", "TkFixedFont"),
                ("height", "24"),
                ("highlightthickness", "1"),
                ("inactiveselectbackground", "#c3c3c3"),
                ("insertunfocussed", "none"),
                ("maxundo", "0"),
                ("padx", "1"),
                ("pady", "1"),
                ("relief", "sunken"),
                ("setgrid", "0"),
                ("spacing1", "0"),
                ("spacing2", "0"),
                ("spacing3", "0"),
                ("startline", ""),
                ("state", "normal"),
                ("tabs", ""),
                ("tabstyle", "tabular"),
                ("undo", "0"),
                ("width", "80"),
                ("wrap", "char"),
                ("xscrollcommand", ""),
                ("yscrollcommand", ""),
            ]),
        WidgetKind::Canvas => std.with(STD_INSERT_CURSOR).with(STD_SELECTION).with(&[
            ("bd", "0"),
            ("closeenough", "1.0"),
            ("confine", "1"),
            ("height", "7c"),
            ("highlightthickness", "1"),
            ("offset", "0,0"),
            ("scrollregion", ""),
            ("selectborderwidth", "1"),
            ("state", "normal"),
            ("width", "10c"),
            ("xscrollcommand", ""),
            ("xscrollincrement", "0"),
            ("yscrollcommand", ""),
            ("yscrollincrement", "0"),
        ]),
        WidgetKind::Entry => std
            .with(STD_TEXTUAL)
            .with(STD_INSERT_CURSOR)
            .with(STD_SELECTION)
            .with(STD_ENTRY),
        WidgetKind::Spinbox => std
            .with(STD_TEXTUAL)
            .with(STD_INSERT_CURSOR)
            .with(STD_SELECTION)
            .with(STD_ENTRY)
            .with(STD_REPEAT)
            .with(&[
                ("activebackground", "#ececec"),
                ("buttonbackground", "#d9d9d9"),
                ("buttoncursor", ""),
                ("buttondownrelief", "raised"),
                ("buttonuprelief", "raised"),
                ("command", ""),
                ("format", ""),
                ("from", "0"),
                ("increment", "1"),
                ("repeatdelay", "400"),
                ("to", "0"),
                ("values", ""),
                ("wrap", "0"),
            ]),
        WidgetKind::Listbox => std.with(STD_TEXTUAL).with(STD_SELECTION).with(&[
            ("activestyle", "dotbox"),
            ("bd", "1"),
            ("bg", "#ffffff"),
            ("disabledforeground", "#a3a3a3"),
            ("height", "10"),
            ("highlightthickness", "1"),
            ("justify", "left"),
            ("listvariable", ""),
            ("relief", "sunken"),
            ("selectmode", "browse"),
            ("setgrid", "0"),
            ("state", "normal"),
            ("width", "20"),
            ("xscrollcommand", ""),
            ("yscrollcommand", ""),
        ]),
        WidgetKind::Menu => Declared::default().with(STD_TEXTUAL).with(&[
            ("activebackground", "#ececec"),
            ("activeborderwidth", "1"),
            ("activeforeground", "#000000"),
            ("bd", "1"),
            ("bg", "#d9d9d9"),
            ("cursor", "arrow"),
            ("disabledforeground", "#a3a3a3"),
            ("postcommand", ""),
            ("relief", "flat"),
            ("selectcolor", "#000000"),
            ("takefocus", "0"),
            ("tearoff", "1"),
            ("tearoffcommand", ""),
            ("title", ""),
            ("type", "normal"),
        ]),
        WidgetKind::Scale => std.with(STD_TEXTUAL).with(STD_REPEAT).with(&[
            ("activebackground", "#ececec"),
            ("bigincrement", "0"),
            ("bd", "1"),
            ("command", ""),
            ("digits", "0"),
            ("from", "0"),
            ("highlightthickness", "1"),
            ("label", ""),
            ("length", "100"),
            ("orient", "vertical"),
            ("resolution", "1"),
            ("showvalue", "1"),
            ("sliderlength", "30"),
            ("sliderrelief", "raised"),
            ("state", "normal"),
            ("tickinterval", "0"),
            ("to", "100"),
            ("troughcolor", "#b3b3b3"),
            ("variable", ""),
            ("width", "15"),
        ]),
        WidgetKind::Scrollbar => std.with(STD_REPEAT).with(&[
            ("activebackground", "#ececec"),
            ("activerelief", "raised"),
            ("bd", "1"),
            ("command", ""),
            ("elementborderwidth", "-1"),
            ("jump", "0"),
            ("orient", "vertical"),
            ("relief", "sunken"),
            ("troughcolor", "#b3b3b3"),
            ("width", "11"),
        ]),
        WidgetKind::Treeview => themed.with(&[
            ("columns", ""),
            ("displaycolumns", "#all"),
            ("height", "10"),
            ("padding", ""),
            ("selectmode", "extended"),
            ("show", "tree headings"),
            ("xscrollcommand", ""),
            ("yscrollcommand", ""),
        ]),
        WidgetKind::Notebook => themed.with(&[("height", "0"), ("padding", ""), ("width", "0")]),
        WidgetKind::Progressbar => themed.with(&[
            ("length", "100"),
            ("maximum", "100"),
            ("mode", "determinate"),
            ("orient", "horizontal"),
            ("phase", "0"),
            ("value", "0.0"),
            ("variable", ""),
        ]),
        WidgetKind::Separator => themed.with(&[("orient", "horizontal")]),
        WidgetKind::Sizegrip => themed,
        WidgetKind::Combobox => themed.with(&[
            ("exportselection", "1"),
            ("font", ""),
            ("height", "10"),
            ("invalidcommand", ""),
            ("justify", "left"),
            ("postcommand", ""),
            ("show", ""),
            ("state", "normal"),
            ("textvariable", ""),
            ("validate", "none"),
            ("validatecommand", ""),
            ("values", ""),
            ("width", "20"),
            ("xscrollcommand", ""),
        ]),
        WidgetKind::Panedwindow => {
            themed.with(&[("height", "0"), ("orient", "vertical"), ("width", "0")])
        }
        WidgetKind::Labelframe => themed.with(&[
            ("height", "0"),
            ("labelanchor", "nw"),
            ("labelwidget", ""),
            ("padding", ""),
            ("text", ""),
            ("underline", "-1"),
            ("width", "0"),
        ]),
    };
    declared.finish()
}

static SCHEMA: LazyLock<HashMap<WidgetKind, Vec<OptionSpec>>> = LazyLock::new(|| {
    WidgetKind::ALL
        .iter()
        .map(|&kind| (kind, declare(kind)))
        .collect()
});

// ─── Lookups ─────────────────────────────────────────────────────────────

/// The options `kind` declares, sorted by name, with default values.
pub fn properties(kind: WidgetKind) -> &'static [OptionSpec] {
    SCHEMA.get(&kind).map(Vec::as_slice).unwrap_or(&[])
}

/// The default value of one option, or `None` if `kind` does not declare it.
pub fn property_default(kind: WidgetKind, name: &str) -> Option<&'static str> {
    properties(kind)
        .iter()
        .find(|o| o.name == name)
        .map(|o| o.default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_declares_options() {
        for kind in WidgetKind::ALL {
            let props = properties(kind);
            assert!(!props.is_empty(), "{kind} declares nothing");
            assert!(props.iter().any(|o| o.name == "cursor"), "{kind} lacks cursor");
            let mut names: Vec<_> = props.iter().map(|o| o.name).collect();
            names.dedup();
            assert_eq!(names.len(), props.len(), "{kind} declares duplicates");
        }
    }

    #[test]
    fn later_groups_override_defaults() {
        assert_eq!(property_default(WidgetKind::Button, "relief"), Some("raised"));
        assert_eq!(property_default(WidgetKind::Label, "relief"), Some("flat"));
        assert_eq!(property_default(WidgetKind::Entry, "bg"), Some("#ffffff"));
        assert_eq!(property_default(WidgetKind::Text, "font"), Some("TkFixedFont"));
    }

    #[test]
    fn families_declare_different_sets() {
        assert!(property_default(WidgetKind::Button, "text").is_some());
        assert!(property_default(WidgetKind::Frame, "text").is_none());
        assert!(property_default(WidgetKind::Treeview, "style").is_some());
        assert!(property_default(WidgetKind::Frame, "style").is_none());
    }

    #[test]
    fn layout_options_include_container_reference() {
        for strategy in LayoutStrategy::ALL {
            assert_eq!(strategy.options()[0].name, "in");
        }
        assert_eq!(LayoutStrategy::Flow.option("side").map(|o| o.default), Some("top"));
        assert_eq!(LayoutStrategy::Grid.option("row").map(|o| o.default), Some("0"));
        assert!(LayoutStrategy::Absolute.option("side").is_none());
    }

    #[test]
    fn managers() {
        assert_eq!(LayoutStrategy::from_manager("grid"), Some(LayoutStrategy::Grid));
        assert_eq!(LayoutStrategy::from_manager("flex"), None);
        assert_eq!(LayoutStrategy::Absolute.zero_placement(), "place(x=0, y=0)");
        assert_eq!(LayoutStrategy::Flow.to_string(), "PACK");
    }
}
