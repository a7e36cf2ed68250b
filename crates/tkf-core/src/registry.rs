//! Widget registry: the supported widget kinds and the Tk family each one
//! is constructed from.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which tkinter module constructs a kind.
///
/// The two families expose overlapping but different option sets, and the
/// generated code prefixes constructors with the module alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Namespace {
    /// Classic widgets from `tkinter` (`tk.Button`).
    Standard,
    /// Themed widgets from `tkinter.ttk` (`ttk.Treeview`).
    Themed,
}

impl Namespace {
    /// Module alias used in generated code.
    pub const fn module_alias(self) -> &'static str {
        match self {
            Namespace::Standard => "tk",
            Namespace::Themed => "ttk",
        }
    }
}

/// The widget kinds a design can contain, in palette order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WidgetKind {
    Frame,
    Label,
    Text,
    Button,
    Canvas,
    Checkbutton,
    Entry,
    Listbox,
    Menu,
    Menubutton,
    Message,
    Radiobutton,
    Scale,
    Scrollbar,
    Spinbox,
    Toplevel,
    Treeview,
    Notebook,
    Progressbar,
    Separator,
    Sizegrip,
    Combobox,
    Panedwindow,
    Labelframe,
}

impl WidgetKind {
    /// Every kind, in the stable order the palette presents them.
    pub const ALL: [WidgetKind; 24] = [
        WidgetKind::Frame,
        WidgetKind::Label,
        WidgetKind::Text,
        WidgetKind::Button,
        WidgetKind::Canvas,
        WidgetKind::Checkbutton,
        WidgetKind::Entry,
        WidgetKind::Listbox,
        WidgetKind::Menu,
        WidgetKind::Menubutton,
        WidgetKind::Message,
        WidgetKind::Radiobutton,
        WidgetKind::Scale,
        WidgetKind::Scrollbar,
        WidgetKind::Spinbox,
        WidgetKind::Toplevel,
        WidgetKind::Treeview,
        WidgetKind::Notebook,
        WidgetKind::Progressbar,
        WidgetKind::Separator,
        WidgetKind::Sizegrip,
        WidgetKind::Combobox,
        WidgetKind::Panedwindow,
        WidgetKind::Labelframe,
    ];

    /// The constructor name, identical to the Tk class name.
    pub const fn class_name(self) -> &'static str {
        match self {
            WidgetKind::Frame => "Frame",
            WidgetKind::Label => "Label",
            WidgetKind::Text => "Text",
            WidgetKind::Button => "Button",
            WidgetKind::Canvas => "Canvas",
            WidgetKind::Checkbutton => "Checkbutton",
            WidgetKind::Entry => "Entry",
            WidgetKind::Listbox => "Listbox",
            WidgetKind::Menu => "Menu",
            WidgetKind::Menubutton => "Menubutton",
            WidgetKind::Message => "Message",
            WidgetKind::Radiobutton => "Radiobutton",
            WidgetKind::Scale => "Scale",
            WidgetKind::Scrollbar => "Scrollbar",
            WidgetKind::Spinbox => "Spinbox",
            WidgetKind::Toplevel => "Toplevel",
            WidgetKind::Treeview => "Treeview",
            WidgetKind::Notebook => "Notebook",
            WidgetKind::Progressbar => "Progressbar",
            WidgetKind::Separator => "Separator",
            WidgetKind::Sizegrip => "Sizegrip",
            WidgetKind::Combobox => "Combobox",
            WidgetKind::Panedwindow => "Panedwindow",
            WidgetKind::Labelframe => "Labelframe",
        }
    }

    /// Parse a class name, ignoring ASCII case (`button`, `BUTTON`, `Button`).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.class_name().eq_ignore_ascii_case(name))
    }

    pub const fn namespace(self) -> Namespace {
        match self {
            WidgetKind::Treeview
            | WidgetKind::Notebook
            | WidgetKind::Progressbar
            | WidgetKind::Separator
            | WidgetKind::Sizegrip
            | WidgetKind::Combobox
            | WidgetKind::Panedwindow
            | WidgetKind::Labelframe => Namespace::Themed,
            _ => Namespace::Standard,
        }
    }

    /// Whether other widgets may be placed inside this kind.
    pub const fn is_container(self) -> bool {
        matches!(
            self,
            WidgetKind::Frame | WidgetKind::Labelframe | WidgetKind::Notebook
        )
    }

    /// Containers whose children are pages added with `.add(child, text=...)`
    /// rather than positioned by a geometry manager.
    pub const fn is_tabbed(self) -> bool {
        matches!(self, WidgetKind::Notebook)
    }

    /// Kinds Tk creates as separate top-level windows. No geometry manager
    /// accepts them, so they cannot be placed on the canvas.
    pub const fn is_toplevel(self) -> bool {
        matches!(self, WidgetKind::Menu | WidgetKind::Toplevel)
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

/// The palette, in presentation order.
pub fn list_kinds() -> &'static [WidgetKind] {
    &WidgetKind::ALL
}
