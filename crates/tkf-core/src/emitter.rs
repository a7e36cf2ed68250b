//! Code generator: Design → Python/tkinter program (Export) or declarative
//! snapshot (Backup).
//!
//! Both modes share one per-widget plan: construction, the properties that
//! deviate from the kind's defaults, one zero placement and the layout
//! options that deviate from that placement. Nothing equal to a default is
//! ever written.

use crate::model::{Design, WidgetNode};
use crate::policy::is_hidden_layout_option;
use crate::schema;
use log::info;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt::Write;

/// Current Backup format version.
pub const BACKUP_VERSION: u32 = 1;

/// Header line every Backup starts with.
pub const BACKUP_HEADER: &str = "# tkforge backup";

// ─── Configuration ───────────────────────────────────────────────────────

/// Knobs for the Export program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitConfig {
    /// Name of the generated class.
    pub class_name: String,
    pub window_title: String,
    /// Tk geometry string, `WIDTHxHEIGHT`.
    pub geometry: String,
    /// Spaces per indentation level.
    pub indent: usize,
    /// Append the `if __name__ == "__main__":` block.
    pub entry_point: bool,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            class_name: "MainWindow".into(),
            window_title: "Tkinter Editor".into(),
            geometry: "800x600".into(),
            indent: 4,
            entry_point: true,
        }
    }
}

// ─── Shared plan ─────────────────────────────────────────────────────────

/// Deviations from defaults, in schema order.
pub type Deviations<'a> = SmallVec<[(&'static str, &'a str); 4]>;

/// What the generator writes for one widget.
#[derive(Debug, Clone)]
pub struct WidgetPlan<'a> {
    pub node: &'a WidgetNode,
    /// `None` when the widget sits on the root canvas.
    pub parent: Option<&'a WidgetNode>,
    /// Placed with `Notebook.add` rather than a geometry manager.
    pub tab: bool,
    pub properties: Deviations<'a>,
    pub layout: Deviations<'a>,
}

/// Plan every widget of `design` in creation order.
pub fn plan(design: &Design) -> Vec<WidgetPlan<'_>> {
    design
        .widgets()
        .map(|node| {
            let parent = design
                .parent(node.id)
                .filter(|p| !p.is_canvas())
                .and_then(|p| design.get(p));
            let tab = parent.is_some_and(|p| p.kind.is_tabbed());

            let properties = schema::properties(node.kind)
                .iter()
                .filter_map(|spec| {
                    let value = node.properties.get(spec.name)?;
                    (value != spec.default).then_some((spec.name, value.as_str()))
                })
                .collect();

            let layout = if tab {
                Deviations::new()
            } else {
                node.strategy
                    .options()
                    .iter()
                    .filter(|spec| !is_hidden_layout_option(spec.name))
                    .filter_map(|spec| {
                        let value = node.layout.get(spec.name)?;
                        (value != spec.default).then_some((spec.name, value.as_str()))
                    })
                    .collect()
            };

            WidgetPlan {
                node,
                parent,
                tab,
                properties,
                layout,
            }
        })
        .collect()
}

// ─── Export ──────────────────────────────────────────────────────────────

/// Emit a standalone, runnable Python program that rebuilds the design.
#[must_use]
pub fn emit_export(design: &Design, config: &EmitConfig) -> String {
    let mut out = String::with_capacity(1024);
    let one = " ".repeat(config.indent);
    let two = one.repeat(2);

    out.push_str("import tkinter as tk\n");
    out.push_str("from tkinter import ttk\n\n\n");

    let _ = writeln!(out, "class {}:", config.class_name);
    let _ = writeln!(out, "{one}def __init__(self, root):");
    let _ = writeln!(out, "{two}self.root = root");
    let _ = writeln!(out, "{two}self.root.title({})", py_str(&config.window_title));
    let _ = writeln!(out, "{two}self.root.geometry({})", py_str(&config.geometry));

    let plans = plan(design);
    for p in &plans {
        emit_widget(&mut out, p, &two);
    }

    if config.entry_point {
        out.push_str("\n\nif __name__ == \"__main__\":\n");
        let _ = writeln!(out, "{one}root = tk.Tk()");
        let _ = writeln!(out, "{one}app = {}(root)", config.class_name);
        let _ = writeln!(out, "{one}root.mainloop()");
    }

    info!("generated export for {} widgets", plans.len());
    out
}

fn emit_widget(out: &mut String, p: &WidgetPlan<'_>, indent: &str) {
    let node = p.node;
    let name = node.name.as_str();
    let parent = p
        .parent
        .map_or_else(|| "self.root".to_string(), |n| format!("self.{}", n.name));

    let _ = writeln!(
        out,
        "{indent}self.{name} = {}.{}({parent})",
        node.namespace().module_alias(),
        node.kind.class_name()
    );
    for (key, value) in &p.properties {
        let _ = writeln!(
            out,
            "{indent}self.{name}.config({{{}: {}}})",
            py_str(key),
            py_str(value)
        );
    }

    if p.tab {
        let _ = writeln!(out, "{indent}{parent}.add(self.{name}, text={})", py_str(name));
        return;
    }

    let manager = node.strategy.manager();
    let _ = writeln!(out, "{indent}self.{name}.{}", node.strategy.zero_placement());
    for (key, value) in &p.layout {
        let _ = writeln!(
            out,
            "{indent}self.{name}.{manager}_configure({{{}: {}}})",
            py_str(key),
            py_str(value)
        );
    }
}

/// Quote a value as a Python string literal.
pub fn py_str(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\x{:02x}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

// ─── Backup ──────────────────────────────────────────────────────────────

/// Emit a declarative snapshot that `load_backup` turns back into a design.
#[must_use]
pub fn emit_backup(design: &Design) -> String {
    let mut out = String::with_capacity(1024);
    let _ = writeln!(out, "{BACKUP_HEADER}");
    let _ = writeln!(out, "version {BACKUP_VERSION}\n");

    let plans = plan(design);
    for p in &plans {
        let node = p.node;
        let parent = p
            .parent
            .map_or_else(|| "root".to_string(), |n| n.id.to_string());
        let _ = write!(
            out,
            "widget {} {} {} in {parent} {} {{",
            node.id,
            node.kind,
            quote(node.name.as_str()),
            node.strategy.manager()
        );

        if p.properties.is_empty() && p.layout.is_empty() {
            out.push_str("}\n");
            continue;
        }
        out.push('\n');
        for (key, value) in &p.properties {
            let _ = writeln!(out, "  {key}: {}", quote(value));
        }
        for (key, value) in &p.layout {
            let _ = writeln!(out, "  {} {key}: {}", node.strategy.manager(), quote(value));
        }
        out.push_str("}\n");
    }

    info!("generated backup for {} widgets", plans.len());
    out
}

/// Quote a value for the Backup format. `parser::parse_quoted` is the inverse.
fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::WidgetId;
    use crate::registry::WidgetKind;
    use crate::schema::LayoutStrategy;
    use pretty_assertions::assert_eq;

    const ROOT: WidgetId = WidgetId::CANVAS;

    fn bare() -> EmitConfig {
        EmitConfig {
            entry_point: false,
            ..EmitConfig::default()
        }
    }

    #[test]
    fn empty_design_exports_skeleton() {
        let out = emit_export(&Design::new(), &EmitConfig::default());
        let expected = "\
import tkinter as tk
from tkinter import ttk


class MainWindow:
    def __init__(self, root):
        self.root = root
        self.root.title(\"Tkinter Editor\")
        self.root.geometry(\"800x600\")


if __name__ == \"__main__\":
    root = tk.Tk()
    app = MainWindow(root)
    root.mainloop()
";
        assert_eq!(out, expected);
    }

    #[test]
    fn defaults_produce_no_config_lines() {
        let mut design = Design::new();
        design
            .add_widget(WidgetKind::Button, Some("go"), LayoutStrategy::Absolute, ROOT)
            .unwrap();
        let out = emit_export(&design, &bare());
        assert!(out.contains("        self.go = tk.Button(self.root)\n"));
        assert!(out.contains("        self.go.place(x=0, y=0)\n"));
        assert!(!out.contains(".config("));
        assert!(!out.contains("_configure("));
    }

    #[test]
    fn deviations_are_emitted_in_schema_order() {
        let mut design = Design::new();
        let id = design
            .add_widget(WidgetKind::Label, Some("title"), LayoutStrategy::Grid, ROOT)
            .unwrap();
        design.set_property(id, "text", "Hello").unwrap();
        design.set_property(id, "background", "#ff0000").unwrap();
        design.set_layout_param(id, "row", "3").unwrap();
        // Setting an option back to its default emits nothing.
        design.set_property(id, "relief", "flat").unwrap();

        let out = emit_export(&design, &bare());
        let body: Vec<_> = out
            .lines()
            .filter(|l| l.contains("self.title"))
            .map(str::trim)
            .collect();
        assert_eq!(
            body,
            vec![
                "self.title = tk.Label(self.root)",
                "self.title.config({\"bg\": \"#ff0000\"})",
                "self.title.config({\"text\": \"Hello\"})",
                "self.title.grid(row=0, column=0)",
                "self.title.grid_configure({\"row\": \"3\"})",
            ]
        );
    }

    #[test]
    fn themed_kinds_use_ttk() {
        let mut design = Design::new();
        design
            .add_widget(WidgetKind::Treeview, Some("tree"), LayoutStrategy::Flow, ROOT)
            .unwrap();
        let out = emit_export(&design, &bare());
        assert!(out.contains("self.tree = ttk.Treeview(self.root)"));
    }

    #[test]
    fn toplevel_windows_are_never_managed() {
        let mut design = Design::new();
        let frame = design
            .add_widget(WidgetKind::Frame, Some("body"), LayoutStrategy::Flow, ROOT)
            .unwrap();
        for kind in [WidgetKind::Menu, WidgetKind::Toplevel] {
            for parent in [ROOT, frame] {
                assert!(
                    design
                        .add_widget(kind, Some("popup"), LayoutStrategy::Flow, parent)
                        .is_err()
                );
            }
        }

        let out = emit_export(&design, &bare());
        assert!(!out.contains("tk.Menu("));
        assert!(!out.contains("tk.Toplevel("));
        assert!(!out.contains("self.popup"));
        assert!(out.contains("        self.body.pack()\n"));
    }

    #[test]
    fn notebook_pages_are_added() {
        let mut design = Design::new();
        let nb = design
            .add_widget(WidgetKind::Notebook, Some("tabs"), LayoutStrategy::Flow, ROOT)
            .unwrap();
        design
            .add_widget(WidgetKind::Frame, Some("general"), LayoutStrategy::Flow, nb)
            .unwrap();
        let out = emit_export(&design, &bare());
        assert!(out.contains("self.general = tk.Frame(self.tabs)\n"));
        assert!(out.contains("self.tabs.add(self.general, text=\"general\")\n"));
        assert!(!out.contains("self.general.pack"));
    }

    #[test]
    fn export_config_is_honoured() {
        let config = EmitConfig {
            class_name: "LoginDialog".into(),
            window_title: "Log in".into(),
            geometry: "320x200".into(),
            indent: 2,
            entry_point: true,
        };
        let out = emit_export(&Design::new(), &config);
        assert!(out.contains("class LoginDialog:\n  def __init__(self, root):\n"));
        assert!(out.contains("    self.root.title(\"Log in\")\n"));
        assert!(out.contains("  app = LoginDialog(root)\n"));
    }

    #[test]
    fn python_strings_are_escaped() {
        assert_eq!(py_str("plain"), "\"plain\"");
        assert_eq!(py_str("say \"hi\"\n"), "\"say \\\"hi\\\"\\n\"");
        assert_eq!(py_str("C:\\temp"), "\"C:\\\\temp\"");
        assert_eq!(py_str("\u{7}"), "\"\\x07\"");
    }

    #[test]
    fn backup_records() {
        let mut design = Design::new();
        let main = design
            .add_widget(WidgetKind::Frame, Some("main"), LayoutStrategy::Flow, ROOT)
            .unwrap();
        design.set_property(main, "relief", "raised").unwrap();
        design.set_layout_param(main, "side", "left").unwrap();
        let ok = design
            .add_widget(WidgetKind::Button, Some("okBtn"), LayoutStrategy::Flow, main)
            .unwrap();
        design.set_property(ok, "text", "OK").unwrap();
        design
            .add_widget(WidgetKind::Label, Some("note"), LayoutStrategy::Flow, main)
            .unwrap();

        let expected = "\
# tkforge backup
version 1

widget #1 Frame \"main\" in root pack {
  relief: \"raised\"
  pack side: \"left\"
}
widget #2 Button \"okBtn\" in #1 pack {
  text: \"OK\"
}
widget #3 Label \"note\" in #1 pack {}
";
        assert_eq!(emit_backup(&design), expected);
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: EmitConfig = serde_json::from_str(r#"{"class_name": "App"}"#).unwrap();
        assert_eq!(config.class_name, "App");
        assert_eq!(config.geometry, "800x600");
        assert!(config.entry_point);
    }
}
