//! Integration tests: design → backup → design round-trip.
//!
//! Verifies that reloading a backup rebuilds the same tree with the same
//! names and deviations, even though ids are minted afresh.

use pretty_assertions::assert_eq;
use std::collections::BTreeMap;
use tkf_core::*;

const LOGIN: &str = include_str!("fixtures/login.tkf");
const SETTINGS: &str = include_str!("fixtures/settings.tkf");

// ─── Helpers ─────────────────────────────────────────────────────────────

/// Everything a round-trip must preserve, keyed by name instead of id.
#[derive(Debug, PartialEq)]
struct Shape {
    kind: WidgetKind,
    name: String,
    parent: String,
    strategy: LayoutStrategy,
    properties: BTreeMap<String, String>,
    layout: BTreeMap<String, String>,
}

fn shape(design: &Design) -> Vec<Shape> {
    design
        .widgets()
        .map(|node| {
            let parent = design
                .parent(node.id)
                .and_then(|p| design.get(p))
                .map(|p| p.name.as_str().to_string())
                .unwrap_or_default();
            Shape {
                kind: node.kind,
                name: node.name.as_str().to_string(),
                parent,
                strategy: node.strategy,
                properties: node.properties.clone(),
                layout: node.layout.clone(),
            }
        })
        .collect()
}

fn assert_roundtrip(design: &Design) {
    let text = emit_backup(design);
    let reloaded = load_backup(&text).expect("reload failed");
    assert_eq!(shape(design), shape(&reloaded), "backup was:\n{text}");
}

// ─── Round-trips ─────────────────────────────────────────────────────────

#[test]
fn roundtrip_fixture_is_stable() {
    let design = load_backup(LOGIN).expect("fixture failed to load");
    assert_eq!(design.len(), 6);
    assert_eq!(emit_backup(&design), LOGIN);
}

#[test]
fn roundtrip_notebook_fixture() {
    let design = load_backup(SETTINGS).expect("fixture failed to load");
    let general = design.find_by_name("general").unwrap();
    assert!(design.is_tab(general));
    assert_eq!(design.get(general).unwrap().layout_param("fill"), Some("both"));
    assert_roundtrip(&design);
}

#[test]
fn roundtrip_after_edits_and_removals() {
    let mut design = Design::new();
    let root = WidgetId::CANVAS;
    let left = design
        .add_widget(WidgetKind::Labelframe, Some("left"), LayoutStrategy::Grid, root)
        .unwrap();
    let scratch = design
        .add_widget(WidgetKind::Label, None, LayoutStrategy::Grid, root)
        .unwrap();
    let right = design
        .add_widget(WidgetKind::Frame, Some("right"), LayoutStrategy::Grid, root)
        .unwrap();
    design.set_layout_param(right, "column", "1").unwrap();
    design.remove_widget(scratch).unwrap();

    let list = design
        .add_widget(WidgetKind::Listbox, Some("items"), LayoutStrategy::Flow, left)
        .unwrap();
    design.set_property(list, "selectmode", "multiple").unwrap();
    design.set_property(list, "background", "#fafafa").unwrap();
    design.set_layout_param(list, "fill", "y").unwrap();

    let text = design
        .add_widget(WidgetKind::Text, Some("notes"), LayoutStrategy::Absolute, right)
        .unwrap();
    design.set_property(text, "wrap", "word").unwrap();
    design.set_layout_param(text, "relwidth", "0.5").unwrap();
    design.set_property(left, "text", "Items \"all\"\n").unwrap();

    assert_roundtrip(&design);
}

#[test]
fn roundtrip_empty_design() {
    let design = Design::new();
    let text = emit_backup(&design);
    assert_eq!(text, "# tkforge backup\nversion 1\n\n");
    assert!(load_backup(&text).unwrap().is_empty());
}

// ─── Export of loaded designs ────────────────────────────────────────────

#[test]
fn export_login_fixture() {
    let design = load_backup(LOGIN).unwrap();
    let config = EmitConfig {
        entry_point: false,
        ..EmitConfig::default()
    };
    let out = emit_export(&design, &config);
    let ok: Vec<_> = out
        .lines()
        .filter(|l| l.contains("self.okBtn"))
        .map(str::trim)
        .collect();
    assert_eq!(
        ok,
        vec![
            "self.okBtn = tk.Button(self.form)",
            "self.okBtn.config({\"default\": \"active\"})",
            "self.okBtn.config({\"text\": \"Log in\"})",
            "self.okBtn.grid(row=0, column=0)",
            "self.okBtn.grid_configure({\"column\": \"1\"})",
            "self.okBtn.grid_configure({\"row\": \"2\"})",
            "self.okBtn.grid_configure({\"sticky\": \"e\"})",
        ]
    );
    assert!(!out.contains("__main__"));
}

#[test]
fn export_settings_fixture_adds_tabs() {
    let design = load_backup(SETTINGS).unwrap();
    let out = emit_export(&design, &EmitConfig::default());
    assert!(out.contains("        self.pages = ttk.Notebook(self.root)\n"));
    assert!(out.contains("        self.pages.add(self.general, text=\"general\")\n"));
    assert!(out.contains("        self.pages.add(self.appearance, text=\"appearance\")\n"));
    assert!(out.contains("        self.theme = ttk.Combobox(self.appearance)\n"));
    assert!(out.contains("        self.zoom.config({\"orient\": \"horizontal\"})\n"));
}

#[test]
fn lint_flags_fixture_problems() {
    let design = load_backup(LOGIN).unwrap();
    assert!(lint_design(&design).is_empty());

    let text = "version 1\n\
        widget #1 Frame \"box\" in root pack {}\n\
        widget #2 Label \"box\" in root pack {}\n";
    let rules: Vec<_> = lint_design(&load_backup(text).unwrap())
        .into_iter()
        .map(|d| d.rule)
        .collect();
    assert_eq!(rules, vec!["duplicate-name", "empty-container"]);
}
