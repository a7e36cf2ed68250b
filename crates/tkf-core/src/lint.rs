//! Lint diagnostics for designs.
//!
//! The model accepts any display name; these rules report names that would
//! make the generated program misbehave, plus containers left empty.

use crate::id::WidgetId;
use crate::model::Design;
use serde::Serialize;
use std::collections::HashMap;

// ─── Diagnostic types ────────────────────────────────────────────────────

/// Severity of a lint finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LintSeverity {
    /// The generated program will misbehave.
    Warning,
    /// Informational.
    Info,
}

/// A single lint diagnostic for a widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintDiagnostic {
    /// The widget this diagnostic refers to.
    pub widget: WidgetId,
    /// Human-readable message.
    pub message: String,
    pub severity: LintSeverity,
    /// Short rule identifier (e.g. "duplicate-name").
    pub rule: &'static str,
}

// ─── Public API ──────────────────────────────────────────────────────────

/// Run all lint rules over the design and return diagnostics.
#[must_use]
pub fn lint_design(design: &Design) -> Vec<LintDiagnostic> {
    let mut diags = Vec::new();
    lint_duplicate_names(design, &mut diags);
    lint_invalid_identifiers(design, &mut diags);
    lint_empty_containers(design, &mut diags);
    diags
}

// ─── Rules ───────────────────────────────────────────────────────────────

/// Two widgets with one name overwrite each other's attribute.
fn lint_duplicate_names(design: &Design, diags: &mut Vec<LintDiagnostic>) {
    let mut first_seen: HashMap<&str, WidgetId> = HashMap::new();
    for node in design.widgets() {
        let name = node.name.as_str();
        match first_seen.get(name) {
            Some(first) => diags.push(LintDiagnostic {
                widget: node.id,
                message: format!("Name `{name}` is already used by widget {first}."),
                severity: LintSeverity::Warning,
                rule: "duplicate-name",
            }),
            None => {
                first_seen.insert(name, node.id);
            }
        }
    }
}

fn lint_invalid_identifiers(design: &Design, diags: &mut Vec<LintDiagnostic>) {
    for node in design.widgets() {
        let name = node.name.as_str();
        let problem = if !is_identifier(name) {
            "is not a valid Python identifier; the exported program will not run"
        } else if PYTHON_KEYWORDS.contains(&name) {
            "is a Python keyword; the exported program will not run"
        } else if RESERVED_ATTRIBUTES.contains(&name) {
            "is the attribute holding the main window; widgets created after it \
             would land inside it"
        } else {
            continue;
        };
        diags.push(LintDiagnostic {
            widget: node.id,
            message: format!("Name `{name}` {problem}."),
            severity: LintSeverity::Warning,
            rule: "invalid-identifier",
        });
    }
}

fn lint_empty_containers(design: &Design, diags: &mut Vec<LintDiagnostic>) {
    for node in design.widgets() {
        if node.kind.is_container() && design.children(node.id).is_empty() {
            diags.push(LintDiagnostic {
                widget: node.id,
                message: format!("{} `{}` has no children.", node.kind, node.name),
                severity: LintSeverity::Info,
                rule: "empty-container",
            });
        }
    }
}

const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

/// Attributes the exported class sets before any widget.
const RESERVED_ATTRIBUTES: &[&str] = &["root"];

/// ASCII subset of Python identifiers.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::WidgetKind;
    use crate::schema::LayoutStrategy;

    const ROOT: WidgetId = WidgetId::CANVAS;

    fn rules(design: &Design) -> Vec<(&'static str, WidgetId)> {
        lint_design(design)
            .into_iter()
            .map(|d| (d.rule, d.widget))
            .collect()
    }

    #[test]
    fn lint_duplicate_names() {
        let mut design = Design::new();
        design
            .add_widget(WidgetKind::Label, Some("title"), LayoutStrategy::Flow, ROOT)
            .unwrap();
        let second = design
            .add_widget(WidgetKind::Label, Some("title"), LayoutStrategy::Flow, ROOT)
            .unwrap();
        assert_eq!(rules(&design), vec![("duplicate-name", second)]);
    }

    #[test]
    fn lint_invalid_identifiers() {
        let mut design = Design::new();
        let spaced = design
            .add_widget(WidgetKind::Label, Some("first name"), LayoutStrategy::Flow, ROOT)
            .unwrap();
        let keyword = design
            .add_widget(WidgetKind::Label, Some("class"), LayoutStrategy::Flow, ROOT)
            .unwrap();
        let digit = design
            .add_widget(WidgetKind::Label, Some("1st"), LayoutStrategy::Flow, ROOT)
            .unwrap();
        assert_eq!(
            rules(&design),
            vec![
                ("invalid-identifier", spaced),
                ("invalid-identifier", keyword),
                ("invalid-identifier", digit),
            ]
        );
    }

    #[test]
    fn lint_root_attribute() {
        let mut design = Design::new();
        let frame = design
            .add_widget(WidgetKind::Frame, Some("root"), LayoutStrategy::Flow, ROOT)
            .unwrap();
        design
            .add_widget(WidgetKind::Label, None, LayoutStrategy::Flow, frame)
            .unwrap();
        let diags = lint_design(&design);
        assert_eq!(rules(&design), vec![("invalid-identifier", frame)]);
        assert_eq!(diags[0].severity, LintSeverity::Warning);
        assert!(diags[0].message.contains("main window"));
    }

    #[test]
    fn lint_empty_containers() {
        let mut design = Design::new();
        let frame = design
            .add_widget(WidgetKind::Frame, None, LayoutStrategy::Flow, ROOT)
            .unwrap();
        let diags = lint_design(&design);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity, LintSeverity::Info);
        assert_eq!(diags[0].widget, frame);

        design
            .add_widget(WidgetKind::Button, None, LayoutStrategy::Flow, frame)
            .unwrap();
        assert!(lint_design(&design).is_empty());
    }

    #[test]
    fn identifiers() {
        assert!(is_identifier("okBtn"));
        assert!(is_identifier("_private2"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("ok-btn"));
    }
}
