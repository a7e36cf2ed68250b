//! Inspector: the editable surface of the selected widget.
//!
//! Built fresh from the model on demand, so it can never go stale. Hidden
//! properties and the `in` layout option are left out.

use serde::Serialize;
use std::fmt;
use tkf_core::policy::{field_editor, is_hidden, is_hidden_layout_option};
use tkf_core::{Color, Design, EditError, FieldEditor, LayoutStrategy, WidgetId, WidgetKind, schema};

/// The host's colour dialog.
pub trait ColorPicker {
    /// Ask the user for a colour, starting from `initial` when it is a hex
    /// colour. `None` means the dialog was cancelled.
    fn pick(&mut self, initial: Option<Color>) -> Option<String>;
}

/// One editable row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: &'static str,
    pub value: String,
    pub editor: FieldEditor,
}

/// Title of the layout section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LayoutHeading {
    Manager(LayoutStrategy),
    /// Notebook pages have no editable placement.
    Notebook,
}

impl fmt::Display for LayoutHeading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutHeading::Manager(strategy) => write!(f, "{strategy}"),
            LayoutHeading::Notebook => f.write_str("in a Notebook"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inspector {
    pub widget: WidgetId,
    pub kind: WidgetKind,
    /// Content of the name entry.
    pub name: String,
    pub properties: Vec<Field>,
    pub layout_heading: LayoutHeading,
    pub layout: Vec<Field>,
}

impl Inspector {
    /// Describe widget `id` of `design`.
    pub fn build(design: &Design, id: WidgetId) -> Result<Self, EditError> {
        if id.is_canvas() {
            return Err(EditError::CanvasIsFixed);
        }
        let node = design.widget(id)?;

        let properties = schema::properties(node.kind)
            .iter()
            .filter(|spec| !is_hidden(spec.name))
            .map(|spec| Field {
                name: spec.name,
                value: node.property(spec.name).unwrap_or(spec.default).to_string(),
                editor: field_editor(spec.name),
            })
            .collect();

        let (layout_heading, layout) = if design.is_tab(id) {
            (LayoutHeading::Notebook, Vec::new())
        } else {
            let rows = node
                .strategy
                .options()
                .iter()
                .filter(|spec| !is_hidden_layout_option(spec.name))
                .map(|spec| Field {
                    name: spec.name,
                    value: node.layout_param(spec.name).unwrap_or(spec.default).to_string(),
                    editor: field_editor(spec.name),
                })
                .collect();
            (LayoutHeading::Manager(node.strategy), rows)
        };

        Ok(Self {
            widget: id,
            kind: node.kind,
            name: node.name.as_str().to_string(),
            properties,
            layout_heading,
            layout,
        })
    }

    pub fn property(&self, name: &str) -> Option<&Field> {
        self.properties.iter().find(|f| f.name == name)
    }

    pub fn layout_field(&self, name: &str) -> Option<&Field> {
        self.layout.iter().find(|f| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_rows_are_omitted() {
        let mut design = Design::new();
        let id = design
            .add_widget(WidgetKind::Button, Some("ok"), LayoutStrategy::Grid, WidgetId::CANVAS)
            .unwrap();
        let inspector = Inspector::build(&design, id).unwrap();

        assert_eq!(inspector.name, "ok");
        assert!(inspector.property("highlightcolor").is_none());
        assert!(inspector.property("text").is_some());
        assert_eq!(inspector.property("bg").unwrap().editor, FieldEditor::Color);
        assert_eq!(inspector.layout_heading.to_string(), "GRID");
        assert!(inspector.layout_field("in").is_none());
        assert_eq!(inspector.layout_field("row").unwrap().value, "0");
    }

    #[test]
    fn notebook_pages_have_no_layout_rows() {
        let mut design = Design::new();
        let nb = design
            .add_widget(WidgetKind::Notebook, None, LayoutStrategy::Flow, WidgetId::CANVAS)
            .unwrap();
        let page = design
            .add_widget(WidgetKind::Frame, None, LayoutStrategy::Flow, nb)
            .unwrap();
        let inspector = Inspector::build(&design, page).unwrap();
        assert_eq!(inspector.layout_heading, LayoutHeading::Notebook);
        assert_eq!(inspector.layout_heading.to_string(), "in a Notebook");
        assert!(inspector.layout.is_empty());
    }

    #[test]
    fn canvas_has_no_inspector() {
        let design = Design::new();
        assert_eq!(
            Inspector::build(&design, WidgetId::CANVAS),
            Err(EditError::CanvasIsFixed)
        );
    }
}
