//! Editor session: one design, its selection and its history.
//!
//! Every public method is one atomic commit: it either applies completely
//! or returns an error and leaves the session as it was.

use crate::commands::{CommandStack, Mutation};
use crate::inspector::{ColorPicker, Inspector};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use tkf_core::policy::{Color, is_color, normalize_color};
use tkf_core::{
    Design, EditError, EmitConfig, LayoutStrategy, LoadError, OutlineRow, WidgetId, WidgetKind,
    WidgetNode, emit_backup, emit_export, load_backup,
};

/// Session settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum number of undo steps kept.
    pub undo_depth: usize,
    /// Layout mode selected when the editor opens.
    pub layout_mode: LayoutStrategy,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            undo_depth: 100,
            layout_mode: LayoutStrategy::Absolute,
        }
    }
}

pub struct Session {
    design: Design,
    selection: Option<WidgetId>,
    /// The globally selected layout mode new widgets get by default.
    layout_mode: LayoutStrategy,
    commands: CommandStack,
}

impl Session {
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            design: Design::new(),
            selection: None,
            layout_mode: config.layout_mode,
            commands: CommandStack::new(config.undo_depth),
        }
    }

    /// Start editing an existing design.
    pub fn with_design(design: Design) -> Self {
        Self {
            design,
            ..Self::new()
        }
    }

    pub fn design(&self) -> &Design {
        &self.design
    }

    pub fn outline(&self) -> Vec<OutlineRow> {
        self.design.outline()
    }

    // ─── Selection ───────────────────────────────────────────────────────

    pub fn selection(&self) -> Option<WidgetId> {
        self.selection
    }

    /// Select a widget; selecting the selected widget clears the selection.
    pub fn select(&mut self, id: WidgetId) -> Result<Option<WidgetId>, EditError> {
        if id.is_canvas() {
            return Err(EditError::CanvasIsFixed);
        }
        if !self.design.contains(id) {
            return Err(EditError::UnknownWidget(id));
        }
        self.selection = if self.selection == Some(id) {
            None
        } else {
            Some(id)
        };
        Ok(self.selection)
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    fn selected(&self) -> Result<WidgetId, EditError> {
        self.selection.ok_or_else(|| rejected(EditError::NothingSelected))
    }

    /// The editable surface of the selection, if any.
    pub fn inspector(&self) -> Option<Inspector> {
        let id = self.selection?;
        Inspector::build(&self.design, id).ok()
    }

    pub fn layout_mode(&self) -> LayoutStrategy {
        self.layout_mode
    }

    pub fn set_layout_mode(&mut self, mode: LayoutStrategy) {
        self.layout_mode = mode;
    }

    // ─── Tree edits ──────────────────────────────────────────────────────

    /// Add a widget the way the palette does.
    ///
    /// An empty `name` gets the default `<Kind><id>`, a missing strategy
    /// falls back to the global layout mode and a missing parent to the
    /// selection, then the canvas. Kinds with a `text` option show their
    /// name until it is edited.
    pub fn add_widget(
        &mut self,
        kind: WidgetKind,
        name: &str,
        strategy: Option<LayoutStrategy>,
        parent: Option<WidgetId>,
    ) -> Result<WidgetId, EditError> {
        let parent = parent.or(self.selection).unwrap_or(WidgetId::CANVAS);
        let strategy = strategy.unwrap_or(self.layout_mode);
        let name = Some(name).filter(|n| !n.is_empty());

        let id = self
            .design
            .add_widget(kind, name, strategy, parent)
            .map_err(rejected)?;
        let display = self.design.widget(id)?.name;
        if self.design.widget(id)?.property("text").is_some() {
            self.design.set_property(id, "text", display.as_str())?;
        }

        self.commands
            .record(Mutation::Remove { id }, &format!("Add {display}"));
        Ok(id)
    }

    /// Remove the selected widget. Only childless widgets can be removed.
    pub fn remove_selected(&mut self) -> Result<WidgetNode, EditError> {
        let id = self.selected()?;
        let parent = self.design.parent(id).ok_or(EditError::UnknownWidget(id))?;
        let node = self.design.remove_widget(id).map_err(rejected)?;

        self.commands.record(
            Mutation::Restore {
                node: Box::new(node.clone()),
                parent,
            },
            &format!("Remove {}", node.name),
        );
        self.selection = None;
        Ok(node)
    }

    // ─── Inspector commits ───────────────────────────────────────────────

    pub fn commit_property(&mut self, property: &str, value: &str) -> Result<(), EditError> {
        let id = self.selected()?;
        let mutation = Mutation::SetProperty {
            id,
            property: property.to_string(),
            value: value.to_string(),
        };
        self.commands
            .execute(&mut self.design, mutation, &format!("Set {property}"))
            .map_err(rejected)
    }

    pub fn commit_layout(&mut self, option: &str, value: &str) -> Result<(), EditError> {
        let id = self.selected()?;
        let mutation = Mutation::SetLayout {
            id,
            option: option.to_string(),
            value: value.to_string(),
        };
        self.commands
            .execute(&mut self.design, mutation, &format!("Set {option}"))
            .map_err(rejected)
    }

    pub fn commit_name(&mut self, name: &str) -> Result<(), EditError> {
        let id = self.selected()?;
        let mutation = Mutation::Rename {
            id,
            name: name.to_string(),
        };
        self.commands
            .execute(&mut self.design, mutation, "Rename")
            .map_err(rejected)
    }

    /// Let the user pick a colour for `property` of the selection.
    ///
    /// Returns the committed value, or `None` when `property` is not a
    /// colour or the dialog was cancelled.
    pub fn pick_color(
        &mut self,
        property: &str,
        picker: &mut impl ColorPicker,
    ) -> Result<Option<String>, EditError> {
        let id = self.selected()?;
        if !is_color(property) {
            return Ok(None);
        }
        let initial = self
            .design
            .widget(id)?
            .property(property)
            .and_then(Color::from_hex);
        let Some(chosen) = picker.pick(initial) else {
            return Ok(None);
        };

        let value = normalize_color(&chosen);
        self.commit_property(property, &value)?;
        Ok(Some(value))
    }

    // ─── History ─────────────────────────────────────────────────────────

    pub fn undo(&mut self) -> Result<Option<String>, EditError> {
        let description = self.commands.undo(&mut self.design)?;
        self.prune_selection();
        Ok(description)
    }

    pub fn redo(&mut self) -> Result<Option<String>, EditError> {
        let description = self.commands.redo(&mut self.design)?;
        self.prune_selection();
        Ok(description)
    }

    pub fn can_undo(&self) -> bool {
        self.commands.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.commands.can_redo()
    }

    fn prune_selection(&mut self) {
        if self.selection.is_some_and(|id| !self.design.contains(id)) {
            self.selection = None;
        }
    }

    // ─── Artifacts ───────────────────────────────────────────────────────

    /// Replace the design with the one stored in `text`.
    ///
    /// The new design is built aside and only swapped in once it loaded
    /// completely; on error the session is untouched.
    pub fn open_backup(&mut self, text: &str) -> Result<(), LoadError> {
        let design = load_backup(text).inspect_err(|e| warn!("backup rejected: {e}"))?;
        info!("opened design with {} widgets", design.len());
        self.design = design;
        self.selection = None;
        self.commands.clear();
        Ok(())
    }

    pub fn export(&self, config: &EmitConfig) -> String {
        emit_export(&self.design, config)
    }

    pub fn backup(&self) -> String {
        emit_backup(&self.design)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Log edits refused because of what the user asked for.
fn rejected(err: EditError) -> EditError {
    if err.is_user_error() {
        warn!("{err}");
    }
    err
}
