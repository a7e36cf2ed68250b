//! Undo/Redo command stack.
//!
//! Every edit is a `Mutation` whose `apply` hands back the mutation that
//! reverts it. The undo stack holds the mutations that revert past edits;
//! undoing one pushes its own inverse onto the redo stack, so each stack
//! always holds exactly what to apply next.

use log::debug;
use tkf_core::{Design, EditError, WidgetId, WidgetNode};

/// A reversible change to a `Design`.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// Put a widget (back) under `parent`, keeping its id.
    Restore {
        node: Box<WidgetNode>,
        parent: WidgetId,
    },
    /// Remove a childless widget.
    Remove { id: WidgetId },
    SetProperty {
        id: WidgetId,
        property: String,
        value: String,
    },
    SetLayout {
        id: WidgetId,
        option: String,
        value: String,
    },
    Rename { id: WidgetId, name: String },
}

impl Mutation {
    /// Apply to `design`, returning the mutation that undoes it.
    /// On error the design is unchanged.
    pub fn apply(self, design: &mut Design) -> Result<Mutation, EditError> {
        match self {
            Mutation::Restore { node, parent } => {
                let id = node.id;
                design.restore_widget(*node, parent)?;
                Ok(Mutation::Remove { id })
            }
            Mutation::Remove { id } => {
                let parent = design.parent(id).ok_or(EditError::UnknownWidget(id))?;
                let node = design.remove_widget(id)?;
                Ok(Mutation::Restore {
                    node: Box::new(node),
                    parent,
                })
            }
            Mutation::SetProperty {
                id,
                property,
                value,
            } => {
                let previous = design.set_property(id, &property, &value)?;
                Ok(Mutation::SetProperty {
                    id,
                    property,
                    value: previous,
                })
            }
            Mutation::SetLayout { id, option, value } => {
                let previous = design.set_layout_param(id, &option, &value)?;
                Ok(Mutation::SetLayout {
                    id,
                    option,
                    value: previous,
                })
            }
            Mutation::Rename { id, name } => {
                let previous = design.rename(id, &name)?;
                Ok(Mutation::Rename {
                    id,
                    name: previous.as_str().to_string(),
                })
            }
        }
    }
}

/// One undo (or redo) step.
#[derive(Debug, Clone)]
struct Step {
    mutation: Mutation,
    description: String,
}

/// Manages undo/redo stacks for one design.
#[derive(Debug)]
pub struct CommandStack {
    undo_stack: Vec<Step>,
    redo_stack: Vec<Step>,
    /// Maximum undo depth.
    max_depth: usize,
}

impl CommandStack {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::with_capacity(max_depth.min(64)),
            redo_stack: Vec::new(),
            max_depth,
        }
    }

    /// Apply a mutation and make it undoable.
    pub fn execute(
        &mut self,
        design: &mut Design,
        mutation: Mutation,
        description: &str,
    ) -> Result<(), EditError> {
        let inverse = mutation.apply(design)?;
        self.record(inverse, description);
        Ok(())
    }

    /// Record an edit that was already applied, given the mutation that reverts it.
    pub fn record(&mut self, inverse: Mutation, description: &str) {
        debug!("recorded `{description}`");
        self.undo_stack.push(Step {
            mutation: inverse,
            description: description.to_string(),
        });
        if self.undo_stack.len() > self.max_depth {
            self.undo_stack.remove(0);
        }

        // Clear redo stack on new action
        self.redo_stack.clear();
    }

    /// Undo the last edit, returning its description.
    pub fn undo(&mut self, design: &mut Design) -> Result<Option<String>, EditError> {
        let Some(step) = self.undo_stack.pop() else {
            return Ok(None);
        };
        let redo = step.mutation.apply(design)?;
        self.redo_stack.push(Step {
            mutation: redo,
            description: step.description.clone(),
        });
        Ok(Some(step.description))
    }

    /// Redo the last undone edit, returning its description.
    pub fn redo(&mut self, design: &mut Design) -> Result<Option<String>, EditError> {
        let Some(step) = self.redo_stack.pop() else {
            return Ok(None);
        };
        let undo = step.mutation.apply(design)?;
        self.undo_stack.push(Step {
            mutation: undo,
            description: step.description.clone(),
        });
        Ok(Some(step.description))
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Forget all history, e.g. after a new design is loaded.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
