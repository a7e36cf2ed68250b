//! Error kinds for design edits and backup loading.
//!
//! User-input errors reject one operation and leave the design unchanged.
//! Lookup errors mean the caller broke model discipline (stale id, option
//! the kind does not declare) and are kept apart so a front end can report
//! them differently.

use crate::id::{Name, WidgetId};
use crate::registry::WidgetKind;
use crate::schema::LayoutStrategy;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("You can only add widgets to a Frame or a Notebook ({parent} is a {kind})")]
    NotAContainer { parent: Name, kind: WidgetKind },

    #[error(
        "You must select the same layout method as the other widgets of {parent} \
         (they use {expected}, not {requested})"
    )]
    LayoutMismatch {
        parent: Name,
        expected: LayoutStrategy,
        requested: LayoutStrategy,
    },

    #[error("You can only remove a widget if it has no children ({widget} has {children})")]
    HasChildren { widget: Name, children: usize },

    #[error("A {kind} is a top-level window and cannot be placed on the canvas")]
    TopLevelWindow { kind: WidgetKind },

    #[error("No widget selected")]
    NothingSelected,

    #[error("{widget} is a notebook page; the notebook manages its placement")]
    ManagedByNotebook { widget: Name },

    #[error("unknown widget {0}")]
    UnknownWidget(WidgetId),

    #[error("{kind} has no option `{property}`")]
    UnknownProperty { kind: WidgetKind, property: String },

    #[error("{strategy} layout has no option `{option}`")]
    UnknownLayoutOption {
        strategy: LayoutStrategy,
        option: String,
    },

    #[error("widget {0} already exists")]
    DuplicateWidget(WidgetId),

    #[error("the root canvas cannot be edited or removed")]
    CanvasIsFixed,
}

impl EditError {
    /// True for errors caused by what the user asked for, as opposed to
    /// broken invariants in the caller.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            EditError::NotAContainer { .. }
                | EditError::LayoutMismatch { .. }
                | EditError::HasChildren { .. }
                | EditError::TopLevelWindow { .. }
                | EditError::NothingSelected
                | EditError::ManagedByNotebook { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("unsupported backup version {0}")]
    UnsupportedVersion(u32),

    #[error("line {line}: unknown widget kind `{kind}`")]
    UnknownKind { line: usize, kind: String },

    #[error("line {line}: widget key #{key} is defined twice")]
    DuplicateKey { line: usize, key: u32 },

    #[error("line {line}: parent #{parent} must be defined before its children")]
    UnknownParent { line: usize, parent: u32 },

    #[error("line {line}: {source}")]
    Rejected {
        line: usize,
        #[source]
        source: EditError,
    },
}
