pub mod emitter;
pub mod error;
pub mod id;
pub mod lint;
pub mod loader;
pub mod model;
pub mod parser;
pub mod policy;
pub mod registry;
pub mod schema;

pub use emitter::{EmitConfig, emit_backup, emit_export};
pub use error::{EditError, LoadError};
pub use id::{Name, WidgetId};
pub use lint::{LintDiagnostic, LintSeverity, lint_design};
pub use loader::load_backup;
pub use model::*;
pub use parser::{WidgetRecord, parse_backup};
pub use policy::{Color, FieldEditor, field_editor};
pub use registry::{Namespace, WidgetKind, list_kinds};
pub use schema::{LayoutStrategy, OptionSpec};
