pub mod commands;
pub mod inspector;
pub mod session;

pub use commands::{CommandStack, Mutation};
pub use inspector::{ColorPicker, Field, Inspector, LayoutHeading};
pub use session::{EditorConfig, Session};
