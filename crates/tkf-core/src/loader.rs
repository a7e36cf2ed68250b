//! Project loader: Backup text → fresh `Design`.
//!
//! Records are replayed through the normal model operations, so a backup
//! can never produce a tree the editor itself would have refused. Serialized
//! keys are mapped to the ids the new design mints; nothing relies on the
//! two numbering schemes lining up.

use crate::error::{EditError, LoadError};
use crate::id::WidgetId;
use crate::model::Design;
use crate::parser::parse_backup;
use log::info;
use std::collections::HashMap;

/// Build a new design from Backup text.
///
/// On error nothing is returned; callers keep whatever design they had.
pub fn load_backup(text: &str) -> Result<Design, LoadError> {
    let records = parse_backup(text)?;
    let mut design = Design::new();
    let mut keys: HashMap<u32, WidgetId> = HashMap::with_capacity(records.len());

    for record in &records {
        let line = record.line;
        if keys.contains_key(&record.key) {
            return Err(LoadError::DuplicateKey {
                line,
                key: record.key,
            });
        }
        let parent = match record.parent {
            None => WidgetId::CANVAS,
            Some(key) => *keys
                .get(&key)
                .ok_or(LoadError::UnknownParent { line, parent: key })?,
        };

        let id = design
            .add_widget(record.kind, Some(record.name.as_str()), record.strategy, parent)
            .map_err(rejected(line))?;
        if record.name.is_empty() {
            design.rename(id, "").map_err(rejected(line))?;
        }
        for setting in &record.properties {
            design
                .set_property(id, &setting.name, &setting.value)
                .map_err(rejected(setting.line))?;
        }
        for setting in &record.layout {
            design
                .set_layout_param(id, &setting.name, &setting.value)
                .map_err(rejected(setting.line))?;
        }
        keys.insert(record.key, id);
    }

    info!("loaded backup with {} widgets", design.len());
    Ok(design)
}

fn rejected(line: usize) -> impl Fn(EditError) -> LoadError {
    move |source| LoadError::Rejected { line, source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::WidgetKind;
    use crate::schema::LayoutStrategy;

    #[test]
    fn keys_are_remapped() {
        // Keys need not match the ids the new design mints.
        let text = "version 1\n\
            widget #40 Frame \"outer\" in root grid {}\n\
            widget #7 Label \"caption\" in #40 pack {\n  text: \"Hi\"\n}\n";
        let design = load_backup(text).unwrap();

        let outer = design.find_by_name("outer").unwrap();
        let caption = design.find_by_name("caption").unwrap();
        assert_eq!(outer, WidgetId::new(1));
        assert_eq!(caption, WidgetId::new(2));
        assert_eq!(design.parent(caption), Some(outer));
        assert_eq!(design.get(outer).unwrap().strategy, LayoutStrategy::Grid);
        assert_eq!(design.get(caption).unwrap().property("text"), Some("Hi"));
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let text = "version 1\n\
            widget #1 Frame \"a\" in root pack {}\n\
            widget #1 Frame \"b\" in root pack {}\n";
        assert_eq!(
            load_backup(text).unwrap_err(),
            LoadError::DuplicateKey { line: 3, key: 1 }
        );
    }

    #[test]
    fn parents_must_come_first() {
        let text = "version 1\n\
            widget #2 Label \"child\" in #1 pack {}\n\
            widget #1 Frame \"parent\" in root pack {}\n";
        assert_eq!(
            load_backup(text).unwrap_err(),
            LoadError::UnknownParent { line: 2, parent: 1 }
        );
    }

    #[test]
    fn model_rules_are_rechecked() {
        let mismatch = "version 1\n\
            widget #1 Frame \"a\" in root place {}\n\
            widget #2 Frame \"b\" in root grid {}\n";
        assert!(matches!(
            load_backup(mismatch),
            Err(LoadError::Rejected {
                line: 3,
                source: EditError::LayoutMismatch { .. }
            })
        ));

        let not_container = "version 1\n\
            widget #1 Button \"b\" in root pack {}\n\
            widget #2 Label \"l\" in #1 pack {}\n";
        assert!(matches!(
            load_backup(not_container),
            Err(LoadError::Rejected {
                line: 3,
                source: EditError::NotAContainer { .. }
            })
        ));

        let menu = "version 1\n\
            widget #1 Menu \"bar\" in root pack {}\n";
        assert!(matches!(
            load_backup(menu),
            Err(LoadError::Rejected {
                line: 2,
                source: EditError::TopLevelWindow {
                    kind: WidgetKind::Menu
                }
            })
        ));

        let bad_option = "version 1\n\
            widget #1 Frame \"a\" in root pack {\n  text: \"x\"\n}\n";
        assert!(matches!(
            load_backup(bad_option),
            Err(LoadError::Rejected {
                line: 3,
                source: EditError::UnknownProperty {
                    kind: WidgetKind::Frame,
                    ..
                }
            })
        ));
    }

    #[test]
    fn empty_names_survive() {
        let text = "version 1\nwidget #1 Label \"\" in root pack {}\n";
        let design = load_backup(text).unwrap();
        let node = design.widgets().next().unwrap();
        assert_eq!(node.name.as_str(), "");
    }
}
