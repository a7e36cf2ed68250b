//! Parser for the Backup format → widget records.
//!
//! Built on `winnow` 0.7. The parser only checks syntax and resolves kind
//! and manager names; tree rules are left to the loader, which replays the
//! records through the model.

use crate::emitter::BACKUP_VERSION;
use crate::error::LoadError;
use crate::registry::WidgetKind;
use crate::schema::LayoutStrategy;
use winnow::ascii::{digit1, space0, space1};
use winnow::combinator::{alt, preceded};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::{any, take_till, take_while};

/// One `name: "value"` line inside a widget record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setting {
    pub line: usize,
    pub name: String,
    pub value: String,
}

/// One `widget` record, as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetRecord {
    /// Line of the `widget` keyword.
    pub line: usize,
    /// Serialized key, unique within one file.
    pub key: u32,
    pub kind: WidgetKind,
    pub name: String,
    /// Key of the container, `None` for the root canvas.
    pub parent: Option<u32>,
    pub strategy: LayoutStrategy,
    pub properties: Vec<Setting>,
    pub layout: Vec<Setting>,
}

/// Parse Backup text into records, in file order.
pub fn parse_backup(input: &str) -> Result<Vec<WidgetRecord>, LoadError> {
    let mut rest = input;
    let cursor = Cursor { full: input };

    skip_ws_and_comments(&mut rest);
    let at = rest;
    let version = parse_version
        .parse_next(&mut rest)
        .map_err(|_| cursor.syntax(at, "expected `version <number>`"))?;
    if version != BACKUP_VERSION {
        return Err(LoadError::UnsupportedVersion(version));
    }
    cursor.end_of_line(&mut rest)?;

    let mut records = Vec::new();
    skip_ws_and_comments(&mut rest);
    while !rest.is_empty() {
        records.push(cursor.record(&mut rest)?);
        skip_ws_and_comments(&mut rest);
    }
    Ok(records)
}

// ─── Records ─────────────────────────────────────────────────────────────

/// Keeps the whole input around to turn positions into line numbers.
struct Cursor<'a> {
    full: &'a str,
}

impl<'a> Cursor<'a> {
    fn line(&self, at: &str) -> usize {
        let offset = self.full.len() - at.len();
        self.full[..offset].matches('\n').count() + 1
    }

    fn syntax(&self, at: &str, message: impl Into<String>) -> LoadError {
        LoadError::Syntax {
            line: self.line(at),
            message: message.into(),
        }
    }

    /// Only blanks or a comment may follow on the current line.
    fn end_of_line(&self, rest: &mut &'a str) -> Result<(), LoadError> {
        skip_space(rest);
        if rest.is_empty() || rest.starts_with('\n') || rest.starts_with('#') {
            return Ok(());
        }
        if let Some(stripped) = rest.strip_prefix("\r\n") {
            *rest = stripped;
            return Ok(());
        }
        Err(self.syntax(*rest, "unexpected text after value"))
    }

    fn record(&self, rest: &mut &'a str) -> Result<WidgetRecord, LoadError> {
        let at = *rest;
        let line = self.line(at);
        let head = parse_head.parse_next(rest).map_err(|_| {
            self.syntax(
                at,
                "expected `widget #<key> <Kind> \"<name>\" in <root|#key> <place|grid|pack> {`",
            )
        })?;

        let kind = WidgetKind::from_name(head.kind).ok_or_else(|| LoadError::UnknownKind {
            line,
            kind: head.kind.to_string(),
        })?;
        let strategy = LayoutStrategy::from_manager(head.manager)
            .ok_or_else(|| self.syntax(at, format!("unknown layout manager `{}`", head.manager)))?;

        let mut record = WidgetRecord {
            line,
            key: head.key,
            kind,
            name: head.name,
            parent: head.parent,
            strategy,
            properties: Vec::new(),
            layout: Vec::new(),
        };

        loop {
            skip_ws_and_comments(rest);
            if let Some(after) = rest.strip_prefix('}') {
                *rest = after;
                self.end_of_line(rest)?;
                return Ok(record);
            }
            if rest.is_empty() {
                return Err(self.syntax(*rest, format!("widget #{} is missing `}}`", head.key)));
            }

            let at = *rest;
            let (manager, name, value) = parse_setting
                .parse_next(rest)
                .map_err(|_| self.syntax(at, "expected `<option>: \"<value>\"`"))?;
            let setting = Setting {
                line: self.line(at),
                name: name.to_string(),
                value,
            };
            match manager {
                None => record.properties.push(setting),
                Some(m) if m == strategy.manager() => record.layout.push(setting),
                Some(m) => {
                    return Err(self.syntax(
                        at,
                        format!("`{m}` option on a widget placed with `{}`", strategy.manager()),
                    ));
                }
            }
            if !rest.starts_with('}') {
                self.end_of_line(rest)?;
            }
        }
    }
}

struct Head<'a> {
    key: u32,
    kind: &'a str,
    name: String,
    parent: Option<u32>,
    manager: &'a str,
}

// ─── Low-level parsers ───────────────────────────────────────────────────

fn skip_ws_and_comments(input: &mut &str) {
    loop {
        *input = input.trim_start();
        if !input.starts_with('#') {
            break;
        }
        match input.find('\n') {
            Some(pos) => *input = &input[pos + 1..],
            None => *input = "",
        }
    }
}

/// Consume optional blanks (concrete error type avoids inference issues).
fn skip_space(input: &mut &str) {
    let _: Result<&str, ErrMode<ContextError>> = space0.parse_next(input);
}

fn parse_identifier<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_').parse_next(input)
}

fn parse_u32(input: &mut &str) -> ModalResult<u32> {
    digit1.try_map(str::parse::<u32>).parse_next(input)
}

fn parse_key(input: &mut &str) -> ModalResult<u32> {
    preceded('#', parse_u32).parse_next(input)
}

fn parse_version(input: &mut &str) -> ModalResult<u32> {
    preceded(("version", space1), parse_u32).parse_next(input)
}

/// A double-quoted string with `\\`, `\"`, `\n`, `\r` and `\t` escapes.
fn parse_quoted(input: &mut &str) -> ModalResult<String> {
    '"'.parse_next(input)?;
    let mut out = String::new();
    loop {
        let chunk: &str = take_till(0.., ['"', '\\', '\n']).parse_next(input)?;
        out.push_str(chunk);
        match any.parse_next(input)? {
            '"' => return Ok(out),
            '\\' => {
                let escaped = match any.parse_next(input)? {
                    'n' => '\n',
                    'r' => '\r',
                    't' => '\t',
                    '\\' => '\\',
                    '"' => '"',
                    _ => return Err(ErrMode::Cut(ContextError::new())),
                };
                out.push(escaped);
            }
            // Strings never span lines.
            _ => return Err(ErrMode::Cut(ContextError::new())),
        }
    }
}

fn parse_head<'a>(input: &mut &'a str) -> ModalResult<Head<'a>> {
    ("widget", space1).parse_next(input)?;
    let key = parse_key.parse_next(input)?;
    space1.parse_next(input)?;
    let kind = parse_identifier.parse_next(input)?;
    space1.parse_next(input)?;
    let name = parse_quoted.parse_next(input)?;
    (space1, "in", space1).parse_next(input)?;
    let parent = alt(("root".value(None), parse_key.map(Some))).parse_next(input)?;
    space1.parse_next(input)?;
    let manager = parse_identifier.parse_next(input)?;
    (space0, '{').parse_next(input)?;
    Ok(Head {
        key,
        kind,
        name,
        parent,
        manager,
    })
}

/// `name: "value"` or `manager name: "value"`.
fn parse_setting<'a>(input: &mut &'a str) -> ModalResult<(Option<&'a str>, &'a str, String)> {
    let first = parse_identifier.parse_next(input)?;
    skip_space(input);
    let (manager, name) = if input.starts_with(':') {
        (None, first)
    } else {
        (Some(first), parse_identifier.parse_next(input)?)
    };
    (space0, ':', space0).parse_next(input)?;
    let value = parse_quoted.parse_next(input)?;
    Ok((manager, name, value))
}
