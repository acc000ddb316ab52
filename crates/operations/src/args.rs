//! Schema-driven argument parsing.
//!
//! Operations receive one free-text argument. A schema names the fields,
//! their order and their types; parsing either yields typed values or an
//! [`ArgumentError`] that the operation renders as text without ever
//! calling the backend.
//!
//! Positional schemas split on commas and trim each piece. Fewer pieces
//! than fields is a usage error; extra trailing pieces are ignored.

use flightdesk_core::{FieldKind, FieldSpec};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    /// The argument does not have the expected shape.
    #[error("{usage}")]
    Usage { usage: &'static str },

    /// A typed field could not be converted.
    #[error("field `{field}` expects an integer, got `{value}` ({reason})")]
    Coercion {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("field `{0}` is not part of the schema")]
    UnknownField(&'static str),
}

impl ArgumentError {
    /// Text handed back to the planner.
    ///
    /// Usage errors are the bare usage hint; everything else carries the
    /// operation's error prefix.
    pub fn render(&self, prefix: &str) -> String {
        match self {
            ArgumentError::Usage { usage } => (*usage).to_string(),
            other => format!("{prefix}: {other}"),
        }
    }
}

/// A parsed, typed field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Flag(bool),
}

/// Ordered field list plus the hint shown when the shape is wrong.
#[derive(Debug, Clone, Copy)]
pub struct ArgumentSchema {
    pub fields: &'static [FieldSpec],
    pub usage: &'static str,
}

impl ArgumentSchema {
    pub const fn new(fields: &'static [FieldSpec], usage: &'static str) -> Self {
        Self { fields, usage }
    }

    /// Parse a comma-separated argument against this schema.
    pub fn parse(&self, argument: &str) -> Result<ParsedArgs, ArgumentError> {
        let parts: Vec<&str> = argument.split(',').collect();
        if parts.len() < self.fields.len() {
            return Err(ArgumentError::Usage { usage: self.usage });
        }

        let values = self
            .fields
            .iter()
            .zip(parts)
            .map(|(spec, raw)| coerce(spec, raw.trim()).map(|v| (spec.name, v)))
            .collect::<Result<Vec<_>, ArgumentError>>()?;

        Ok(ParsedArgs { values })
    }
}

fn coerce(spec: &FieldSpec, raw: &str) -> Result<FieldValue, ArgumentError> {
    match spec.kind {
        FieldKind::Text => Ok(FieldValue::Text(raw.to_string())),
        FieldKind::Integer => raw
            .parse::<i64>()
            .map(FieldValue::Integer)
            .map_err(|e| ArgumentError::Coercion {
                field: spec.name,
                value: raw.to_string(),
                reason: e.to_string(),
            }),
        FieldKind::Flag => Ok(FieldValue::Flag(parse_flag(raw))),
    }
}

/// `true` iff the trimmed, lower-cased text is exactly `"true"`.
pub fn parse_flag(raw: &str) -> bool {
    raw.trim().to_lowercase() == "true"
}

/// Typed values by field name.
#[derive(Debug, Clone)]
pub struct ParsedArgs {
    values: Vec<(&'static str, FieldValue)>,
}

impl ParsedArgs {
    fn value(&self, name: &'static str) -> Result<&FieldValue, ArgumentError> {
        self.values
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
            .ok_or(ArgumentError::UnknownField(name))
    }

    pub fn text(&self, name: &'static str) -> Result<String, ArgumentError> {
        match self.value(name)? {
            FieldValue::Text(s) => Ok(s.clone()),
            _ => Err(ArgumentError::UnknownField(name)),
        }
    }

    pub fn integer(&self, name: &'static str) -> Result<i64, ArgumentError> {
        match self.value(name)? {
            FieldValue::Integer(n) => Ok(*n),
            _ => Err(ArgumentError::UnknownField(name)),
        }
    }

    pub fn flag(&self, name: &'static str) -> Result<bool, ArgumentError> {
        match self.value(name)? {
            FieldValue::Flag(b) => Ok(*b),
            _ => Err(ArgumentError::UnknownField(name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: &[FieldSpec] = &[
        FieldSpec::text("name"),
        FieldSpec::integer("count"),
        FieldSpec::flag("enabled"),
    ];
    const SCHEMA: ArgumentSchema = ArgumentSchema::new(FIELDS, "Format: name, count, enabled");

    #[test]
    fn parses_and_trims_typed_fields() {
        let args = SCHEMA.parse("  widget ,  42 , TRUE ").unwrap();
        assert_eq!(args.text("name").unwrap(), "widget");
        assert_eq!(args.integer("count").unwrap(), 42);
        assert!(args.flag("enabled").unwrap());
    }

    #[test]
    fn too_few_fields_is_usage_error() {
        let err = SCHEMA.parse("widget, 42").unwrap_err();
        assert_eq!(
            err,
            ArgumentError::Usage {
                usage: "Format: name, count, enabled"
            }
        );
        assert_eq!(err.render("Widget error"), "Format: name, count, enabled");
    }

    #[test]
    fn empty_argument_is_usage_error() {
        assert!(matches!(
            SCHEMA.parse("").unwrap_err(),
            ArgumentError::Usage { .. }
        ));
    }

    #[test]
    fn extra_fields_are_ignored() {
        let args = SCHEMA.parse("widget, 1, false, surplus, more").unwrap();
        assert_eq!(args.text("name").unwrap(), "widget");
        assert!(!args.flag("enabled").unwrap());
    }

    #[test]
    fn bad_integer_is_coercion_error() {
        let err = SCHEMA.parse("widget, lots, true").unwrap_err();
        match &err {
            ArgumentError::Coercion { field, value, .. } => {
                assert_eq!(*field, "count");
                assert_eq!(value, "lots");
            }
            other => panic!("expected coercion error, got {other:?}"),
        }
        let text = err.render("Widget error");
        assert!(text.starts_with("Widget error: field `count`"));
        assert!(text.contains("`lots`"));
    }

    #[test]
    fn signed_integers_parse() {
        let args = SCHEMA.parse("w, -3, x").unwrap();
        assert_eq!(args.integer("count").unwrap(), -3);
        let args = SCHEMA.parse("w, +7, x").unwrap();
        assert_eq!(args.integer("count").unwrap(), 7);
    }

    #[test]
    fn integers_beyond_32_bits_parse() {
        let args = SCHEMA.parse("w, 3000000000, x").unwrap();
        assert_eq!(args.integer("count").unwrap(), 3_000_000_000);
        let err = SCHEMA.parse("w, 99999999999999999999, x").unwrap_err();
        assert!(matches!(err, ArgumentError::Coercion { field: "count", .. }));
    }

    #[test]
    fn flag_normalisation() {
        assert!(parse_flag("true"));
        assert!(parse_flag(" TRUE "));
        assert!(parse_flag("True"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag("yes"));
        assert!(!parse_flag("1"));
        assert!(!parse_flag(""));
    }

    #[test]
    fn wrong_getter_is_reported() {
        let args = SCHEMA.parse("w, 1, true").unwrap();
        assert_eq!(
            args.integer("name").unwrap_err(),
            ArgumentError::UnknownField("name")
        );
        assert_eq!(
            args.text("missing").unwrap_err(),
            ArgumentError::UnknownField("missing")
        );
    }
}
