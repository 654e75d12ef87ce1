//! Scalar value codecs for URI, query and header slots.
//!
//! Each codec maps a scalar kind and a target-language value expression to
//! another expression:
//! - `to_uri_component`: value to percent-encoded URI text
//! - `parse_from_text`: captured text to value
//! - `to_header_text`: value to header text
//!
//! Only the kinds in [`ScalarKind`] can occupy these slots. Everything else is
//! rejected with a [`SlotKindError`] when the kind is resolved.

use httpgen_model::TypeRef;

use crate::options::Dialect;

/// A non-scalar kind was bound to a URI or header slot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} values cannot be carried in a URI or header slot")]
pub struct SlotKindError {
    /// Kind name of the rejected type.
    pub kind: &'static str,
}

/// A field kind that can be carried as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind<'a> {
    /// UTF-8 text.
    String,
    /// Base64 text.
    Bytes,
    /// `true` or `false`.
    Boolean,
    /// 32-bit integer.
    Int32,
    /// 64-bit integer.
    Int64,
    /// Floating point.
    Double,
    /// Decimal number.
    Decimal,
    /// Value of the named enum.
    Enum(&'a str),
}

impl<'a> ScalarKind<'a> {
    /// Resolve the scalar kind of a field type.
    pub fn from_type(ty: &'a TypeRef) -> Result<Self, SlotKindError> {
        match ty {
            TypeRef::String => Ok(ScalarKind::String),
            TypeRef::Bytes => Ok(ScalarKind::Bytes),
            TypeRef::Boolean => Ok(ScalarKind::Boolean),
            TypeRef::Int32 => Ok(ScalarKind::Int32),
            TypeRef::Int64 => Ok(ScalarKind::Int64),
            TypeRef::Double => Ok(ScalarKind::Double),
            TypeRef::Decimal => Ok(ScalarKind::Decimal),
            TypeRef::Enum { name } => Ok(ScalarKind::Enum(name)),
            TypeRef::Object
            | TypeRef::Error
            | TypeRef::Dto { .. }
            | TypeRef::Result { .. }
            | TypeRef::Array { .. }
            | TypeRef::Map { .. }
            | TypeRef::Nullable { .. } => Err(SlotKindError {
                kind: ty.kind_name(),
            }),
        }
    }

    /// Expression percent-encoding `value` for a path or query slot.
    pub fn to_uri_component(self, value: &str) -> String {
        match self {
            ScalarKind::String | ScalarKind::Bytes | ScalarKind::Enum(_) => {
                format!("encodeURIComponent({value})")
            }
            ScalarKind::Boolean | ScalarKind::Int32 | ScalarKind::Int64 | ScalarKind::Decimal => {
                format!("{value}.toString()")
            }
            // exponent and locale characters
            ScalarKind::Double => format!("encodeURIComponent({value}.toString())"),
        }
    }

    /// Expression parsing captured `text` into a value of this kind.
    pub fn parse_from_text(self, text: &str, dialect: Dialect) -> String {
        match self {
            ScalarKind::String | ScalarKind::Bytes => text.to_string(),
            ScalarKind::Enum(name) if dialect.is_typed() => format!("{text} as {name}"),
            ScalarKind::Enum(_) => text.to_string(),
            ScalarKind::Boolean => format!("{PARSE_BOOLEAN}({text})"),
            ScalarKind::Int32 | ScalarKind::Int64 => format!("parseInt({text}, 10)"),
            ScalarKind::Double | ScalarKind::Decimal => format!("parseFloat({text})"),
        }
    }

    /// Expression rendering `value` as header text.
    pub fn to_header_text(self, value: &str) -> String {
        match self {
            ScalarKind::String | ScalarKind::Bytes | ScalarKind::Enum(_) => value.to_string(),
            ScalarKind::Boolean
            | ScalarKind::Int32
            | ScalarKind::Int64
            | ScalarKind::Double
            | ScalarKind::Decimal => format!("{value}.toString()"),
        }
    }

    /// Whether parsing this kind calls the [`Helper::ParseBoolean`] helper.
    pub fn needs_parse_boolean(self) -> bool {
        matches!(self, ScalarKind::Boolean)
    }

    /// Enum type name, if this is an enum kind.
    pub fn enum_name(self) -> Option<&'a str> {
        match self {
            ScalarKind::Enum(name) => Some(name),
            _ => None,
        }
    }
}

const PARSE_BOOLEAN: &str = "parseBoolean";

/// Module-level helper functions referenced by generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Helper {
    /// Case-insensitive tri-state boolean parse.
    ParseBoolean,
}

impl Helper {
    /// Source of the helper in the given dialect.
    pub fn source(self, dialect: Dialect) -> &'static str {
        match (self, dialect) {
            (Helper::ParseBoolean, Dialect::TypeScript) => PARSE_BOOLEAN_TS,
            (Helper::ParseBoolean, Dialect::JavaScript) => PARSE_BOOLEAN_JS,
        }
    }
}

const PARSE_BOOLEAN_TS: &str = "function parseBoolean(value: string | undefined): boolean | undefined {
\tif (typeof value === 'string') {
\t\tconst lowerValue = value.toLowerCase();
\t\tif (lowerValue === 'true') {
\t\t\treturn true;
\t\t}
\t\tif (lowerValue === 'false') {
\t\t\treturn false;
\t\t}
\t}
\treturn undefined;
}";

const PARSE_BOOLEAN_JS: &str = "function parseBoolean(value) {
\tif (typeof value === 'string') {
\t\tconst lowerValue = value.toLowerCase();
\t\tif (lowerValue === 'true') {
\t\t\treturn true;
\t\t}
\t\tif (lowerValue === 'false') {
\t\t\treturn false;
\t\t}
\t}
\treturn undefined;
}";
