//! Field type references.
//!
//! A [`TypeRef`] is a closed, recursively-parametrized tag: scalar kinds,
//! named references (DTOs, enums, the standard error), and the four
//! container kinds that wrap another type.

use serde::{Deserialize, Serialize};

/// The type of a field, as resolved by the definition parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TypeRef {
    /// UTF-8 text.
    String,
    /// Binary data, carried as base64 text on the wire.
    Bytes,
    /// `true` or `false`.
    Boolean,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// Double-precision floating point.
    Double,
    /// Decimal number.
    Decimal,
    /// Arbitrary JSON object.
    Object,
    /// The standard service error.
    Error,
    /// Reference to a DTO by name.
    Dto {
        /// DTO name.
        name: String,
    },
    /// Reference to an enum by name.
    Enum {
        /// Enum name.
        name: String,
    },
    /// A value-or-error result.
    Result {
        /// Type of the success value.
        value: Box<TypeRef>,
    },
    /// An ordered list.
    Array {
        /// Type of each item.
        value: Box<TypeRef>,
    },
    /// A map keyed by string.
    Map {
        /// Type of each value.
        value: Box<TypeRef>,
    },
    /// A value that may be explicitly null.
    Nullable {
        /// Type of the non-null value.
        value: Box<TypeRef>,
    },
}

impl TypeRef {
    /// Reference to the named DTO.
    pub fn dto(name: impl Into<String>) -> Self {
        TypeRef::Dto { name: name.into() }
    }

    /// Reference to the named enum.
    pub fn enumeration(name: impl Into<String>) -> Self {
        TypeRef::Enum { name: name.into() }
    }

    /// `result<value>`
    pub fn result(value: TypeRef) -> Self {
        TypeRef::Result {
            value: Box::new(value),
        }
    }

    /// `value[]`
    pub fn array(value: TypeRef) -> Self {
        TypeRef::Array {
            value: Box::new(value),
        }
    }

    /// `map<value>`
    pub fn map(value: TypeRef) -> Self {
        TypeRef::Map {
            value: Box::new(value),
        }
    }

    /// `nullable<value>`
    pub fn nullable(value: TypeRef) -> Self {
        TypeRef::Nullable {
            value: Box::new(value),
        }
    }

    /// Short name of the kind tag, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            TypeRef::String => "string",
            TypeRef::Bytes => "bytes",
            TypeRef::Boolean => "boolean",
            TypeRef::Int32 => "int32",
            TypeRef::Int64 => "int64",
            TypeRef::Double => "double",
            TypeRef::Decimal => "decimal",
            TypeRef::Object => "object",
            TypeRef::Error => "error",
            TypeRef::Dto { .. } => "dto",
            TypeRef::Enum { .. } => "enum",
            TypeRef::Result { .. } => "result",
            TypeRef::Array { .. } => "array",
            TypeRef::Map { .. } => "map",
            TypeRef::Nullable { .. } => "nullable",
        }
    }

    /// Check if this is the boolean kind.
    pub fn is_boolean(&self) -> bool {
        matches!(self, TypeRef::Boolean)
    }
}
