//! TypeScript type expressions and the mapping from field types to them.
//!
//! - `TsType`: type expressions (primitives, arrays, unions, records, references)
//! - `TsImport`: import declarations
//! - `render_type`: the field-type to type-expression mapping

use std::collections::BTreeSet;

use httpgen_model::TypeRef;

/// Name of the runtime result wrapper type.
pub const SERVICE_RESULT: &str = "IServiceResult";

/// Name of the runtime error type.
pub const SERVICE_ERROR: &str = "IServiceError";

/// TypeScript type representation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsType {
    /// Primitive types: string, number, boolean, null, unknown
    Primitive(TsPrimitive),
    /// Array type: T[]
    Array(Box<TsType>),
    /// Union type: A | B
    Union(Vec<TsType>),
    /// Record type: Record<K, V>
    Record {
        key: Box<TsType>,
        value: Box<TsType>,
    },
    /// Generic instantiation: Name<A, B>
    Generic { name: String, args: Vec<TsType> },
    /// Named type reference
    Ref(String),
}

/// TypeScript primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsPrimitive {
    String,
    Number,
    Boolean,
    Null,
    Unknown,
}

impl TsType {
    /// Collect every named type this expression refers to.
    pub fn collect_refs(&self, out: &mut BTreeSet<String>) {
        match self {
            TsType::Primitive(_) => {}
            TsType::Array(inner) => inner.collect_refs(out),
            TsType::Union(types) => types.iter().for_each(|t| t.collect_refs(out)),
            TsType::Record { key, value } => {
                key.collect_refs(out);
                value.collect_refs(out);
            }
            TsType::Generic { name, args } => {
                out.insert(name.clone());
                args.iter().for_each(|t| t.collect_refs(out));
            }
            TsType::Ref(name) => {
                out.insert(name.clone());
            }
        }
    }
}

/// Import declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsImport {
    /// Default import binding (`import express from 'express'`)
    pub default_item: Option<String>,
    /// Names to import, in first-seen order
    pub items: Vec<String>,
    /// Module path
    pub from: String,
    /// Whether this is a type-only import
    pub type_only: bool,
}

impl TsImport {
    /// A value import.
    pub fn values(from: impl Into<String>, items: &[&str]) -> Self {
        Self {
            default_item: None,
            items: items.iter().map(|s| (*s).to_string()).collect(),
            from: from.into(),
            type_only: false,
        }
    }

    /// A default import.
    pub fn default_value(from: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            default_item: Some(name.into()),
            ..Self::values(from, &[])
        }
    }

    /// A type-only import.
    pub fn types(from: impl Into<String>, items: &[&str]) -> Self {
        Self {
            type_only: true,
            ..Self::values(from, items)
        }
    }

    /// Merge imports of the same module and kind, keeping first-seen order.
    pub fn merge(imports: impl IntoIterator<Item = TsImport>) -> Vec<TsImport> {
        let mut merged: Vec<TsImport> = Vec::new();
        for import in imports {
            match merged
                .iter_mut()
                .find(|m| m.from == import.from && m.type_only == import.type_only)
            {
                Some(existing) => {
                    if existing.default_item.is_none() {
                        existing.default_item = import.default_item;
                    }
                    for item in import.items {
                        if !existing.items.contains(&item) {
                            existing.items.push(item);
                        }
                    }
                }
                None => merged.push(import),
            }
        }
        merged
    }
}

/// Map a field type to its TypeScript type expression.
///
/// Total over the closed set of kinds; container kinds recurse into their
/// value type.
pub fn render_type(ty: &TypeRef) -> TsType {
    match ty {
        TypeRef::String | TypeRef::Bytes => TsType::Primitive(TsPrimitive::String),
        TypeRef::Boolean => TsType::Primitive(TsPrimitive::Boolean),
        TypeRef::Int32 | TypeRef::Int64 | TypeRef::Double | TypeRef::Decimal => {
            TsType::Primitive(TsPrimitive::Number)
        }
        TypeRef::Object => make_string_record(TsType::Primitive(TsPrimitive::Unknown)),
        TypeRef::Error => TsType::Ref(SERVICE_ERROR.to_string()),
        TypeRef::Dto { name } => TsType::Ref(dto_interface_name(name)),
        TypeRef::Enum { name } => TsType::Ref(name.clone()),
        TypeRef::Result { value } => TsType::Generic {
            name: SERVICE_RESULT.to_string(),
            args: vec![render_type(value)],
        },
        TypeRef::Array { value } => TsType::Array(Box::new(render_type(value))),
        TypeRef::Map { value } => make_string_record(render_type(value)),
        TypeRef::Nullable { value } => {
            let null = TsType::Primitive(TsPrimitive::Null);
            match render_type(value) {
                TsType::Union(mut types) => {
                    if !types.contains(&null) {
                        types.push(null);
                    }
                    TsType::Union(types)
                }
                inner => TsType::Union(vec![inner, null]),
            }
        }
    }
}

/// Interface name of a DTO (`Widget` becomes `IWidget`).
pub fn dto_interface_name(name: &str) -> String {
    format!("I{name}")
}

/// Create a `Record<string, T>` type.
pub fn make_string_record(value_type: TsType) -> TsType {
    TsType::Record {
        key: Box::new(TsType::Primitive(TsPrimitive::String)),
        value: Box::new(value_type),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::codegen::emit::Emit;

    fn rendered(ty: &TypeRef) -> String {
        render_type(ty).emit()
    }

    #[test]
    fn test_render_scalars() {
        assert_eq!(rendered(&TypeRef::String), "string");
        assert_eq!(rendered(&TypeRef::Bytes), "string");
        assert_eq!(rendered(&TypeRef::Boolean), "boolean");
        for ty in [TypeRef::Int32, TypeRef::Int64, TypeRef::Double, TypeRef::Decimal] {
            assert_eq!(rendered(&ty), "number");
        }
        assert_eq!(rendered(&TypeRef::Object), "Record<string, unknown>");
        assert_eq!(rendered(&TypeRef::Error), "IServiceError");
    }

    #[test]
    fn test_render_named() {
        assert_eq!(rendered(&TypeRef::dto("Widget")), "IWidget");
        assert_eq!(rendered(&TypeRef::enumeration("WidgetKind")), "WidgetKind");
    }

    #[test]
    fn test_render_containers() {
        assert_eq!(
            rendered(&TypeRef::result(TypeRef::dto("Widget"))),
            "IServiceResult<IWidget>"
        );
        assert_eq!(rendered(&TypeRef::array(TypeRef::Int32)), "number[]");
        assert_eq!(
            rendered(&TypeRef::map(TypeRef::array(TypeRef::String))),
            "Record<string, string[]>"
        );
        assert_eq!(
            rendered(&TypeRef::nullable(TypeRef::dto("Widget"))),
            "IWidget | null"
        );
    }

    #[test]
    fn test_render_array_of_union_is_parenthesized() {
        assert_eq!(
            rendered(&TypeRef::array(TypeRef::nullable(TypeRef::String))),
            "(string | null)[]"
        );
        assert_eq!(
            rendered(&TypeRef::nullable(TypeRef::array(TypeRef::dto("Widget")))),
            "IWidget[] | null"
        );
    }

    #[test]
    fn test_nested_nullable_collapses() {
        assert_eq!(
            rendered(&TypeRef::nullable(TypeRef::nullable(TypeRef::Boolean))),
            "boolean | null"
        );
    }

    #[test]
    fn test_collect_refs() {
        let ty = render_type(&TypeRef::map(TypeRef::result(TypeRef::nullable(
            TypeRef::dto("Widget"),
        ))));
        let mut refs = BTreeSet::new();
        ty.collect_refs(&mut refs);
        assert_eq!(
            refs.into_iter().collect::<Vec<_>>(),
            vec!["IServiceResult".to_string(), "IWidget".to_string()]
        );
    }

    #[test]
    fn test_merge_imports() {
        let merged = TsImport::merge([
            TsImport::types("facility-core", &["IServiceResult"]),
            TsImport::values("facility-core", &["HttpClientUtility"]),
            TsImport::types("facility-core", &["IHttpClientOptions", "IServiceResult"]),
        ]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].items, vec!["IServiceResult", "IHttpClientOptions"]);
        assert!(!merged[1].type_only);
    }
}
