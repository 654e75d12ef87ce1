//! TypeScript code emission via the Emit trait.
//!
//! Type expressions and import declarations implement `Emit`; statement-level
//! output goes through the `CodeWriter`.

use super::types::{TsImport, TsPrimitive, TsType};
use super::utils::string_literal;

/// Trait for emitting TypeScript code from AST nodes.
pub trait Emit {
    /// Convert the AST node to its TypeScript string representation.
    fn emit(&self) -> String;
}

impl Emit for TsPrimitive {
    fn emit(&self) -> String {
        match self {
            TsPrimitive::String => "string",
            TsPrimitive::Number => "number",
            TsPrimitive::Boolean => "boolean",
            TsPrimitive::Null => "null",
            TsPrimitive::Unknown => "unknown",
        }
        .to_string()
    }
}

impl Emit for TsType {
    fn emit(&self) -> String {
        match self {
            TsType::Primitive(p) => p.emit(),
            TsType::Array(inner) => {
                let inner_str = inner.emit();
                // Wrap unions in parentheses
                if matches!(**inner, TsType::Union(_)) {
                    format!("({inner_str})[]")
                } else {
                    format!("{inner_str}[]")
                }
            }
            TsType::Union(types) => types.iter().map(Emit::emit).collect::<Vec<_>>().join(" | "),
            TsType::Record { key, value } => {
                format!("Record<{}, {}>", key.emit(), value.emit())
            }
            TsType::Generic { name, args } => {
                let args: Vec<_> = args.iter().map(Emit::emit).collect();
                format!("{name}<{}>", args.join(", "))
            }
            TsType::Ref(name) => name.clone(),
        }
    }
}

impl Emit for TsImport {
    fn emit(&self) -> String {
        let keyword = if self.type_only { "import type" } else { "import" };
        let named = (!self.items.is_empty()).then(|| format!("{{ {} }}", self.items.join(", ")));
        let bindings: Vec<_> = self.default_item.iter().cloned().chain(named).collect();
        format!(
            "{keyword} {} from {};",
            bindings.join(", "),
            string_literal(&self.from)
        )
    }
}
