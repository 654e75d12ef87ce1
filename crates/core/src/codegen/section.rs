//! Emitter output before it is assembled into artifacts.

use std::collections::BTreeSet;

use super::codec::{Helper, ScalarKind};
use super::types::TsImport;
use super::writer::CodeWriter;

/// Kind of an exported top-level type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeNameKind {
    /// Interface; re-exported as a type.
    Interface,
    /// Enum; re-exported as a value.
    Enum,
}

/// A top-level type declared by the types artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeName {
    /// Declared name.
    pub name: String,
    /// Declaration kind.
    pub kind: TypeNameKind,
}

/// Code produced by one emitter, with the imports, helpers and local type
/// names it depends on.
#[derive(Debug, Default)]
pub struct Section {
    /// Imports from external modules.
    pub imports: Vec<TsImport>,
    /// Helper functions the code calls.
    pub helpers: BTreeSet<Helper>,
    /// Names declared by the types artifact that the code refers to.
    pub local_types: BTreeSet<String>,
    /// Names this section declares.
    pub exports: Vec<TypeName>,
    /// The code.
    pub code: CodeWriter,
}

impl Section {
    /// Record a reference to a name declared by the types artifact.
    pub fn use_type(&mut self, name: impl Into<String>) {
        self.local_types.insert(name.into());
    }

    /// Record what parsing a slot of this kind needs.
    pub fn use_parse(&mut self, kind: ScalarKind<'_>) {
        if kind.needs_parse_boolean() {
            self.helpers.insert(Helper::ParseBoolean);
        }
        if let Some(name) = kind.enum_name() {
            self.use_type(name);
        }
    }

    /// Record an exported declaration.
    pub fn export(&mut self, name: impl Into<String>, kind: TypeNameKind) {
        self.exports.push(TypeName {
            name: name.into(),
            kind,
        });
    }
}
