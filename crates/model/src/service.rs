//! Service definition model: DTOs, enums, methods and their fields.

use serde::{Deserialize, Serialize};

use crate::types::TypeRef;

/// Summary and deprecation metadata attached to a definition element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Docs {
    /// One-line summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Whether the element is obsolete.
    #[serde(default)]
    pub obsolete: bool,
    /// Optional explanation of the obsoletion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obsolete_message: Option<String>,
}

impl Docs {
    /// Docs with only a summary.
    pub fn summary(summary: impl Into<String>) -> Self {
        Self {
            summary: Some(summary.into()),
            ..Self::default()
        }
    }

    /// Mark these docs obsolete.
    pub fn obsolete(mut self, message: Option<&str>) -> Self {
        self.obsolete = true;
        self.obsolete_message = message.map(str::to_string);
        self
    }
}

/// The parsed, immutable description of a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDefinition {
    /// Service name (e.g. `ExampleApi`).
    pub name: String,
    /// Service documentation.
    #[serde(flatten)]
    pub docs: Docs,
    /// DTOs in declaration order.
    #[serde(default)]
    pub dtos: Vec<DtoType>,
    /// Enums in declaration order.
    #[serde(default)]
    pub enums: Vec<EnumType>,
    /// Methods in declaration order.
    #[serde(default)]
    pub methods: Vec<Method>,
}

impl ServiceDefinition {
    /// Look up a method by name.
    pub fn find_method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.name == name)
    }
}

/// A named record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DtoType {
    /// DTO name.
    pub name: String,
    /// DTO documentation.
    #[serde(flatten)]
    pub docs: Docs,
    /// Fields in declaration order.
    #[serde(default)]
    pub fields: Vec<Field>,
}

/// A closed set of string values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumType {
    /// Enum name.
    pub name: String,
    /// Enum documentation.
    #[serde(flatten)]
    pub docs: Docs,
    /// Values in declaration order.
    #[serde(default)]
    pub values: Vec<EnumValue>,
}

/// One value of an enum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValue {
    /// Value name; also its wire representation.
    pub name: String,
    /// Value documentation.
    #[serde(flatten)]
    pub docs: Docs,
}

/// A service method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Method {
    /// Method name (e.g. `getWidget`).
    pub name: String,
    /// Method documentation.
    #[serde(flatten)]
    pub docs: Docs,
    /// Request fields in declaration order.
    #[serde(default)]
    pub request_fields: Vec<Field>,
    /// Response fields in declaration order.
    #[serde(default)]
    pub response_fields: Vec<Field>,
}

impl Method {
    /// Look up a request field by name.
    pub fn request_field(&self, name: &str) -> Option<&Field> {
        self.request_fields.iter().find(|f| f.name == name)
    }

    /// Look up a response field by name.
    pub fn response_field(&self, name: &str) -> Option<&Field> {
        self.response_fields.iter().find(|f| f.name == name)
    }
}

/// A field of a DTO, request or response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Field name.
    pub name: String,
    /// Field type.
    #[serde(rename = "type")]
    pub ty: TypeRef,
    /// Whether the field must be present in a request.
    #[serde(default)]
    pub required: bool,
    /// Field documentation.
    #[serde(flatten)]
    pub docs: Docs,
}

impl Field {
    /// An undocumented, optional field.
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            required: false,
            docs: Docs::default(),
        }
    }
}
