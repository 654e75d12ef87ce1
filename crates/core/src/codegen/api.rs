//! Service-level IR for normalized HTTP methods.
//!
//! This module defines the intermediate representation the emitters consume:
//! - ServiceIR: the service and its HTTP-bound methods
//! - MethodIR: one method with every request and response field resolved
//! - UrlPart: path template split into static text and captures
//! - RequestBodyIR / ResponseIR: request body shape and response dispatch cases
//!
//! Everything here borrows from the input model; nothing is copied except
//! derived names.

use httpgen_model::{Field, HttpVerb, Method, ServiceDefinition};

use super::codec::ScalarKind;

/// Normalized service
#[derive(Debug, Clone)]
pub struct ServiceIR<'a> {
    /// The service definition.
    pub service: &'a ServiceDefinition,
    /// Base URL declared by the HTTP binding.
    pub base_uri: Option<&'a str>,
    /// HTTP-bound methods in declaration order.
    pub methods: Vec<MethodIR<'a>>,
}

impl ServiceIR<'_> {
    /// Service name (e.g. `ExampleApi`).
    pub fn name(&self) -> &str {
        &self.service.name
    }

    /// Name of the service interface (e.g. `IExampleApi`).
    pub fn interface_name(&self) -> String {
        format!("I{}", self.service.name)
    }

    /// Name of the client class (e.g. `ExampleApiHttpClient`).
    pub fn client_class_name(&self) -> String {
        format!("{}HttpClient", self.service.name)
    }
}

/// Normalized HTTP method
#[derive(Debug, Clone)]
pub struct MethodIR<'a> {
    /// The method definition.
    pub method: &'a Method,
    /// Method name as written in generated code (e.g. `getWidget`).
    pub name: String,
    /// Request type name (e.g. `IGetWidgetRequest`).
    pub request_type: String,
    /// Response type name (e.g. `IGetWidgetResponse`).
    pub response_type: String,
    /// HTTP verb.
    pub verb: HttpVerb,
    /// Path template split at its placeholders.
    pub path: Vec<UrlPart<'a>>,
    /// Path fields in binding order.
    pub path_fields: Vec<SlotField<'a>>,
    /// Query fields in binding order.
    pub query_fields: Vec<SlotField<'a>>,
    /// Request header fields in binding order.
    pub request_header_fields: Vec<SlotField<'a>>,
    /// Request body shape.
    pub request_body: RequestBodyIR<'a>,
    /// Response header fields in binding order.
    pub response_header_fields: Vec<SlotField<'a>>,
    /// Valid responses in declaration order.
    pub responses: Vec<ResponseIR<'a>>,
}

/// A field carried as text in a path, query or header slot.
#[derive(Debug, Clone, Copy)]
pub struct SlotField<'a> {
    /// The bound field.
    pub field: &'a Field,
    /// Name on the wire: the placeholder, query parameter or header name.
    pub wire_name: &'a str,
    /// Scalar kind of the field.
    pub kind: ScalarKind<'a>,
}

impl SlotField<'_> {
    /// Field name.
    pub fn name(&self) -> &str {
        &self.field.name
    }
}

/// Part of a path template
#[derive(Debug, Clone, Copy)]
pub enum UrlPart<'a> {
    /// Literal text (e.g. `/widgets/`)
    Static(&'a str),
    /// A placeholder captured by a path field
    Param(SlotField<'a>),
}

/// How the request body is built
#[derive(Debug, Clone)]
pub enum RequestBodyIR<'a> {
    /// No body.
    None,
    /// The value of one field is the entire body.
    Field(&'a Field),
    /// Every request field is a normal field; the request object is the body.
    WholeRequest,
    /// A JSON object of exactly these fields.
    Normal(Vec<&'a Field>),
}

/// One dispatch case of the response
#[derive(Debug, Clone)]
pub struct ResponseIR<'a> {
    /// Status code; the dispatch key.
    pub status_code: u16,
    /// Body shape.
    pub body: ResponseBodyIR<'a>,
}

/// Response body shape
#[derive(Debug, Clone)]
pub enum ResponseBodyIR<'a> {
    /// No body; the value is `{}`.
    Empty,
    /// A boolean body field set from the status code alone.
    Flag(&'a Field),
    /// The parsed body is the value of one field.
    Field(&'a Field),
    /// The parsed body is an object of these fields.
    Normal(Vec<&'a Field>),
}

impl ResponseBodyIR<'_> {
    /// Whether the server sends this case without checking the value.
    pub fn is_unconditional(&self) -> bool {
        matches!(self, ResponseBodyIR::Empty | ResponseBodyIR::Normal(_))
    }
}
