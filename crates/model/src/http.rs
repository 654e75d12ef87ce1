//! HTTP binding model.
//!
//! The binder resolves each method to a verb and path template and places every
//! request field in exactly one of path, query, header, body or normal. Valid
//! responses are listed in declaration order; the status code is the dispatch key.

use serde::{Deserialize, Serialize};

use crate::error::{Direction, ModelError};
use crate::service::Method;

/// HTTP verb
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpVerb {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
}

impl HttpVerb {
    /// Wire name (e.g. `GET`).
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpVerb::Get => "GET",
            HttpVerb::Post => "POST",
            HttpVerb::Put => "PUT",
            HttpVerb::Patch => "PATCH",
            HttpVerb::Delete => "DELETE",
        }
    }

    /// Lowercase name, as used for route registration (e.g. `get`).
    pub fn as_lower_str(&self) -> &'static str {
        match self {
            HttpVerb::Get => "get",
            HttpVerb::Post => "post",
            HttpVerb::Put => "put",
            HttpVerb::Patch => "patch",
            HttpVerb::Delete => "delete",
        }
    }
}

/// HTTP bindings for every method of a service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpServiceBinding {
    /// Base URL of the service, if declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// One binding per HTTP method, in declaration order.
    #[serde(default)]
    pub methods: Vec<HttpMethodBinding>,
}

impl HttpServiceBinding {
    /// Look up the binding of a method by name.
    pub fn find_method(&self, name: &str) -> Option<&HttpMethodBinding> {
        self.methods.iter().find(|m| m.name == name)
    }
}

/// Resolved HTTP wire mapping of one method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpMethodBinding {
    /// Name of the bound method.
    pub name: String,
    /// HTTP verb.
    pub verb: HttpVerb,
    /// Path template with `{name}` placeholders (e.g. `/widgets/{id}`).
    pub path: String,
    /// Fields captured from the path.
    #[serde(default)]
    pub path_fields: Vec<HttpPathField>,
    /// Fields carried in the query string.
    #[serde(default)]
    pub query_fields: Vec<HttpQueryField>,
    /// Fields carried in request headers.
    #[serde(default)]
    pub request_header_fields: Vec<HttpHeaderField>,
    /// The field that is the entire request body, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body_field: Option<HttpBodyField>,
    /// Remaining request fields, serialized as a JSON object.
    #[serde(default)]
    pub request_normal_fields: Vec<HttpNormalField>,
    /// Fields carried in response headers.
    #[serde(default)]
    pub response_header_fields: Vec<HttpHeaderField>,
    /// Successful responses, in declaration order.
    #[serde(default)]
    pub valid_responses: Vec<HttpValidResponse>,
}

impl HttpMethodBinding {
    /// A binding with no fields and no responses.
    pub fn new(name: impl Into<String>, verb: HttpVerb, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            verb,
            path: path.into(),
            path_fields: Vec::new(),
            query_fields: Vec::new(),
            request_header_fields: Vec::new(),
            request_body_field: None,
            request_normal_fields: Vec::new(),
            response_header_fields: Vec::new(),
            valid_responses: Vec::new(),
        }
    }

    /// Verify that every request field is bound exactly once and that every
    /// reference names an existing field of `method`.
    pub fn check_partition(&self, method: &Method) -> Result<(), ModelError> {
        let request_refs = self
            .path_fields
            .iter()
            .map(|f| f.field.as_str())
            .chain(self.query_fields.iter().map(|f| f.field.as_str()))
            .chain(self.request_header_fields.iter().map(|f| f.field.as_str()))
            .chain(self.request_body_field.iter().map(|f| f.field.as_str()))
            .chain(self.request_normal_fields.iter().map(|f| f.field.as_str()));

        let mut counts = vec![0usize; method.request_fields.len()];
        for name in request_refs {
            let Some(index) = method.request_fields.iter().position(|f| f.name == name) else {
                return Err(ModelError::UnknownField {
                    method: self.name.clone(),
                    field: name.to_string(),
                    direction: Direction::Request,
                });
            };
            counts[index] += 1;
        }
        if let Some((field, count)) = method
            .request_fields
            .iter()
            .zip(counts)
            .find(|(_, count)| *count != 1)
        {
            return Err(ModelError::PartitionViolation {
                method: self.name.clone(),
                field: field.name.clone(),
                count,
            });
        }

        let response_refs = self
            .response_header_fields
            .iter()
            .map(|f| f.field.as_str())
            .chain(self.valid_responses.iter().flat_map(|r| {
                r.body_field
                    .iter()
                    .map(|f| f.field.as_str())
                    .chain(r.normal_fields.iter().flatten().map(|f| f.field.as_str()))
            }));
        for name in response_refs {
            if method.response_field(name).is_none() {
                return Err(ModelError::UnknownField {
                    method: self.name.clone(),
                    field: name.to_string(),
                    direction: Direction::Response,
                });
            }
        }

        Ok(())
    }
}

/// A request field captured from a path placeholder of the same name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpPathField {
    /// Field name; also the placeholder name.
    pub field: String,
}

/// A request field carried in the query string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpQueryField {
    /// Field name.
    pub field: String,
    /// Query parameter name on the wire.
    pub name: String,
}

/// A request or response field carried in an HTTP header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpHeaderField {
    /// Field name.
    pub field: String,
    /// Header name on the wire.
    pub name: String,
}

/// The field whose value is the entire body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpBodyField {
    /// Field name.
    pub field: String,
}

/// A field serialized as a key of the JSON body object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpNormalField {
    /// Field name.
    pub field: String,
}

macro_rules! impl_field_ref {
    ($($ty:ident),*) => {
        $(
            impl $ty {
                /// Reference the named field.
                pub fn new(field: impl Into<String>) -> Self {
                    Self { field: field.into() }
                }
            }
        )*
    };
}

impl_field_ref!(HttpPathField, HttpBodyField, HttpNormalField);

impl HttpQueryField {
    /// Reference the named field, using `name` on the wire.
    pub fn new(field: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            name: name.into(),
        }
    }
}

impl HttpHeaderField {
    /// Reference the named field, using `name` on the wire.
    pub fn new(field: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            name: name.into(),
        }
    }
}

/// One declared successful outcome of a method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpValidResponse {
    /// Status code; the dispatch key.
    pub status_code: u16,
    /// The field that is the entire response body, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_field: Option<HttpBodyField>,
    /// Fields serialized as a JSON object, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal_fields: Option<Vec<HttpNormalField>>,
}

/// Body shape of a valid response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape<'a> {
    /// No body.
    Empty,
    /// A single field is the entire body.
    Body(&'a HttpBodyField),
    /// A JSON object of these fields.
    Normal(&'a [HttpNormalField]),
}

impl HttpValidResponse {
    /// A response with no body.
    pub fn empty(status_code: u16) -> Self {
        Self {
            status_code,
            body_field: None,
            normal_fields: None,
        }
    }

    /// A response whose body is the named field.
    pub fn body(status_code: u16, field: impl Into<String>) -> Self {
        Self {
            status_code,
            body_field: Some(HttpBodyField::new(field)),
            normal_fields: None,
        }
    }

    /// A response whose body is a JSON object of the named fields.
    pub fn normal<I, S>(status_code: u16, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            status_code,
            body_field: None,
            normal_fields: Some(fields.into_iter().map(HttpNormalField::new).collect()),
        }
    }

    /// Classify the body shape. A body field takes precedence; an empty
    /// normal-field list is the same as no body.
    pub fn shape(&self) -> ResponseShape<'_> {
        if let Some(body) = &self.body_field {
            return ResponseShape::Body(body);
        }
        match self.normal_fields.as_deref() {
            Some(fields) if !fields.is_empty() => ResponseShape::Normal(fields),
            _ => ResponseShape::Empty,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::service::{Docs, Field};
    use crate::types::TypeRef;

    fn create_widget_method() -> Method {
        Method {
            name: "createWidget".into(),
            docs: Docs::default(),
            request_fields: vec![
                Field::new("widget", TypeRef::dto("Widget")),
                Field::new("dryRun", TypeRef::Boolean),
            ],
            response_fields: vec![
                Field::new("widget", TypeRef::dto("Widget")),
                Field::new("eTag", TypeRef::String),
            ],
        }
    }

    fn create_widget_binding() -> HttpMethodBinding {
        let mut binding = HttpMethodBinding::new("createWidget", HttpVerb::Post, "/widgets");
        binding.request_body_field = Some(HttpBodyField::new("widget"));
        binding.query_fields.push(HttpQueryField::new("dryRun", "dry"));
        binding
            .response_header_fields
            .push(HttpHeaderField::new("eTag", "ETag"));
        binding.valid_responses.push(HttpValidResponse::body(201, "widget"));
        binding
    }

    #[test]
    fn test_check_partition_ok() {
        let binding = create_widget_binding();
        assert_eq!(binding.check_partition(&create_widget_method()), Ok(()));
    }

    #[test]
    fn test_check_partition_unbound_field() {
        let mut binding = create_widget_binding();
        binding.query_fields.clear();
        let err = binding.check_partition(&create_widget_method()).unwrap_err();
        assert_eq!(
            err,
            ModelError::PartitionViolation {
                method: "createWidget".into(),
                field: "dryRun".into(),
                count: 0,
            }
        );
    }

    #[test]
    fn test_check_partition_twice_bound_field() {
        let mut binding = create_widget_binding();
        binding.request_normal_fields.push(HttpNormalField::new("dryRun"));
        let err = binding.check_partition(&create_widget_method()).unwrap_err();
        assert!(matches!(err, ModelError::PartitionViolation { count: 2, .. }));
    }

    #[test]
    fn test_check_partition_unknown_response_field() {
        let mut binding = create_widget_binding();
        binding.valid_responses.push(HttpValidResponse::normal(200, ["total"]));
        let err = binding.check_partition(&create_widget_method()).unwrap_err();
        assert_eq!(
            err,
            ModelError::UnknownField {
                method: "createWidget".into(),
                field: "total".into(),
                direction: Direction::Response,
            }
        );
    }

    #[test]
    fn test_response_shape() {
        assert_eq!(HttpValidResponse::empty(204).shape(), ResponseShape::Empty);
        assert_eq!(
            HttpValidResponse::normal(200, Vec::<String>::new()).shape(),
            ResponseShape::Empty
        );
        assert!(matches!(
            HttpValidResponse::body(201, "widget").shape(),
            ResponseShape::Body(f) if f.field == "widget"
        ));
        assert!(matches!(
            HttpValidResponse::normal(200, ["widgets", "total"]).shape(),
            ResponseShape::Normal(fields) if fields.len() == 2
        ));
    }

    #[test]
    fn test_deserialize_binding() {
        let json = r#"{
          "name": "deleteWidget",
          "verb": "DELETE",
          "path": "/widgets/{id}",
          "pathFields": [ { "field": "id" } ],
          "validResponses": [ { "statusCode": 204 } ]
        }"#;
        let binding: HttpMethodBinding = serde_json::from_str(json).unwrap();
        assert_eq!(binding.verb, HttpVerb::Delete);
        assert_eq!(binding.verb.as_lower_str(), "delete");
        assert_eq!(binding.valid_responses[0].shape(), ResponseShape::Empty);
        assert!(binding.request_body_field.is_none());
    }
}
