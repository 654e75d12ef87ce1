//! Normalization from the service model to the method IR.
//!
//! This module handles all binding-specific logic:
//! - Partition checks of each binding against its method
//! - Path template parsing and placeholder matching
//! - Scalar kind resolution for path, query and header slots
//! - Request body and response shape classification

use httpgen_model::{
    Direction, Field, HttpMethodBinding, HttpServiceBinding, Method, ModelError, ResponseShape,
    ServiceDefinition,
};
use tracing::trace;

use super::api::{
    MethodIR, RequestBodyIR, ResponseBodyIR, ResponseIR, ServiceIR, SlotField, UrlPart,
};
use super::codec::ScalarKind;
use super::utils::capitalize_first;
use crate::error::{GenerateError, Slot};

/// Normalize a service and its HTTP bindings into the method IR.
///
/// Methods keep their declaration order. Methods without a binding are not
/// HTTP methods and are skipped; a binding naming an unknown method is an error.
pub fn normalize_service<'a>(
    service: &'a ServiceDefinition,
    http: &'a HttpServiceBinding,
) -> Result<ServiceIR<'a>, GenerateError> {
    if let Some(binding) = http
        .methods
        .iter()
        .find(|b| service.find_method(&b.name).is_none())
    {
        return Err(ModelError::UnknownMethod(binding.name.clone()).into());
    }

    let mut methods = Vec::new();
    for method in &service.methods {
        let Some(binding) = http.find_method(&method.name) else {
            trace!(method = %method.name, "method has no HTTP binding; skipping");
            continue;
        };
        methods.push(normalize_method(method, binding)?);
    }

    Ok(ServiceIR {
        service,
        base_uri: http.url.as_deref(),
        methods,
    })
}

/// Normalize a single method against its binding.
fn normalize_method<'a>(
    method: &'a Method,
    binding: &'a HttpMethodBinding,
) -> Result<MethodIR<'a>, GenerateError> {
    binding.check_partition(method)?;

    let request_slot = |field: &'a str, wire_name: &'a str, slot: Slot| {
        resolve_slot(method, field, wire_name, slot, Direction::Request)
    };

    let path_fields = binding
        .path_fields
        .iter()
        .map(|f| request_slot(f.field.as_str(), f.field.as_str(), Slot::Path))
        .collect::<Result<Vec<_>, _>>()?;
    let query_fields = binding
        .query_fields
        .iter()
        .map(|f| request_slot(f.field.as_str(), f.name.as_str(), Slot::Query))
        .collect::<Result<Vec<_>, _>>()?;
    let request_header_fields = binding
        .request_header_fields
        .iter()
        .map(|f| request_slot(f.field.as_str(), f.name.as_str(), Slot::RequestHeader))
        .collect::<Result<Vec<_>, _>>()?;
    let response_header_fields = binding
        .response_header_fields
        .iter()
        .map(|f| {
            resolve_slot(method, &f.field, &f.name, Slot::ResponseHeader, Direction::Response)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let path = parse_path(method, &binding.path, &path_fields)?;

    let request_body = match &binding.request_body_field {
        Some(body) => RequestBodyIR::Field(find_field(method, &body.field, Direction::Request)?),
        None if binding.request_normal_fields.is_empty() => RequestBodyIR::None,
        None if binding.request_normal_fields.len() == method.request_fields.len() => {
            RequestBodyIR::WholeRequest
        }
        None => RequestBodyIR::Normal(
            binding
                .request_normal_fields
                .iter()
                .map(|f| find_field(method, &f.field, Direction::Request))
                .collect::<Result<_, _>>()?,
        ),
    };

    let responses = binding
        .valid_responses
        .iter()
        .map(|response| -> Result<ResponseIR<'a>, GenerateError> {
            let body = match response.shape() {
                ResponseShape::Empty => ResponseBodyIR::Empty,
                ResponseShape::Body(body) => {
                    let field = find_field(method, &body.field, Direction::Response)?;
                    if field.ty.is_boolean() {
                        ResponseBodyIR::Flag(field)
                    } else {
                        ResponseBodyIR::Field(field)
                    }
                }
                ResponseShape::Normal(fields) => ResponseBodyIR::Normal(
                    fields
                        .iter()
                        .map(|f| find_field(method, &f.field, Direction::Response))
                        .collect::<Result<_, _>>()?,
                ),
            };
            Ok(ResponseIR {
                status_code: response.status_code,
                body,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let pascal = capitalize_first(&method.name);
    trace!(
        method = %method.name,
        verb = binding.verb.as_str(),
        path = %binding.path,
        "normalized method"
    );

    Ok(MethodIR {
        method,
        name: method.name.clone(),
        request_type: format!("I{pascal}Request"),
        response_type: format!("I{pascal}Response"),
        verb: binding.verb,
        path,
        path_fields,
        query_fields,
        request_header_fields,
        request_body,
        response_header_fields,
        responses,
    })
}

fn find_field<'a>(
    method: &'a Method,
    name: &str,
    direction: Direction,
) -> Result<&'a Field, ModelError> {
    let field = match direction {
        Direction::Request => method.request_field(name),
        Direction::Response => method.response_field(name),
    };
    field.ok_or_else(|| ModelError::UnknownField {
        method: method.name.clone(),
        field: name.to_string(),
        direction,
    })
}

fn resolve_slot<'a>(
    method: &'a Method,
    field: &str,
    wire_name: &'a str,
    slot: Slot,
    direction: Direction,
) -> Result<SlotField<'a>, GenerateError> {
    let field = find_field(method, field, direction)?;
    let kind = ScalarKind::from_type(&field.ty).map_err(|source| GenerateError::Slot {
        method: method.name.clone(),
        field: field.name.clone(),
        slot,
        source,
    })?;
    Ok(SlotField {
        field,
        wire_name,
        kind,
    })
}

/// Split a path template at its `{name}` placeholders and match each one to
/// a path field. Every placeholder needs a path field and every path field
/// needs a placeholder. Placeholder names must be identifiers.
fn parse_path<'a>(
    method: &Method,
    path: &'a str,
    path_fields: &[SlotField<'a>],
) -> Result<Vec<UrlPart<'a>>, GenerateError> {
    let malformed = || GenerateError::MalformedPath {
        method: method.name.clone(),
        path: path.to_string(),
    };

    let mut parts = Vec::new();
    let mut used = vec![false; path_fields.len()];
    let mut rest = path;
    while let Some(open) = rest.find('{') {
        let (text, after) = rest.split_at(open);
        if text.contains('}') {
            return Err(malformed());
        }
        if !text.is_empty() {
            parts.push(UrlPart::Static(text));
        }
        let after = &after[1..];
        let close = after.find('}').ok_or_else(malformed)?;
        let name = &after[..close];
        if name.is_empty() || name.contains('{') {
            return Err(malformed());
        }
        if !is_identifier(name) {
            return Err(GenerateError::InvalidPlaceholder {
                method: method.name.clone(),
                path: path.to_string(),
                placeholder: name.to_string(),
            });
        }
        let index = path_fields
            .iter()
            .position(|f| f.name() == name)
            .ok_or_else(|| GenerateError::UnboundPlaceholder {
                method: method.name.clone(),
                path: path.to_string(),
                placeholder: name.to_string(),
            })?;
        used[index] = true;
        parts.push(UrlPart::Param(path_fields[index]));
        rest = &after[close + 1..];
    }
    if rest.contains('}') {
        return Err(malformed());
    }
    if !rest.is_empty() {
        parts.push(UrlPart::Static(rest));
    }

    if let Some((field, _)) = path_fields.iter().zip(&used).find(|(_, used)| !**used) {
        return Err(GenerateError::MissingPlaceholder {
            method: method.name.clone(),
            path: path.to_string(),
            field: field.name().to_string(),
        });
    }

    Ok(parts)
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
