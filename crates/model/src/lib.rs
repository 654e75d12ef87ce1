//! Input model for HTTP code generation.
//!
//! This crate contains the immutable description consumed by `httpgen-core`:
//! - `service`: the service definition (DTOs, enums, methods, fields)
//! - `types`: the closed set of field type kinds
//! - `http`: resolved HTTP bindings and valid responses
//!
//! Everything here is plain data produced by an upstream parser and binder.
//! The generator only reads it.

mod error;
mod http;
mod service;
mod types;

use serde::{Deserialize, Serialize};

pub use error::{Direction, ModelError};
pub use http::{
    HttpBodyField, HttpHeaderField, HttpMethodBinding, HttpNormalField, HttpPathField,
    HttpQueryField, HttpServiceBinding, HttpValidResponse, HttpVerb, ResponseShape,
};
pub use service::{Docs, DtoType, EnumType, EnumValue, Field, Method, ServiceDefinition};
pub use types::TypeRef;

/// A service definition together with its HTTP bindings, as exchanged on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDocument {
    /// The service definition.
    pub service: ServiceDefinition,
    /// The HTTP bindings of its methods.
    #[serde(default)]
    pub http: HttpServiceBinding,
}

impl ServiceDocument {
    /// Check every HTTP binding against the method it binds.
    pub fn check(&self) -> Result<(), ModelError> {
        for binding in &self.http.methods {
            let method = self
                .service
                .find_method(&binding.name)
                .ok_or_else(|| ModelError::UnknownMethod(binding.name.clone()))?;
            binding.check_partition(method)?;
        }
        Ok(())
    }
}
