//! Generation-time errors.
//!
//! Every variant is a binding-contract violation or a configuration problem.
//! None of them can be caused by a well-formed, validated input model, so
//! generation aborts on the first one.

use std::fmt;

use httpgen_model::ModelError;

use crate::codegen::SlotKindError;

/// Where a scalar value is carried on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// A `{placeholder}` of the path template.
    Path,
    /// A query string parameter.
    Query,
    /// A request header.
    RequestHeader,
    /// A response header.
    ResponseHeader,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Slot::Path => "path",
            Slot::Query => "query string",
            Slot::RequestHeader => "request headers",
            Slot::ResponseHeader => "response headers",
        })
    }
}

/// Error raised while generating code.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The HTTP bindings do not match the service definition.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// A field of a non-scalar kind is bound to a path, query or header slot.
    #[error("field '{field}' of method '{method}' cannot be carried in the {slot}: {source}")]
    Slot {
        /// Method name.
        method: String,
        /// Field name.
        field: String,
        /// The offending slot.
        slot: Slot,
        /// Why the kind is rejected.
        source: SlotKindError,
    },

    /// The path template has a placeholder that no path field captures.
    #[error(
        "path '{path}' of method '{method}' has placeholder '{{{placeholder}}}' with no path field"
    )]
    UnboundPlaceholder {
        /// Method name.
        method: String,
        /// Path template.
        path: String,
        /// Placeholder name.
        placeholder: String,
    },

    /// A path field has no placeholder in the path template.
    #[error("path field '{field}' of method '{method}' does not appear in path '{path}'")]
    MissingPlaceholder {
        /// Method name.
        method: String,
        /// Path template.
        path: String,
        /// Field name.
        field: String,
    },

    /// A path placeholder is not an identifier, so no route capture can carry it.
    #[error(
        "path '{path}' of method '{method}' has placeholder '{{{placeholder}}}' that is not an identifier"
    )]
    InvalidPlaceholder {
        /// Method name.
        method: String,
        /// Path template.
        path: String,
        /// Placeholder name.
        placeholder: String,
    },

    /// The path template has an unterminated or empty placeholder.
    #[error("path '{path}' of method '{method}' is malformed")]
    MalformedPath {
        /// Method name.
        method: String,
        /// Path template.
        path: String,
    },

    /// The generator options could not be parsed.
    #[error("invalid generator options: {0}")]
    Options(#[from] toml::de::Error),
}
