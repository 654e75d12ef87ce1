//! Binding-contract violations detected in the input model.

use std::fmt;

/// Which side of a method a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Request fields.
    Request,
    /// Response fields.
    Response,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Request => f.write_str("request"),
            Direction::Response => f.write_str("response"),
        }
    }
}

/// A violation of the HTTP binding contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// A binding refers to a field the method does not declare.
    #[error("method '{method}' binds unknown {direction} field '{field}'")]
    UnknownField {
        /// Method name.
        method: String,
        /// Referenced field name.
        field: String,
        /// Request or response.
        direction: Direction,
    },
    /// A request field is bound to zero or several locations.
    #[error(
        "request field '{field}' of method '{method}' is bound {count} times; every request field must be bound exactly once"
    )]
    PartitionViolation {
        /// Method name.
        method: String,
        /// Field name.
        field: String,
        /// Number of locations the field is bound to.
        count: usize,
    },
    /// An HTTP binding refers to a method the service does not declare.
    #[error("HTTP binding refers to unknown method '{0}'")]
    UnknownMethod(String),
}
