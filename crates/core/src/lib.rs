//! HTTP client and server code generator.
//!
//! Turns a [`ServiceDefinition`](httpgen_model::ServiceDefinition) and its
//! [`HttpServiceBinding`](httpgen_model::HttpServiceBinding) into a
//! TypeScript types artifact, a fetch-based client and an optional Express
//! server scaffold, in TypeScript or JavaScript.
//!
//! ```no_run
//! use httpgen_core::{GeneratorOptions, generate};
//! use httpgen_model::ServiceDocument;
//!
//! # fn run(document: ServiceDocument) -> Result<(), httpgen_core::GenerateError> {
//! for file in generate(&document.service, &document.http, &GeneratorOptions::default())? {
//!     println!("{}: {} bytes", file.name, file.content.len());
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod codegen;
pub mod error;
pub mod options;

pub use codegen::{GeneratedFile, ScalarKind, SlotKindError, generate};
pub use error::{GenerateError, Slot};
pub use options::{Dialect, GeneratorOptions, Newline};
