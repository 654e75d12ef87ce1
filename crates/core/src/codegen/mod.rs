//! Service definition to TypeScript/JavaScript code generation.
//!
//! Generation runs in three layers:
//! 1. Normalization: model and bindings resolved into a borrowed IR, with
//!    every slot kind, path placeholder and response shape checked
//! 2. Emission: one emitter per artifact kind, each producing a `Section`
//!    (code plus the imports, helpers and type names it depends on)
//! 3. Assembly: sections merged into files with headers and imports
//!
//! ## Module Structure
//!
//! - `api`: IR (ServiceIR, MethodIR, SlotField, RequestBodyIR, ResponseBodyIR)
//! - `normalize`: model -> IR
//! - `codec`: scalar value codecs for URI and header slots
//! - `types`, `emit`: TypeScript type expressions and their rendering
//! - `interfaces`, `client`, `server`: the emitters
//! - `generate`: artifact assembly
//! - `writer`, `docs`, `utils`: shared text building

mod api;
mod client;
mod codec;
mod docs;
mod emit;
#[cfg(test)]
mod fixtures;
mod generate;
mod interfaces;
mod normalize;
mod section;
mod server;
mod types;
mod utils;
mod writer;

pub use codec::{ScalarKind, SlotKindError};
pub use generate::{GeneratedFile, generate};
