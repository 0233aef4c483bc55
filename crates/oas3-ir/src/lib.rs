#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::too_many_lines)]
//! Resolves an abstract OpenAPI schema graph into a renderer-ready IR of
//! models, properties and operations annotated with concrete Rust types.

pub mod generator;
pub mod utils;

pub use generator::{
  ast::{GeneratedIr, ModelDescriptor, OperationDescriptor, PropertyDescriptor, TypeDescriptor},
  config::GeneratorConfig,
  errors::ResolveError,
  metrics::{GenerationStats, GenerationWarning},
  orchestrator::Orchestrator,
  schema::ApiDocument,
};
pub use utils::document::{DocumentFormat, DocumentLoader, load_document};
