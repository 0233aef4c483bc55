//! The intermediate representation handed to the renderer.

pub mod extensions;
mod models;
mod operations;
mod types;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub use self::{
  extensions::{ExtensionsExt, VendorExtensions},
  models::{EnumDescriptor, EnumVariant, ModelDescriptor, ModelFlag, PropertyDescriptor, UnionDescriptor},
  operations::{OperationDescriptor, ParameterDescriptor, ResponseDescriptor},
  types::{RustPrimitive, TypeDescriptor},
};

/// Operations sharing a tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagGroup {
  pub base_name: String,
  pub class_name: String,
  pub operations: Vec<OperationDescriptor>,
}

/// Complete output of one generation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedIr {
  pub title: String,
  pub version: String,
  /// Keyed by final class name.
  pub models: IndexMap<String, ModelDescriptor>,
  pub tags: IndexMap<String, TagGroup>,
}

impl GeneratedIr {
  pub fn model(&self, class_name: &str) -> Option<&ModelDescriptor> {
    self.models.get(class_name)
  }

  pub fn model_by_key(&self, canonical_key: &str) -> Option<&ModelDescriptor> {
    self.models.values().find(|m| m.canonical_key == canonical_key)
  }

  pub fn operations(&self) -> impl Iterator<Item = &OperationDescriptor> {
    self.tags.values().flat_map(|t| t.operations.iter())
  }

  pub fn operation(&self, operation_id: &str) -> Option<&OperationDescriptor> {
    self.operations().find(|op| op.operation_id == operation_id)
  }
}
