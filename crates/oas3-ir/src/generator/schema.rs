//! Input side of the engine: the abstract schema graph produced by an upstream
//! document parser.
//!
//! Nodes are consumed read-only. Every resolution step builds new descriptors
//! and never writes back into this graph.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Metadata key carrying the owning operation's name on a request body or response.
pub const OPERATION_NAME_HINT: &str = "x-codegen-operation-name";

/// Opaque string-keyed side channel attached to input nodes.
pub type Metadata = BTreeMap<String, serde_json::Value>;

/// A complete API description, as handed over by the document parser.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiDocument {
  #[serde(default)]
  pub title: String,
  #[serde(default)]
  pub version: String,
  #[serde(default)]
  pub models: IndexMap<String, ModelSpec>,
  #[serde(default)]
  pub operations: Vec<OperationSpec>,
}

/// A named model entry of the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
  pub schema: SchemaNode,
  #[serde(default)]
  pub origin: ModelOrigin,
}

impl ModelSpec {
  pub fn declared(schema: SchemaNode) -> Self {
    Self {
      schema,
      origin: ModelOrigin::Declared,
    }
  }

  pub fn synthetic(schema: SchemaNode, origin: ModelOrigin) -> Self {
    Self { schema, origin }
  }
}

/// Where a model came from.
///
/// Anything other than `Declared` was generated by the parser for an inline
/// schema and carries a mechanical placeholder name until it is patched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelOrigin {
  #[default]
  Declared,
  /// Hoisted inline request body (`Body<N>`).
  RequestBody,
  /// Hoisted inline response (`InlineResponse<Code>`).
  InlineResponse,
  /// Hoisted inline `oneOf`/`anyOf` (`OneOf...`/`AnyOf...`).
  Composed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaNode {
  #[serde(flatten)]
  pub kind: SchemaKind,
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub metadata: Metadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SchemaKind {
  Scalar(ScalarSchema),
  Array {
    #[serde(default)]
    items: Option<Box<SchemaNode>>,
  },
  Map {
    values: AdditionalProperties,
  },
  Object(ObjectSchema),
  Union(UnionSchema),
  Reference {
    name: String,
  },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKind {
  Integer,
  Number,
  String,
  Boolean,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarSchema {
  pub kind: ScalarKind,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub format: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub minimum: Option<i64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub maximum: Option<i64>,
  #[serde(default)]
  pub exclusive_minimum: bool,
  #[serde(default)]
  pub exclusive_maximum: bool,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub enum_values: Vec<serde_json::Value>,
}

impl ScalarSchema {
  pub fn new(kind: ScalarKind) -> Self {
    Self {
      kind,
      format: None,
      minimum: None,
      maximum: None,
      exclusive_minimum: false,
      exclusive_maximum: false,
      enum_values: vec![],
    }
  }

  pub fn with_format(mut self, format: impl Into<String>) -> Self {
    self.format = Some(format.into());
    self
  }

  pub fn with_bounds(mut self, minimum: Option<i64>, maximum: Option<i64>) -> Self {
    self.minimum = minimum;
    self.maximum = maximum;
    self
  }

  pub fn with_enum_values<I, V>(mut self, values: I) -> Self
  where
    I: IntoIterator<Item = V>,
    V: Into<serde_json::Value>,
  {
    self.enum_values = values.into_iter().map(Into::into).collect();
    self
  }
}

/// `additionalProperties` either as a bare boolean or as a value schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
  Any(bool),
  Schema(Box<SchemaNode>),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectSchema {
  #[serde(default)]
  pub properties: IndexMap<String, SchemaNode>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub required: Vec<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub additional_properties: Option<AdditionalProperties>,
}

impl ObjectSchema {
  pub fn is_required(&self, name: &str) -> bool {
    self.required.iter().any(|r| r == name)
  }

  /// Free-form objects authored with example properties attached.
  pub fn is_map_like(&self) -> bool {
    matches!(self.additional_properties, Some(AdditionalProperties::Any(true))) && !self.properties.is_empty()
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
pub enum UnionKind {
  #[strum(serialize = "OneOf")]
  OneOf,
  #[strum(serialize = "AnyOf")]
  AnyOf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnionSchema {
  pub kind: UnionKind,
  pub variants: Vec<SchemaNode>,
}

impl SchemaNode {
  pub fn new(kind: SchemaKind) -> Self {
    Self {
      kind,
      metadata: Metadata::new(),
    }
  }

  pub fn scalar(scalar: ScalarSchema) -> Self {
    Self::new(SchemaKind::Scalar(scalar))
  }

  pub fn integer() -> Self {
    Self::scalar(ScalarSchema::new(ScalarKind::Integer))
  }

  pub fn number() -> Self {
    Self::scalar(ScalarSchema::new(ScalarKind::Number))
  }

  pub fn string() -> Self {
    Self::scalar(ScalarSchema::new(ScalarKind::String))
  }

  pub fn boolean() -> Self {
    Self::scalar(ScalarSchema::new(ScalarKind::Boolean))
  }

  pub fn array(items: Option<SchemaNode>) -> Self {
    Self::new(SchemaKind::Array {
      items: items.map(Box::new),
    })
  }

  pub fn map(values: Option<SchemaNode>) -> Self {
    let values = values.map_or(AdditionalProperties::Any(true), |v| AdditionalProperties::Schema(Box::new(v)));
    Self::new(SchemaKind::Map { values })
  }

  pub fn object(object: ObjectSchema) -> Self {
    Self::new(SchemaKind::Object(object))
  }

  pub fn union(kind: UnionKind, variants: Vec<SchemaNode>) -> Self {
    Self::new(SchemaKind::Union(UnionSchema { kind, variants }))
  }

  pub fn reference(name: impl Into<String>) -> Self {
    Self::new(SchemaKind::Reference { name: name.into() })
  }

  pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
    self.metadata.insert(key.into(), value.into());
    self
  }

  pub fn reference_name(&self) -> Option<&str> {
    match &self.kind {
      SchemaKind::Reference { name } => Some(name),
      _ => None,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationSpec {
  #[serde(default)]
  pub operation_id: Option<String>,
  pub path: String,
  pub method: String,
  #[serde(default)]
  pub tags: Vec<String>,
  #[serde(default)]
  pub parameters: Vec<ParameterSpec>,
  #[serde(default)]
  pub request_body: Option<RequestBodySpec>,
  #[serde(default)]
  pub responses: IndexMap<String, ResponseSpec>,
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub metadata: Metadata,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ParameterLocation {
  Path,
  Query,
  Header,
  Cookie,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
  pub name: String,
  #[serde(rename = "in")]
  pub location: ParameterLocation,
  #[serde(default)]
  pub required: bool,
  pub schema: SchemaNode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestBodySpec {
  pub schema: SchemaNode,
  #[serde(default)]
  pub required: bool,
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub metadata: Metadata,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseSpec {
  #[serde(default)]
  pub schema: Option<SchemaNode>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub metadata: Metadata,
}

/// Reads the operation-context hint out of a metadata bag, ignoring blanks.
pub fn operation_name_hint(metadata: &Metadata) -> Option<&str> {
  metadata
    .get(OPERATION_NAME_HINT)
    .and_then(serde_json::Value::as_str)
    .map(str::trim)
    .filter(|s| !s.is_empty())
}
