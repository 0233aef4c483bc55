use indexmap::IndexMap;

use crate::generator::{
  ast::GeneratedIr,
  config::GeneratorConfig,
  metrics::{GenerationStats, WarningSink},
  orchestrator::Orchestrator,
  registry::ModelRegistry,
  schema::{
    ApiDocument, ModelOrigin, ModelSpec, ObjectSchema, OperationSpec, ParameterLocation, ParameterSpec,
    RequestBodySpec, ResponseSpec, ScalarKind, ScalarSchema, SchemaNode, UnionKind,
  },
};

pub(crate) fn integer_with_bounds(minimum: Option<i64>, maximum: Option<i64>) -> SchemaNode {
  SchemaNode::scalar(ScalarSchema::new(ScalarKind::Integer).with_bounds(minimum, maximum))
}

pub(crate) fn string_with_format(format: &str) -> SchemaNode {
  SchemaNode::scalar(ScalarSchema::new(ScalarKind::String).with_format(format))
}

pub(crate) fn string_enum(values: &[&str]) -> SchemaNode {
  SchemaNode::scalar(ScalarSchema::new(ScalarKind::String).with_enum_values(values.iter().copied()))
}

pub(crate) fn object(properties: &[(&str, SchemaNode)], required: &[&str]) -> ObjectSchema {
  ObjectSchema {
    properties: properties
      .iter()
      .map(|(name, node)| ((*name).to_string(), node.clone()))
      .collect(),
    required: required.iter().map(|r| (*r).to_string()).collect(),
    additional_properties: None,
  }
}

pub(crate) fn object_node(properties: &[(&str, SchemaNode)], required: &[&str]) -> SchemaNode {
  SchemaNode::object(object(properties, required))
}

pub(crate) fn map_like_object(properties: &[(&str, SchemaNode)]) -> ObjectSchema {
  ObjectSchema {
    additional_properties: Some(crate::generator::schema::AdditionalProperties::Any(true)),
    ..object(properties, &[])
  }
}

pub(crate) fn one_of(variants: Vec<SchemaNode>) -> SchemaNode {
  SchemaNode::union(UnionKind::OneOf, variants)
}

/// A registry holding the given keys, all registered as declared models.
pub(crate) fn registry_with(keys: &[&str]) -> ModelRegistry {
  let mut registry = ModelRegistry::new();
  for key in keys {
    registry.register(key, ModelOrigin::Declared);
  }
  registry
}

pub(crate) fn sink() -> WarningSink {
  WarningSink::default()
}

pub(crate) fn query_param(name: &str, schema: SchemaNode, required: bool) -> ParameterSpec {
  ParameterSpec {
    name: name.to_string(),
    location: ParameterLocation::Query,
    required,
    schema,
  }
}

pub(crate) fn operation(operation_id: &str, method: &str, path: &str) -> OperationSpec {
  OperationSpec {
    operation_id: Some(operation_id.to_string()),
    path: path.to_string(),
    method: method.to_string(),
    tags: vec![],
    parameters: vec![],
    request_body: None,
    responses: IndexMap::new(),
    metadata: Default::default(),
  }
}

pub(crate) fn hinted_body(model_key: &str, operation_name: &str) -> RequestBodySpec {
  RequestBodySpec {
    schema: SchemaNode::reference(model_key),
    required: true,
    metadata: [(
      crate::generator::schema::OPERATION_NAME_HINT.to_string(),
      serde_json::Value::from(operation_name),
    )]
    .into_iter()
    .collect(),
  }
}

pub(crate) fn hinted_response(model_key: &str, operation_name: &str) -> ResponseSpec {
  ResponseSpec {
    schema: Some(SchemaNode::reference(model_key)),
    description: None,
    metadata: [(
      crate::generator::schema::OPERATION_NAME_HINT.to_string(),
      serde_json::Value::from(operation_name),
    )]
    .into_iter()
    .collect(),
  }
}

pub(crate) fn plain_response(schema: Option<SchemaNode>) -> ResponseSpec {
  ResponseSpec {
    schema,
    ..ResponseSpec::default()
  }
}

pub(crate) fn document(models: Vec<(&str, ModelSpec)>, operations: Vec<OperationSpec>) -> ApiDocument {
  ApiDocument {
    title: "Test API".to_string(),
    version: "1.0.0".to_string(),
    models: models.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
    operations,
  }
}

pub(crate) fn run(document: ApiDocument) -> (GeneratedIr, GenerationStats) {
  run_with(document, GeneratorConfig::default())
}

pub(crate) fn run_with(document: ApiDocument, config: GeneratorConfig) -> (GeneratedIr, GenerationStats) {
  Orchestrator::new(document, config)
    .run()
    .expect("document should resolve")
}
