use tracing::trace;

use super::integers::integer_type;
use crate::generator::{
  ast::{RustPrimitive, TypeDescriptor},
  config::GeneratorConfig,
  errors::{ResolveError, ResolveResult},
  metrics::{GenerationWarning, WarningSink},
  registry::ModelRegistry,
  schema::{AdditionalProperties, ObjectSchema, ScalarKind, ScalarSchema, SchemaKind, SchemaNode, UnionSchema},
};

/// Turns schema nodes into type descriptors.
///
/// The resolver only reads the registry; references resolve to whatever class
/// name the referenced model holds at the time of the call.
#[derive(Clone, Copy)]
pub(crate) struct TypeResolver<'a> {
  registry: &'a ModelRegistry,
  config: &'a GeneratorConfig,
}

impl<'a> TypeResolver<'a> {
  pub(crate) fn new(registry: &'a ModelRegistry, config: &'a GeneratorConfig) -> Self {
    Self { registry, config }
  }

  pub(crate) fn registry(&self) -> &'a ModelRegistry {
    self.registry
  }

  /// Resolves `node`. `location` names the node in warnings and errors.
  pub(crate) fn resolve(
    &self,
    node: &SchemaNode,
    location: &str,
    warnings: &mut WarningSink,
  ) -> ResolveResult<TypeDescriptor> {
    match &node.kind {
      SchemaKind::Scalar(scalar) => self.resolve_scalar(scalar).map_err(|e| e.at(location)),
      SchemaKind::Array { items } => {
        let inner = match items {
          Some(items) => self.resolve(items, &format!("{location}[]"), warnings)?,
          None => {
            warnings.push(GenerationWarning::MissingArrayItems {
              location: location.to_string(),
            });
            TypeDescriptor::primitive(RustPrimitive::String).synthesized()
          }
        };
        Ok(TypeDescriptor::vec_of(inner))
      }
      SchemaKind::Map { values } => self.resolve_map_values(values, location, warnings),
      SchemaKind::Object(object) => self.resolve_object(object, location, warnings),
      SchemaKind::Union(union) => self.resolve_union(union, location, warnings),
      SchemaKind::Reference { name } => self.resolve_reference(name),
    }
  }

  pub(crate) fn resolve_reference(&self, name: &str) -> ResolveResult<TypeDescriptor> {
    let class_name = self
      .registry
      .class_name(name)
      .ok_or_else(|| ResolveError::unresolved(name))?;
    Ok(TypeDescriptor::model(name, class_name))
  }

  pub(crate) fn resolve_scalar(&self, scalar: &ScalarSchema) -> ResolveResult<TypeDescriptor> {
    let format = scalar.format.as_deref();
    let primitive = match scalar.kind {
      ScalarKind::Integer => integer_type(scalar, self.config.pointer_sized_integers)?,
      ScalarKind::Number => match format {
        Some("float") => RustPrimitive::F32,
        _ => RustPrimitive::F64,
      },
      ScalarKind::String => match format {
        Some("date-time" | "date") => RustPrimitive::DateTime,
        Some("binary") => RustPrimitive::Bytes,
        Some("uuid") => RustPrimitive::Uuid,
        _ => RustPrimitive::String,
      },
      ScalarKind::Boolean => RustPrimitive::Bool,
    };
    trace!(kind = ?scalar.kind, ?format, resolved = %primitive, "resolved scalar");
    Ok(TypeDescriptor::primitive(primitive).with_format(format))
  }

  fn resolve_map_values(
    &self,
    values: &AdditionalProperties,
    location: &str,
    warnings: &mut WarningSink,
  ) -> ResolveResult<TypeDescriptor> {
    let inner = match values {
      AdditionalProperties::Schema(schema) => self.resolve(schema, &format!("{location}{{}}"), warnings)?,
      AdditionalProperties::Any(_) => TypeDescriptor::dynamic(),
    };
    Ok(TypeDescriptor::map_of(inner))
  }

  fn resolve_object(
    &self,
    object: &ObjectSchema,
    location: &str,
    warnings: &mut WarningSink,
  ) -> ResolveResult<TypeDescriptor> {
    match &object.additional_properties {
      Some(values @ AdditionalProperties::Schema(_)) => return self.resolve_map_values(values, location, warnings),
      Some(AdditionalProperties::Any(true)) => return Ok(TypeDescriptor::map_of(TypeDescriptor::dynamic())),
      Some(AdditionalProperties::Any(false)) | None => {}
    }

    if !object.properties.is_empty() {
      warnings.push(GenerationWarning::DynamicFallback {
        location: location.to_string(),
        reason: "inline object with declared properties".to_string(),
      });
    }
    Ok(TypeDescriptor::dynamic())
  }

  /// Inline unions collapse to their single distinct type, otherwise `Value`.
  fn resolve_union(
    &self,
    union: &UnionSchema,
    location: &str,
    warnings: &mut WarningSink,
  ) -> ResolveResult<TypeDescriptor> {
    let mut distinct: Vec<TypeDescriptor> = vec![];
    for (index, variant) in union.variants.iter().enumerate() {
      let resolved = self.resolve(variant, &format!("{location}<{index}>"), warnings)?;
      if !distinct.iter().any(|seen| seen.same_type(&resolved)) {
        distinct.push(resolved);
      }
    }

    match distinct.len() {
      0 => Ok(TypeDescriptor::dynamic()),
      1 => Ok(distinct.remove(0)),
      count => {
        warnings.push(GenerationWarning::DynamicFallback {
          location: location.to_string(),
          reason: format!("inline {} with {count} distinct variant types", union.kind),
        });
        Ok(TypeDescriptor::dynamic())
      }
    }
  }
}
