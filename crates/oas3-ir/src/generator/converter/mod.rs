pub(crate) mod enums;
pub(crate) mod integers;
pub(crate) mod map_like;
pub(crate) mod operations;
mod properties;
pub(crate) mod type_resolver;
pub(crate) mod union;

#[cfg(test)]
mod tests;

use tracing::trace;

use self::{map_like::MapLikeDetector, properties::PropertyBuilder, type_resolver::TypeResolver, union::UnionFlattener};
use super::{
  ast::{ModelDescriptor, ModelFlag},
  config::GeneratorConfig,
  errors::{ResolveError, ResolveResult},
  metrics::WarningSink,
  registry::ModelRegistry,
  schema::{ModelSpec, SchemaKind},
};

pub(crate) const BODY_FIELD_NAME: &str = "body";
pub(crate) const RESPONSE_SUFFIX: &str = "Response";
pub(crate) const UNION_MODEL_SUFFIX: &str = "Enum";
pub(crate) const SUCCESS_RESPONSE_PREFIX: char = '2';
pub(crate) const DEFAULT_RESPONSE_CODE: &str = "default";

/// Walks one model schema and dispatches each shape to its resolution rule.
pub(crate) struct ModelConverter<'a> {
  resolver: TypeResolver<'a>,
}

impl<'a> ModelConverter<'a> {
  pub(crate) fn new(registry: &'a ModelRegistry, config: &'a GeneratorConfig) -> Self {
    Self {
      resolver: TypeResolver::new(registry, config),
    }
  }

  /// Builds the descriptor for a registered model.
  ///
  /// The returned descriptor carries the class name the model holds now; the
  /// second naming pass may still change it.
  pub(crate) fn convert(
    &self,
    key: &str,
    spec: &ModelSpec,
    detector: &mut MapLikeDetector,
    warnings: &mut WarningSink,
  ) -> ResolveResult<ModelDescriptor> {
    let class_name = self
      .resolver
      .registry()
      .class_name(key)
      .ok_or_else(|| ResolveError::unresolved(key))?;
    let mut model = ModelDescriptor::new(key, class_name, spec.origin);

    match &spec.schema.kind {
      SchemaKind::Object(object) if object.is_map_like() => {
        if let Some(map_like) = detector.detect_and_rewrite(key, object, self.resolver, warnings)? {
          model.data_type = Some(map_like.map_type.clone());
        }
        model.flags.insert(ModelFlag::Record);
      }
      SchemaKind::Object(object) if !object.properties.is_empty() => {
        model.properties = PropertyBuilder::new(self.resolver)
          .with_type_prefix(class_name)
          .build_all(key, object, Some(detector), warnings)?;
        model.flags.insert(ModelFlag::Record);
      }
      SchemaKind::Union(union) => {
        model.union = Some(UnionFlattener::new(self.resolver).flatten(class_name, union, warnings)?);
        model.flags.insert(ModelFlag::Union);
      }
      SchemaKind::Scalar(scalar) if !scalar.enum_values.is_empty() => {
        model.enum_values = Some(enums::describe_enum(class_name, &scalar.enum_values));
        model.data_type = Some(self.resolver.resolve_scalar(scalar).map_err(|e| e.at(key))?);
        model.flags.insert(ModelFlag::Enum);
      }
      SchemaKind::Object(_)
      | SchemaKind::Scalar(_)
      | SchemaKind::Array { .. }
      | SchemaKind::Map { .. }
      | SchemaKind::Reference { .. } => {
        model.data_type = Some(self.resolver.resolve(&spec.schema, key, warnings)?);
        model.flags.insert(ModelFlag::Alias);
      }
    }

    trace!(key, class_name, flags = ?model.flags, "converted model");
    Ok(model)
  }
}
