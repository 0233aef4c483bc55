use super::{enums::describe_enum, map_like::MapLikeDetector, type_resolver::TypeResolver, union::UnionFlattener};
use crate::generator::{
  ast::{PropertyDescriptor, TypeDescriptor, UnionDescriptor},
  errors::ResolveResult,
  metrics::WarningSink,
  naming::identifiers::{camelize, to_var_name},
  schema::{ObjectSchema, SchemaKind, SchemaNode, UnionSchema},
};

/// Resolves the declared properties of an object into property descriptors.
pub(crate) struct PropertyBuilder<'a> {
  resolver: TypeResolver<'a>,
  type_prefix: Option<String>,
}

impl<'a> PropertyBuilder<'a> {
  pub(crate) fn new(resolver: TypeResolver<'a>) -> Self {
    Self {
      resolver,
      type_prefix: None,
    }
  }

  /// Names nested enums and unions after `class_name` instead of the owner key.
  pub(crate) fn with_type_prefix(mut self, class_name: &str) -> Self {
    self.type_prefix = Some(class_name.to_string());
    self
  }

  /// Builds every property of `object` in declaration order.
  ///
  /// Inline map-like objects are memoized through `detector` when one is given.
  pub(crate) fn build_all(
    &self,
    owner: &str,
    object: &ObjectSchema,
    mut detector: Option<&mut MapLikeDetector>,
    warnings: &mut WarningSink,
  ) -> ResolveResult<Vec<PropertyDescriptor>> {
    object
      .properties
      .iter()
      .map(|(name, node)| {
        self.build(
          owner,
          name,
          node,
          object.is_required(name),
          detector.as_deref_mut(),
          warnings,
        )
      })
      .collect()
  }

  pub(crate) fn build(
    &self,
    owner: &str,
    base_name: &str,
    node: &SchemaNode,
    required: bool,
    detector: Option<&mut MapLikeDetector>,
    warnings: &mut WarningSink,
  ) -> ResolveResult<PropertyDescriptor> {
    let location = format!("{owner}.{base_name}");
    let mut enum_values = None;
    let mut union = None;

    let data_type = if let Some(schema) = array_of_union(node) {
      let flattened =
        UnionFlattener::new(self.resolver).flatten(&self.nested_name(owner, base_name), schema, warnings)?;
      let data_type = TypeDescriptor::vec_of(union_type(&flattened));
      union = Some(flattened);
      data_type
    } else {
      match (&node.kind, detector) {
        (SchemaKind::Object(object), Some(detector)) if object.is_map_like() => {
          match detector.detect_and_rewrite(&location, object, self.resolver, warnings)? {
            Some(map_like) => map_like.map_type.clone(),
            None => self.resolver.resolve(node, &location, warnings)?,
          }
        }
        (SchemaKind::Union(schema), _) => {
          let flattened =
            UnionFlattener::new(self.resolver).flatten(&self.nested_name(owner, base_name), schema, warnings)?;
          let data_type = union_type(&flattened);
          union = Some(flattened);
          data_type
        }
        (SchemaKind::Scalar(scalar), _) if !scalar.enum_values.is_empty() => {
          enum_values = Some(describe_enum(&self.nested_name(owner, base_name), &scalar.enum_values));
          self.resolver.resolve_scalar(scalar).map_err(|e| e.at(&location))?
        }
        _ => self.resolver.resolve(node, &location, warnings)?,
      }
    };

    let items = data_type.is_list().then(|| data_type.inner.as_deref().cloned()).flatten();

    Ok(
      PropertyDescriptor::builder()
        .name(to_var_name(base_name))
        .base_name(base_name)
        .data_type(data_type)
        .maybe_items(items)
        .required(required)
        .maybe_enum_values(enum_values)
        .maybe_union(union)
        .build(),
    )
  }

  fn nested_name(&self, owner: &str, property: &str) -> String {
    let prefix = self.type_prefix.clone().unwrap_or_else(|| camelize(owner));
    format!("{prefix}{}", camelize(property))
  }
}

fn array_of_union(node: &SchemaNode) -> Option<&UnionSchema> {
  match &node.kind {
    SchemaKind::Array { items: Some(inner) } => match &inner.kind {
      SchemaKind::Union(schema) => Some(schema),
      _ => None,
    },
    _ => None,
  }
}

/// A single surviving variant stands in for the union, anything else is dynamic.
fn union_type(flattened: &UnionDescriptor) -> TypeDescriptor {
  match flattened.variants.as_slice() {
    [only] => only.data_type.clone(),
    _ => TypeDescriptor::dynamic(),
  }
}
