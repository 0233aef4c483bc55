//! Flattening of `oneOf`/`anyOf` into ordered, deduplicated variants.

use super::type_resolver::TypeResolver;
use crate::generator::{
  ast::{ExtensionsExt, PropertyDescriptor, TypeDescriptor, UnionDescriptor, VendorExtensions, extensions},
  errors::ResolveResult,
  metrics::WarningSink,
  schema::{SchemaKind, SchemaNode, UnionSchema},
};

const VARIANT_SEPARATOR: &str = "_sub_";

pub(crate) struct UnionFlattener<'a> {
  resolver: TypeResolver<'a>,
}

impl<'a> UnionFlattener<'a> {
  pub(crate) fn new(resolver: TypeResolver<'a>) -> Self {
    Self { resolver }
  }

  /// Flattens `union` into variants named `{name}_sub_{index}`.
  ///
  /// Variants are deduplicated on their canonical type name and the first one
  /// seen wins, so two differently constrained strings collapse into one.
  /// Indices count kept variants only. `is_displayable` drops to `false` on the
  /// first variant that is not a number, integer or string, even when that
  /// variant is itself a duplicate.
  pub(crate) fn flatten(
    &self,
    name: &str,
    union: &UnionSchema,
    warnings: &mut WarningSink,
  ) -> ResolveResult<UnionDescriptor> {
    let mut variants: Vec<PropertyDescriptor> = vec![];
    let mut is_displayable = true;

    for (position, node) in union.variants.iter().enumerate() {
      let location = format!("{name}<{position}>");
      let candidate = self.variant(node, &location, warnings)?;

      if !candidate.data_type.is_displayable {
        is_displayable = false;
      }

      if variants.iter().any(|kept| kept.data_type.same_type(&candidate.data_type)) {
        continue;
      }

      let variant_name = format!("{name}{VARIANT_SEPARATOR}{}", variants.len());
      variants.push(PropertyDescriptor {
        name: variant_name.clone(),
        base_name: variant_name,
        ..candidate
      });
    }

    let variant_count = variants.len();
    Ok(UnionDescriptor {
      variants,
      is_displayable,
      variant_count,
    })
  }

  fn variant(&self, node: &SchemaNode, location: &str, warnings: &mut WarningSink) -> ResolveResult<PropertyDescriptor> {
    let mut vendor_extensions = VendorExtensions::new();

    let first_property = match &node.kind {
      SchemaKind::Object(object) => object.properties.first(),
      _ => None,
    };

    let (data_type, items) = if let Some((first_name, first)) = first_property {
      let value_type = self
        .resolver
        .resolve(first, &format!("{location}.{first_name}"), warnings)?;
      vendor_extensions.set_flag(extensions::IS_OBJECT);
      (TypeDescriptor::map_of(value_type), None)
    } else {
      let data_type = self.resolver.resolve(node, location, warnings)?;
      let items = data_type.is_list().then(|| data_type.inner.as_deref().cloned()).flatten();
      (data_type, items)
    };
    vendor_extensions.set_container_flags(&data_type);

    Ok(PropertyDescriptor {
      name: String::new(),
      base_name: String::new(),
      data_type,
      items,
      required: true,
      enum_values: None,
      union: None,
      vendor_extensions,
    })
  }
}
