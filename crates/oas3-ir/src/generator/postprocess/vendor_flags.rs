//! Renderer-facing flags derived from the final IR.

use serde_json::Value;

use crate::generator::ast::{ExtensionsExt, ModelDescriptor, ModelFlag, RustPrimitive, extensions};

pub(crate) fn apply_model_flags(model: &mut ModelDescriptor) {
  if model.flags.contains(&ModelFlag::Alias) || model.flags.contains(&ModelFlag::Enum) {
    apply_alias_flags(model);
  }

  if model.flags.contains(&ModelFlag::Enum) {
    model.vendor_extensions.set_flag(extensions::IS_ENUM);
  }

  if let Some(union) = model.union.as_ref() {
    let (count, displayable) = (union.variant_count, union.is_displayable);
    model.vendor_extensions.set_flag(extensions::ENUM_ONE_OF);
    model
      .vendor_extensions
      .insert(extensions::VARIANT_COUNT.to_string(), Value::from(count));
    if displayable {
      model.vendor_extensions.set_flag(extensions::IS_DISPLAY);
    }
  }

  let mut has_string = false;
  for property in &mut model.properties {
    if property.base_name == property.name {
      property.vendor_extensions.set_flag(extensions::SERDE_NO_RENAME);
    }
    if property.data_type.as_primitive() == Some(RustPrimitive::String) {
      property.vendor_extensions.set_flag(extensions::IS_STRING);
      has_string = true;
    }
    if property.enum_values.as_ref().is_some_and(|e| e.has_empty_value()) {
      property.vendor_extensions.set_flag(extensions::HAS_EMPTY_ENUM);
    }
  }
  if has_string {
    model.vendor_extensions.set_flag(extensions::HAS_STRING);
  }
}

fn apply_alias_flags(model: &mut ModelDescriptor) {
  let Some(data_type) = model.data_type.as_ref() else {
    return;
  };

  let flag = if data_type.is_list() {
    Some(extensions::IS_ARRAY)
  } else {
    match data_type.as_primitive() {
      Some(RustPrimitive::Bool) => Some(extensions::IS_BOOL),
      Some(primitive) if primitive.is_integer() => Some(extensions::IS_INTEGER),
      Some(RustPrimitive::String) => Some(extensions::IS_STRING),
      Some(RustPrimitive::DateTime) => Some(extensions::IS_DATETIME),
      _ => None,
    }
  };

  if let Some(flag) = flag {
    model.vendor_extensions.set_flag(flag);
    model.vendor_extensions.set_flag(extensions::HAS_VARS);
  }
}
