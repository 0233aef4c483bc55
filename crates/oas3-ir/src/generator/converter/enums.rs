use std::collections::BTreeSet;

use serde_json::Value;

use crate::generator::{
  ast::{EnumDescriptor, EnumVariant},
  naming::identifiers::{ensure_unique, to_enum_var_name},
};

/// Builds an enum descriptor from raw enum values.
///
/// `null` entries are skipped. Values whose variant names collide get a
/// numeric suffix, and an empty string value becomes `EMPTY`.
pub(crate) fn describe_enum(name: &str, values: &[Value]) -> EnumDescriptor {
  let mut used = BTreeSet::new();
  let variants = values
    .iter()
    .filter_map(enum_value_text)
    .map(|value| {
      let variant_name = ensure_unique(&to_enum_var_name(&value), &used);
      used.insert(variant_name.clone());
      EnumVariant {
        name: variant_name,
        value,
      }
    })
    .collect();

  EnumDescriptor {
    name: name.to_string(),
    variants,
  }
}

fn enum_value_text(value: &Value) -> Option<String> {
  match value {
    Value::Null => None,
    Value::String(s) => Some(s.clone()),
    other => Some(other.to_string()),
  }
}
