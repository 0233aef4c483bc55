use std::collections::{BTreeMap, BTreeSet};

use bon::Builder;

pub const DEFAULT_TAG: &str = "default";

/// Knobs for one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct GeneratorConfig {
  /// When `false`, bound-less integers resolve to `i64`/`u64` instead of `isize`/`usize`.
  #[builder(default = true)]
  pub pointer_sized_integers: bool,
  /// Synthetic body keys that must keep their mechanical name.
  #[builder(default)]
  pub exclude_body_names: BTreeSet<String>,
  /// `TypeName -> NewName` applied to response types regardless of other hints.
  #[builder(default)]
  pub response_name_overrides: BTreeMap<String, String>,
  #[builder(default = DEFAULT_TAG.to_string(), into)]
  pub default_tag: String,
  /// Strip a leading `namespace/` from operation ids.
  #[builder(default = true)]
  pub strip_operation_namespace: bool,
}

impl Default for GeneratorConfig {
  fn default() -> Self {
    Self::builder().build()
  }
}

impl GeneratorConfig {
  pub fn response_override(&self, type_name: &str) -> Option<&str> {
    self.response_name_overrides.get(type_name).map(String::as_str)
  }

  pub fn is_excluded_body(&self, key: &str) -> bool {
    self.exclude_body_names.contains(key)
  }
}
