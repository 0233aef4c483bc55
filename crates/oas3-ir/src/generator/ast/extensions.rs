//! Renderer-facing flag keys. Values are JSON so the renderer can branch on
//! them without further inference.

use std::collections::BTreeMap;

use super::TypeDescriptor;

pub type VendorExtensions = BTreeMap<String, serde_json::Value>;

pub const HAS_VARS: &str = "has-vars";
pub const IS_ENUM: &str = "is-enum";

pub const IS_BOOL: &str = "x-rustgen-is-bool";
pub const IS_INTEGER: &str = "x-rustgen-is-integer";
pub const IS_STRING: &str = "x-rustgen-is-string";
pub const IS_DATETIME: &str = "x-rustgen-is-datetime";
pub const IS_ARRAY: &str = "x-rustgen-is-array";
pub const HAS_STRING: &str = "x-rustgen-has-string";
pub const HAS_EMPTY_ENUM: &str = "x-rustgen-has-empty-enum";
pub const SERDE_NO_RENAME: &str = "x-rustgen-serde-no-rename";
pub const ENUM_ONE_OF: &str = "x-rustgen-enum-one-of";
pub const IS_DISPLAY: &str = "x-rustgen-is-display";
pub const VARIANT_COUNT: &str = "x-rustgen-variant-count";
pub const BODY_MODEL: &str = "x-rustgen-body-model";

pub const IS_CONTAINER: &str = "x-is-container";
pub const IS_LIST_CONTAINER: &str = "x-is-list-container";
pub const IS_MAP_CONTAINER: &str = "x-is-map-container";
pub const IS_OBJECT: &str = "x-is-object";

pub const IMPL_PER_PAGE: &str = "x-codegen-impl-per-page";
pub const HAS_OPTIONAL_QUERY_PARAMS: &str = "x-codegen-has-optional-query-params";
pub const HAS_STRING_PARAMS: &str = "x-codegen-has-string-params";
pub const RESPONSE_EMPTY_DEFAULT: &str = "x-codegen-response-empty-default";
pub const BODY_BYTES: &str = "x-codegen-body-bytes";
pub const HAS_PREVIEWS: &str = "x-codegen-has-previews";

pub trait ExtensionsExt {
  fn set_flag(&mut self, key: &str);
  fn has_flag(&self, key: &str) -> bool;

  /// Marks list and map shapes of `data_type` as containers.
  fn set_container_flags(&mut self, data_type: &TypeDescriptor) {
    if data_type.is_map {
      self.set_flag(IS_CONTAINER);
      self.set_flag(IS_MAP_CONTAINER);
    } else if data_type.is_list() {
      self.set_flag(IS_CONTAINER);
      self.set_flag(IS_LIST_CONTAINER);
    }
  }
}

impl ExtensionsExt for VendorExtensions {
  fn set_flag(&mut self, key: &str) {
    self.insert(key.to_string(), serde_json::Value::Bool(true));
  }

  fn has_flag(&self, key: &str) -> bool {
    self.get(key).is_some_and(|v| v.as_bool() == Some(true))
  }
}
