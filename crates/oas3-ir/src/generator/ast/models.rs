use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum::Display;

use super::{TypeDescriptor, VendorExtensions};
use crate::generator::schema::ModelOrigin;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, bon::Builder)]
pub struct PropertyDescriptor {
  #[builder(into)]
  pub name: String,
  #[builder(into)]
  pub base_name: String,
  #[serde(rename = "type")]
  pub data_type: TypeDescriptor,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub items: Option<TypeDescriptor>,
  #[builder(default)]
  #[serde(default)]
  pub required: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub enum_values: Option<EnumDescriptor>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub union: Option<UnionDescriptor>,
  #[builder(default)]
  #[serde(default, skip_serializing_if = "VendorExtensions::is_empty")]
  pub vendor_extensions: VendorExtensions,
}

impl PropertyDescriptor {
  /// Every type descriptor reachable from this property.
  pub fn type_descriptors_mut(&mut self) -> Vec<&mut TypeDescriptor> {
    let mut found = vec![&mut self.data_type];
    if let Some(items) = self.items.as_mut() {
      found.push(items);
    }
    if let Some(union) = self.union.as_mut() {
      for variant in &mut union.variants {
        found.extend(variant.type_descriptors_mut());
      }
    }
    found
  }

  pub fn type_descriptors(&self) -> Vec<&TypeDescriptor> {
    let mut found = vec![&self.data_type];
    found.extend(self.items.as_ref());
    if let Some(union) = self.union.as_ref() {
      for variant in &union.variants {
        found.extend(variant.type_descriptors());
      }
    }
    found
  }
}

/// Flattened `oneOf`/`anyOf` variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnionDescriptor {
  pub variants: Vec<PropertyDescriptor>,
  pub is_displayable: bool,
  /// Number of emitted variants, counted after deduplication.
  pub variant_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumVariant {
  pub name: String,
  pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDescriptor {
  pub name: String,
  pub variants: Vec<EnumVariant>,
}

impl EnumDescriptor {
  pub fn has_empty_value(&self) -> bool {
    self.variants.iter().any(|v| v.value.is_empty())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ModelFlag {
  /// Plain record with named fields.
  Record,
  /// Newtype over a scalar, array or map.
  Alias,
  Enum,
  Union,
  MapLike,
  /// Hoisted request body renamed after its operation.
  BodyModel,
  /// Class name was replaced in the second naming pass.
  Renamed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor {
  pub canonical_key: String,
  pub class_name: String,
  pub origin: ModelOrigin,
  #[serde(default)]
  pub properties: Vec<PropertyDescriptor>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub union: Option<UnionDescriptor>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub data_type: Option<TypeDescriptor>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub enum_values: Option<EnumDescriptor>,
  #[serde(default)]
  pub flags: BTreeSet<ModelFlag>,
  #[serde(default, skip_serializing_if = "VendorExtensions::is_empty")]
  pub vendor_extensions: VendorExtensions,
}

impl ModelDescriptor {
  pub fn new(canonical_key: impl Into<String>, class_name: impl Into<String>, origin: ModelOrigin) -> Self {
    Self {
      canonical_key: canonical_key.into(),
      class_name: class_name.into(),
      origin,
      properties: vec![],
      union: None,
      data_type: None,
      enum_values: None,
      flags: BTreeSet::new(),
      vendor_extensions: VendorExtensions::new(),
    }
  }

  pub fn is_union(&self) -> bool {
    self.flags.contains(&ModelFlag::Union)
  }

  pub fn union_variants(&self) -> Option<&[PropertyDescriptor]> {
    self.union.as_ref().map(|u| u.variants.as_slice())
  }

  pub fn type_descriptors_mut(&mut self) -> Vec<&mut TypeDescriptor> {
    let mut found: Vec<&mut TypeDescriptor> = self.data_type.iter_mut().collect();
    for property in &mut self.properties {
      found.extend(property.type_descriptors_mut());
    }
    if let Some(union) = self.union.as_mut() {
      for variant in &mut union.variants {
        found.extend(variant.type_descriptors_mut());
      }
    }
    found
  }

  pub fn type_descriptors(&self) -> Vec<&TypeDescriptor> {
    let mut found: Vec<&TypeDescriptor> = self.data_type.iter().collect();
    for property in &self.properties {
      found.extend(property.type_descriptors());
    }
    if let Some(union) = self.union.as_ref() {
      for variant in &union.variants {
        found.extend(variant.type_descriptors());
      }
    }
    found
  }
}
