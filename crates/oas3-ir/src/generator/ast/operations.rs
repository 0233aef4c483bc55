use serde::{Deserialize, Serialize};

use super::{PropertyDescriptor, TypeDescriptor, VendorExtensions};
use crate::generator::schema::ParameterLocation;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, bon::Builder)]
pub struct ParameterDescriptor {
  #[builder(into)]
  pub name: String,
  #[builder(into)]
  pub base_name: String,
  #[serde(rename = "type")]
  pub data_type: TypeDescriptor,
  pub location: ParameterLocation,
  #[builder(default)]
  #[serde(default)]
  pub required: bool,
  #[builder(default)]
  #[serde(default, skip_serializing_if = "VendorExtensions::is_empty")]
  pub vendor_extensions: VendorExtensions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseDescriptor {
  pub code: String,
  pub is_default: bool,
  pub is_success: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub data_type: Option<TypeDescriptor>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationDescriptor {
  pub operation_id: String,
  /// `snake_case` method name for the renderer.
  pub nickname: String,
  pub path: String,
  pub http_method: String,
  pub tag: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub body: Option<PropertyDescriptor>,
  #[serde(default)]
  pub path_params: Vec<ParameterDescriptor>,
  #[serde(default)]
  pub query_params: Vec<ParameterDescriptor>,
  #[serde(default)]
  pub header_params: Vec<ParameterDescriptor>,
  #[serde(default)]
  pub responses: Vec<ResponseDescriptor>,
  #[serde(default, skip_serializing_if = "VendorExtensions::is_empty")]
  pub vendor_extensions: VendorExtensions,
}

impl OperationDescriptor {
  pub fn parameters(&self) -> impl Iterator<Item = &ParameterDescriptor> {
    self
      .path_params
      .iter()
      .chain(&self.query_params)
      .chain(&self.header_params)
  }

  pub fn type_descriptors_mut(&mut self) -> Vec<&mut TypeDescriptor> {
    let mut found = vec![];
    if let Some(body) = self.body.as_mut() {
      found.extend(body.type_descriptors_mut());
    }
    for param in self
      .path_params
      .iter_mut()
      .chain(self.query_params.iter_mut())
      .chain(self.header_params.iter_mut())
    {
      found.push(&mut param.data_type);
    }
    found.extend(self.responses.iter_mut().filter_map(|r| r.data_type.as_mut()));
    found
  }

  pub fn type_descriptors(&self) -> Vec<&TypeDescriptor> {
    let mut found = vec![];
    if let Some(body) = self.body.as_ref() {
      found.extend(body.type_descriptors());
    }
    found.extend(self.parameters().map(|p| &p.data_type));
    found.extend(self.responses.iter().filter_map(|r| r.data_type.as_ref()));
    found
  }
}
