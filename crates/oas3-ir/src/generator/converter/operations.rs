//! Operation descriptors and the first naming pass.
//!
//! While an operation is built, any request body or response that points at a
//! hoisted inline model and carries an operation name hint leaves a suggestion
//! in the patch table. The models themselves are renamed later, once every
//! operation has been seen.

use tracing::{debug, trace};

use super::{
  BODY_FIELD_NAME, DEFAULT_RESPONSE_CODE, RESPONSE_SUFFIX, SUCCESS_RESPONSE_PREFIX, type_resolver::TypeResolver,
};
use crate::generator::{
  ast::{
    ExtensionsExt, OperationDescriptor, ParameterDescriptor, PropertyDescriptor, ResponseDescriptor, RustPrimitive,
    TypeDescriptor, VendorExtensions, extensions,
  },
  config::GeneratorConfig,
  errors::ResolveResult,
  metrics::WarningSink,
  naming::{
    identifiers::{camelize, strip_operation_namespace, synthesize_operation_id, to_operation_nickname, to_var_name},
    patch_table::NamePatchTable,
  },
  registry::ModelRegistry,
  schema::{
    Metadata, ModelOrigin, OperationSpec, ParameterLocation, ParameterSpec, RequestBodySpec, ResponseSpec,
    operation_name_hint,
  },
};

const PER_PAGE_PARAM: &str = "per_page";
const PAGE_PARAM: &str = "page";
const GITHUB_METADATA: &str = "x-github";
const PREVIEWS_KEY: &str = "previews";

pub(crate) struct OperationConverter<'a> {
  resolver: TypeResolver<'a>,
  config: &'a GeneratorConfig,
}

impl<'a> OperationConverter<'a> {
  pub(crate) fn new(registry: &'a ModelRegistry, config: &'a GeneratorConfig) -> Self {
    Self {
      resolver: TypeResolver::new(registry, config),
      config,
    }
  }

  pub(crate) fn convert(
    &self,
    operation: &OperationSpec,
    patches: &mut NamePatchTable,
    warnings: &mut WarningSink,
  ) -> ResolveResult<OperationDescriptor> {
    let operation_id = self.operation_id(operation);
    let nickname = to_operation_nickname(&operation_id);
    let tag = operation
      .tags
      .first()
      .cloned()
      .unwrap_or_else(|| self.config.default_tag.clone());

    let mut descriptor = OperationDescriptor {
      operation_id,
      nickname,
      path: operation.path.clone(),
      http_method: normalize_method(&operation.method),
      tag,
      body: None,
      path_params: vec![],
      query_params: vec![],
      header_params: vec![],
      responses: vec![],
      vendor_extensions: VendorExtensions::new(),
    };

    for parameter in &operation.parameters {
      let converted = self.convert_parameter(&descriptor.operation_id, parameter, warnings)?;
      match parameter.location {
        ParameterLocation::Path => descriptor.path_params.push(converted),
        ParameterLocation::Query => descriptor.query_params.push(converted),
        ParameterLocation::Header => descriptor.header_params.push(converted),
        ParameterLocation::Cookie => {
          debug!(operation = %descriptor.operation_id, parameter = %parameter.name, "skipping cookie parameter");
        }
      }
    }

    if let Some(body) = &operation.request_body {
      let converted = self.convert_body(&mut descriptor, body, patches, warnings)?;
      descriptor.body = Some(converted);
    }

    for (code, response) in &operation.responses {
      let converted = self.convert_response(&descriptor.operation_id, code, response, patches, warnings)?;
      descriptor.responses.push(converted);
    }

    apply_query_flags(&mut descriptor);
    apply_operation_flags(&mut descriptor, &operation.metadata);

    trace!(operation = %descriptor.operation_id, tag = %descriptor.tag, "converted operation");
    Ok(descriptor)
  }

  fn operation_id(&self, operation: &OperationSpec) -> String {
    let raw = operation
      .operation_id
      .as_deref()
      .map(str::trim)
      .filter(|id| !id.is_empty())
      .map_or_else(
        || synthesize_operation_id(&operation.method, &operation.path),
        ToString::to_string,
      );

    if self.config.strip_operation_namespace {
      strip_operation_namespace(&raw).to_string()
    } else {
      raw
    }
  }

  fn convert_parameter(
    &self,
    operation_id: &str,
    parameter: &ParameterSpec,
    warnings: &mut WarningSink,
  ) -> ResolveResult<ParameterDescriptor> {
    let location = format!("{operation_id}({})", parameter.name);
    let data_type = self.resolver.resolve(&parameter.schema, &location, warnings)?;
    Ok(
      ParameterDescriptor::builder()
        .name(to_var_name(&parameter.name))
        .base_name(parameter.name.as_str())
        .data_type(data_type)
        .location(parameter.location)
        .required(parameter.required || parameter.location == ParameterLocation::Path)
        .build(),
    )
  }

  fn convert_body(
    &self,
    operation: &mut OperationDescriptor,
    body: &RequestBodySpec,
    patches: &mut NamePatchTable,
    warnings: &mut WarningSink,
  ) -> ResolveResult<PropertyDescriptor> {
    let location = format!("{}({BODY_FIELD_NAME})", operation.operation_id);
    let mut data_type = self.resolver.resolve(&body.schema, &location, warnings)?;

    if data_type.is_dynamic() || data_type.as_primitive() == Some(RustPrimitive::Bytes) {
      data_type = TypeDescriptor::primitive(RustPrimitive::Bytes);
      operation.vendor_extensions.set_flag(extensions::BODY_BYTES);
    }

    if let Some(key) = body.schema.reference_name() {
      self.suggest_body_name(key, &body.metadata, patches);
    }

    let mut vendor_extensions = VendorExtensions::new();
    if data_type.is_map {
      vendor_extensions.set_container_flags(&data_type);
    }

    let items = data_type.is_list().then(|| data_type.inner.as_deref().cloned()).flatten();
    Ok(
      PropertyDescriptor::builder()
        .name(BODY_FIELD_NAME)
        .base_name(BODY_FIELD_NAME)
        .data_type(data_type)
        .maybe_items(items)
        .required(body.required)
        .vendor_extensions(vendor_extensions)
        .build(),
    )
  }

  fn suggest_body_name(&self, key: &str, metadata: &Metadata, patches: &mut NamePatchTable) {
    let Some(operation_name) = operation_name_hint(metadata) else {
      return;
    };
    if !self.has_origin(key, ModelOrigin::RequestBody) {
      return;
    }
    if self.config.is_excluded_body(key) || self.config.is_excluded_body(&camelize(key)) {
      debug!(key, "body name excluded from patching");
      return;
    }
    if patches.suggest(key, operation_name) {
      debug!(key, suggestion = operation_name, "recorded body name");
    }
  }

  fn convert_response(
    &self,
    operation_id: &str,
    code: &str,
    response: &ResponseSpec,
    patches: &mut NamePatchTable,
    warnings: &mut WarningSink,
  ) -> ResolveResult<ResponseDescriptor> {
    let location = format!("{operation_id}[{code}]");
    let data_type = response
      .schema
      .as_ref()
      .map(|schema| self.resolver.resolve(schema, &location, warnings))
      .transpose()?;

    if let Some(key) = response.schema.as_ref().and_then(|s| s.reference_name()) {
      self.suggest_response_name(key, code, &response.metadata, patches);
    }

    Ok(ResponseDescriptor {
      code: code.to_string(),
      is_default: code.eq_ignore_ascii_case(DEFAULT_RESPONSE_CODE),
      is_success: is_success_code(code),
      data_type,
      description: response.description.clone(),
    })
  }

  fn suggest_response_name(&self, key: &str, code: &str, metadata: &Metadata, patches: &mut NamePatchTable) {
    if let Some(class_name) = self.resolver.registry().class_name(key)
      && let Some(replacement) = self.config.response_override(class_name)
    {
      patches.force(key, replacement);
      debug!(key, replacement, "applied response name override");
      return;
    }

    let Some(operation_name) = operation_name_hint(metadata) else {
      return;
    };
    if !self.has_origin(key, ModelOrigin::InlineResponse) {
      return;
    }

    let suggestion = format!("{operation_name}{RESPONSE_SUFFIX}{}", camelize(code));
    if patches.suggest(key, suggestion.as_str()) {
      debug!(key, suggestion, "recorded response name");
    }
  }

  fn has_origin(&self, key: &str, origin: ModelOrigin) -> bool {
    self.resolver.registry().get(key).is_some_and(|m| m.origin == origin)
  }
}

fn normalize_method(method: &str) -> String {
  let upper = method.trim().to_ascii_uppercase();
  http::Method::from_bytes(upper.as_bytes()).map_or(upper, |m| m.to_string())
}

/// `2XX` ranges count as success alongside concrete 2xx codes.
fn is_success_code(code: &str) -> bool {
  match code.parse::<u16>().ok().and_then(|c| http::StatusCode::from_u16(c).ok()) {
    Some(status) => status.is_success(),
    None => code.starts_with(SUCCESS_RESPONSE_PREFIX),
  }
}

/// Pagination and query parameter flags.
///
/// `per_page` and `page` are always `u16`. Only an operation taking both gets
/// the pagination flag.
fn apply_query_flags(operation: &mut OperationDescriptor) {
  let (mut has_per_page, mut has_page) = (false, false);
  for param in &mut operation.query_params {
    match param.base_name.as_str() {
      PER_PAGE_PARAM => has_per_page = true,
      PAGE_PARAM => has_page = true,
      _ => continue,
    }
    param.data_type = TypeDescriptor::primitive(RustPrimitive::U16);
  }
  if has_per_page && has_page {
    operation.vendor_extensions.set_flag(extensions::IMPL_PER_PAGE);
  }

  if operation.query_params.iter().all(|p| !p.required) {
    operation.vendor_extensions.set_flag(extensions::HAS_OPTIONAL_QUERY_PARAMS);
  }

  let has_string_params = operation.query_params.iter().any(|p| {
    matches!(
      p.data_type.as_primitive(),
      Some(RustPrimitive::String | RustPrimitive::Uuid)
    )
  });
  if has_string_params {
    operation.vendor_extensions.set_flag(extensions::HAS_STRING_PARAMS);
  }
}

fn apply_operation_flags(operation: &mut OperationDescriptor, metadata: &Metadata) {
  if !operation.responses.iter().any(|r| r.is_default) {
    operation.vendor_extensions.set_flag(extensions::RESPONSE_EMPTY_DEFAULT);
  }

  let has_previews = metadata
    .get(GITHUB_METADATA)
    .and_then(|github| github.get(PREVIEWS_KEY))
    .and_then(serde_json::Value::as_array)
    .is_some_and(|previews| !previews.is_empty());
  if has_previews {
    operation.vendor_extensions.set_flag(extensions::HAS_PREVIEWS);
  }
}
