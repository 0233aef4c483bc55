use std::collections::{BTreeMap, BTreeSet};

use serde_json::json;

use crate::generator::{
  ast::{ExtensionsExt, OperationDescriptor, extensions},
  config::GeneratorConfig,
  converter::operations::OperationConverter,
  naming::patch_table::NamePatchTable,
  registry::ModelRegistry,
  schema::{
    ModelOrigin, OperationSpec, ParameterLocation, ParameterSpec, RequestBodySpec, SchemaNode, ScalarKind,
    ScalarSchema,
  },
  tests::support::{
    hinted_body, hinted_response, integer_with_bounds, operation, plain_response, query_param, sink,
    string_with_format,
  },
};

fn synthetic_registry() -> ModelRegistry {
  let mut registry = ModelRegistry::new();
  registry.register("Body1", ModelOrigin::RequestBody);
  registry.register("inline_response_200", ModelOrigin::InlineResponse);
  registry.register("Widget", ModelOrigin::Declared);
  registry
}

fn convert_with(
  registry: &ModelRegistry,
  config: &GeneratorConfig,
  spec: &OperationSpec,
  patches: &mut NamePatchTable,
) -> OperationDescriptor {
  OperationConverter::new(registry, config)
    .convert(spec, patches, &mut sink())
    .unwrap()
}

fn convert(spec: &OperationSpec) -> OperationDescriptor {
  let registry = synthetic_registry();
  convert_with(&registry, &GeneratorConfig::default(), spec, &mut NamePatchTable::new())
}

#[test]
fn test_first_body_suggestion_wins() {
  let registry = synthetic_registry();
  let config = GeneratorConfig::default();
  let mut patches = NamePatchTable::new();

  let mut create = operation("createWidget", "post", "/widgets");
  create.request_body = Some(hinted_body("Body1", "createWidget"));
  let mut replace = operation("replaceWidget", "put", "/widgets/{id}");
  replace.request_body = Some(hinted_body("Body1", "replaceWidget"));

  let created = convert_with(&registry, &config, &create, &mut patches);
  convert_with(&registry, &config, &replace, &mut patches);

  assert_eq!(patches.suggestion("Body1"), Some("createWidget"));
  assert_eq!(patches.len(), 1);

  let body = created.body.unwrap();
  assert_eq!(body.name, "body");
  assert_eq!(body.data_type.name, "Body1");
  assert_eq!(body.data_type.reference.as_deref(), Some("Body1"));
  assert!(body.required);
}

#[test]
fn test_body_suggestions_need_hint_and_synthetic_origin() {
  let registry = synthetic_registry();
  let config = GeneratorConfig::default();
  let mut patches = NamePatchTable::new();

  let mut unhinted = operation("createWidget", "post", "/widgets");
  unhinted.request_body = Some(RequestBodySpec {
    schema: SchemaNode::reference("Body1"),
    required: true,
    metadata: BTreeMap::new(),
  });
  convert_with(&registry, &config, &unhinted, &mut patches);

  let mut declared = operation("updateWidget", "patch", "/widgets/{id}");
  declared.request_body = Some(hinted_body("Widget", "updateWidget"));
  convert_with(&registry, &config, &declared, &mut patches);

  assert!(patches.is_empty());
}

#[test]
fn test_excluded_body_keeps_mechanical_name() {
  let registry = synthetic_registry();
  let config = GeneratorConfig::builder()
    .exclude_body_names(BTreeSet::from(["Body1".to_string()]))
    .build();
  let mut patches = NamePatchTable::new();

  let mut create = operation("createWidget", "post", "/widgets");
  create.request_body = Some(hinted_body("Body1", "createWidget"));
  convert_with(&registry, &config, &create, &mut patches);

  assert_eq!(patches.suggestion("Body1"), None);
}

#[test]
fn test_inline_response_suggestion_includes_code() {
  let registry = synthetic_registry();
  let config = GeneratorConfig::default();
  let mut patches = NamePatchTable::new();

  let mut get = operation("getWidget", "get", "/widgets/{id}");
  get.responses.insert("200".to_string(), hinted_response("inline_response_200", "getWidget"));
  get.responses.insert("404".to_string(), plain_response(None));
  let descriptor = convert_with(&registry, &config, &get, &mut patches);

  assert_eq!(patches.suggestion("inline_response_200"), Some("getWidgetResponse200"));
  assert!(!patches.is_forced("inline_response_200"));

  let ok = &descriptor.responses[0];
  assert!(ok.is_success);
  assert_eq!(ok.data_type.as_ref().map(|t| t.name.as_str()), Some("InlineResponse200"));
  let missing = &descriptor.responses[1];
  assert!(!missing.is_success);
  assert!(missing.data_type.is_none());
}

#[test]
fn test_response_override_is_forced() {
  let registry = synthetic_registry();
  let config = GeneratorConfig::builder()
    .response_name_overrides(BTreeMap::from([
      ("InlineResponse200".to_string(), "WidgetPage".to_string()),
      ("Widget".to_string(), "WidgetRecord".to_string()),
    ]))
    .build();
  let mut patches = NamePatchTable::new();

  // An earlier hint does not stop the override from taking over.
  patches.suggest("inline_response_200", "listWidgetsResponse200");

  let mut list = operation("listWidgets", "get", "/widgets");
  list.responses.insert("200".to_string(), hinted_response("inline_response_200", "listWidgets"));
  list.responses.insert("201".to_string(), plain_response(Some(SchemaNode::reference("Widget"))));
  convert_with(&registry, &config, &list, &mut patches);

  assert!(patches.is_forced("inline_response_200"));
  assert_eq!(patches.suggestion("inline_response_200"), Some("WidgetPage"));
  assert!(patches.is_forced("Widget"));
  assert_eq!(patches.suggestion("Widget"), Some("WidgetRecord"));
}

#[test]
fn test_paging_parameters_become_u16() {
  let mut list = operation("listWidgets", "get", "/widgets");
  list.parameters = vec![
    query_param("per_page", SchemaNode::integer(), false),
    query_param("page", integer_with_bounds(Some(1), None), false),
  ];
  let descriptor = convert(&list);

  let types: Vec<_> = descriptor.query_params.iter().map(|p| p.data_type.name.as_str()).collect();
  assert_eq!(types, ["u16", "u16"]);
  assert!(descriptor.vendor_extensions.has_flag(extensions::IMPL_PER_PAGE));
  assert!(descriptor.vendor_extensions.has_flag(extensions::HAS_OPTIONAL_QUERY_PARAMS));
  assert!(!descriptor.vendor_extensions.has_flag(extensions::HAS_STRING_PARAMS));
}

#[test]
fn test_page_alone_is_retyped_without_pagination_flag() {
  let mut list = operation("listWidgets", "get", "/widgets");
  list.parameters = vec![
    query_param("page", SchemaNode::integer(), true),
    query_param("limit", SchemaNode::integer(), false),
  ];
  let descriptor = convert(&list);

  let types: Vec<_> = descriptor.query_params.iter().map(|p| p.data_type.name.as_str()).collect();
  assert_eq!(types, ["u16", "isize"]);
  assert!(!descriptor.vendor_extensions.has_flag(extensions::IMPL_PER_PAGE));
  assert!(!descriptor.vendor_extensions.has_flag(extensions::HAS_OPTIONAL_QUERY_PARAMS));
}

#[test]
fn test_string_query_params_flag() {
  let mut search = operation("searchWidgets", "get", "/widgets/search");
  search.parameters = vec![
    query_param("q", SchemaNode::string(), true),
    query_param("owner", string_with_format("uuid"), false),
  ];
  let descriptor = convert(&search);
  assert!(descriptor.vendor_extensions.has_flag(extensions::HAS_STRING_PARAMS));

  let mut by_date = operation("widgetsSince", "get", "/widgets/since");
  by_date.parameters = vec![query_param("since", string_with_format("date-time"), false)];
  let descriptor = convert(&by_date);
  assert!(!descriptor.vendor_extensions.has_flag(extensions::HAS_STRING_PARAMS));
}

#[test]
fn test_parameters_are_split_by_location() {
  let mut get = operation("getWidget", "get", "/widgets/{id}");
  get.parameters = vec![
    ParameterSpec {
      name: "id".to_string(),
      location: ParameterLocation::Path,
      required: false,
      schema: integer_with_bounds(Some(0), None),
    },
    ParameterSpec {
      name: "X-Request-Id".to_string(),
      location: ParameterLocation::Header,
      required: false,
      schema: SchemaNode::string(),
    },
    ParameterSpec {
      name: "session".to_string(),
      location: ParameterLocation::Cookie,
      required: true,
      schema: SchemaNode::string(),
    },
    query_param("ref", SchemaNode::string(), false),
  ];
  let descriptor = convert(&get);

  assert_eq!(descriptor.path_params.len(), 1);
  assert!(descriptor.path_params[0].required);
  assert_eq!(descriptor.path_params[0].data_type.name, "usize");

  assert_eq!(descriptor.header_params.len(), 1);
  assert_eq!(descriptor.header_params[0].name, "x_request_id");
  assert_eq!(descriptor.header_params[0].base_name, "X-Request-Id");

  assert_eq!(descriptor.query_params.len(), 1);
  assert_eq!(descriptor.query_params[0].name, "git_ref");
  assert_eq!(descriptor.parameters().count(), 3);
}

#[test]
fn test_operation_identity() {
  let mut namespaced = operation("repos/list-for-org", "get", "/orgs/{org}/repos");
  namespaced.tags = vec!["repos".to_string(), "orgs".to_string()];
  let descriptor = convert(&namespaced);
  assert_eq!(descriptor.operation_id, "list-for-org");
  assert_eq!(descriptor.nickname, "list_for_org");
  assert_eq!(descriptor.http_method, "GET");
  assert_eq!(descriptor.tag, "repos");

  let registry = synthetic_registry();
  let config = GeneratorConfig::builder()
    .strip_operation_namespace(false)
    .default_tag("misc")
    .build();
  let mut untagged = operation("repos/list-for-org", "get", "/orgs/{org}/repos");
  untagged.tags.clear();
  let descriptor = convert_with(&registry, &config, &untagged, &mut NamePatchTable::new());
  assert_eq!(descriptor.operation_id, "repos/list-for-org");
  assert_eq!(descriptor.tag, "misc");
}

#[test]
fn test_keyword_nickname_and_synthesized_id() {
  let descriptor = convert(&operation("match", "post", "/match"));
  assert_eq!(descriptor.nickname, "call_match");

  let mut anonymous = operation("", "delete", "/widgets/{id}");
  anonymous.operation_id = None;
  let descriptor = convert(&anonymous);
  assert_eq!(descriptor.operation_id, "deleteWidgetsId");
  assert_eq!(descriptor.http_method, "DELETE");
}

#[test]
fn test_untyped_and_binary_bodies_are_bytes() {
  let bodies = [
    SchemaNode::object(Default::default()),
    string_with_format("binary"),
    SchemaNode::map(None),
  ];

  for (index, schema) in bodies.into_iter().enumerate() {
    let mut upload = operation("upload", "post", "/upload");
    upload.request_body = Some(RequestBodySpec {
      schema,
      required: false,
      metadata: BTreeMap::new(),
    });
    let descriptor = convert(&upload);
    let body = descriptor.body.unwrap();

    if index < 2 {
      assert_eq!(body.data_type.name, "Vec<u8>", "body {index}");
      assert!(descriptor.vendor_extensions.has_flag(extensions::BODY_BYTES));
    } else {
      assert_eq!(body.data_type.name, "HashMap<String, Value>");
      assert!(!descriptor.vendor_extensions.has_flag(extensions::BODY_BYTES));
      assert!(body.vendor_extensions.has_flag(extensions::IS_CONTAINER));
      assert!(body.vendor_extensions.has_flag(extensions::IS_MAP_CONTAINER));
    }
  }
}

#[test]
fn test_array_body_exposes_items() {
  let mut bulk = operation("bulkCreate", "post", "/widgets/bulk");
  bulk.request_body = Some(RequestBodySpec {
    schema: SchemaNode::array(Some(SchemaNode::reference("Widget"))),
    required: true,
    metadata: BTreeMap::new(),
  });
  let body = convert(&bulk).body.unwrap();

  assert_eq!(body.data_type.name, "Vec<Widget>");
  assert!(body.vendor_extensions.is_empty());
  assert_eq!(body.items.map(|t| t.name), Some("Widget".to_string()));
}

#[test]
fn test_response_flags() {
  let mut plain = operation("ping", "get", "/ping");
  plain.responses.insert("204".to_string(), plain_response(None));
  let descriptor = convert(&plain);
  assert!(descriptor.vendor_extensions.has_flag(extensions::RESPONSE_EMPTY_DEFAULT));
  assert!(descriptor.responses[0].is_success);

  let mut with_default = operation("ping", "get", "/ping");
  with_default.responses.insert("2XX".to_string(), plain_response(None));
  with_default.responses.insert("default".to_string(), plain_response(None));
  let descriptor = convert(&with_default);
  assert!(!descriptor.vendor_extensions.has_flag(extensions::RESPONSE_EMPTY_DEFAULT));
  assert!(descriptor.responses[0].is_success);
  assert!(descriptor.responses[1].is_default);
  assert!(!descriptor.responses[1].is_success);
}

#[test]
fn test_previews_flag() {
  let mut previewed = operation("getTopics", "get", "/repos/{owner}/{repo}/topics");
  previewed
    .metadata
    .insert("x-github".to_string(), json!({ "previews": [{ "name": "mercy" }] }));
  assert!(convert(&previewed).vendor_extensions.has_flag(extensions::HAS_PREVIEWS));

  let mut empty = operation("getTopics", "get", "/repos/{owner}/{repo}/topics");
  empty.metadata.insert("x-github".to_string(), json!({ "previews": [] }));
  assert!(!convert(&empty).vendor_extensions.has_flag(extensions::HAS_PREVIEWS));
}

#[test]
fn test_unknown_body_reference_is_fatal() {
  let registry = synthetic_registry();
  let config = GeneratorConfig::default();
  let mut create = operation("createGadget", "post", "/gadgets");
  create.request_body = Some(hinted_body("Gadget", "createGadget"));

  let result = OperationConverter::new(&registry, &config).convert(&create, &mut NamePatchTable::new(), &mut sink());
  assert!(result.is_err());
}

#[test]
fn test_float_query_param() {
  let mut list = operation("nearby", "get", "/nearby");
  list.parameters = vec![query_param(
    "radius",
    SchemaNode::scalar(ScalarSchema::new(ScalarKind::Number).with_format("float")),
    true,
  )];
  let descriptor = convert(&list);
  assert_eq!(descriptor.query_params[0].data_type.name, "f32");
  assert_eq!(descriptor.query_params[0].location, ParameterLocation::Query);
}
