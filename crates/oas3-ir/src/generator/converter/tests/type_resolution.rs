use crate::generator::{
  ast::{RustPrimitive, TypeDescriptor},
  config::GeneratorConfig,
  converter::type_resolver::TypeResolver,
  errors::ResolveError,
  metrics::GenerationWarning,
  schema::{AdditionalProperties, ObjectSchema, ScalarKind, ScalarSchema, SchemaNode, UnionKind},
  tests::support::{
    integer_with_bounds, map_like_object, object_node, one_of, registry_with, sink, string_with_format,
  },
};

#[test]
fn test_scalar_table() {
  let registry = registry_with(&[]);
  let config = GeneratorConfig::default();
  let resolver = TypeResolver::new(&registry, &config);
  let mut warnings = sink();

  let cases = [
    (SchemaNode::number(), "f64"),
    (
      SchemaNode::scalar(ScalarSchema::new(ScalarKind::Number).with_format("float")),
      "f32",
    ),
    (SchemaNode::string(), "String"),
    (string_with_format("date-time"), "DateTime<Utc>"),
    (string_with_format("date"), "DateTime<Utc>"),
    (string_with_format("binary"), "Vec<u8>"),
    (string_with_format("uuid"), "uuid::Uuid"),
    (string_with_format("email"), "String"),
    (SchemaNode::boolean(), "bool"),
    (SchemaNode::integer(), "isize"),
  ];
  for (node, expected) in cases {
    let resolved = resolver.resolve(&node, "case", &mut warnings).unwrap();
    assert_eq!(resolved.name, expected);
    assert!(resolved.is_primitive, "{expected} should be primitive");
  }
  assert!(warnings.is_empty());
}

#[test]
fn test_displayable_scalars() {
  let registry = registry_with(&[]);
  let config = GeneratorConfig::default();
  let resolver = TypeResolver::new(&registry, &config);
  let mut warnings = sink();

  let cases = [
    (SchemaNode::string(), true),
    (SchemaNode::number(), true),
    (integer_with_bounds(Some(0), Some(9)), true),
    (SchemaNode::boolean(), false),
    (string_with_format("date-time"), false),
    (string_with_format("uuid"), false),
  ];
  for (node, expected) in cases {
    let resolved = resolver.resolve(&node, "x", &mut warnings).unwrap();
    assert_eq!(resolved.is_displayable, expected, "{}", resolved.name);
  }
}

#[test]
fn test_integer_bounds_through_resolver() {
  let registry = registry_with(&[]);
  let config = GeneratorConfig::default();
  let resolver = TypeResolver::new(&registry, &config);
  let mut warnings = sink();

  let small = resolver
    .resolve(&integer_with_bounds(Some(0), Some(100)), "small", &mut warnings)
    .unwrap();
  assert_eq!(small.as_primitive(), Some(RustPrimitive::U8));

  let signed = resolver
    .resolve(&integer_with_bounds(Some(-5), Some(1000)), "signed", &mut warnings)
    .unwrap();
  assert_eq!(signed.as_primitive(), Some(RustPrimitive::I16));
}

#[test]
fn test_invalid_bound_carries_location() {
  let registry = registry_with(&[]);
  let config = GeneratorConfig::default();
  let resolver = TypeResolver::new(&registry, &config);
  let mut warnings = sink();

  let err = resolver
    .resolve(&integer_with_bounds(Some(0), Some(-4)), "Widget.count", &mut warnings)
    .unwrap_err();
  let ResolveError::InvalidBound { location, .. } = &err else {
    panic!("expected invalid bound, got {err:?}");
  };
  assert_eq!(location.as_deref(), Some("Widget.count"));
  assert!(err.to_string().contains("Widget.count"));
}

#[test]
fn test_fixed_width_config_applies_to_resolver() {
  let registry = registry_with(&[]);
  let config = GeneratorConfig::builder().pointer_sized_integers(false).build();
  let resolver = TypeResolver::new(&registry, &config);

  let resolved = resolver.resolve(&SchemaNode::integer(), "n", &mut sink()).unwrap();
  assert_eq!(resolved.name, "i64");
}

#[test]
fn test_array_of_references() {
  let registry = registry_with(&["widget"]);
  let config = GeneratorConfig::default();
  let resolver = TypeResolver::new(&registry, &config);

  let resolved = resolver
    .resolve(&SchemaNode::array(Some(SchemaNode::reference("widget"))), "list", &mut sink())
    .unwrap();
  assert_eq!(resolved.name, "Vec<Widget>");
  assert!(resolved.is_list());
  assert!(!resolved.is_displayable);

  let inner = resolved.inner.as_deref().unwrap();
  assert_eq!(inner.reference.as_deref(), Some("widget"));
  assert_eq!(inner.name, "Widget");
}

#[test]
fn test_array_without_items_synthesizes_string_and_warns_once() {
  let registry = registry_with(&[]);
  let config = GeneratorConfig::default();
  let resolver = TypeResolver::new(&registry, &config);
  let mut warnings = sink();

  let node = SchemaNode::array(None);
  let resolved = resolver.resolve(&node, "Widget.tags", &mut warnings).unwrap();

  assert_eq!(resolved.name, "Vec<String>");
  let item = resolved.inner.as_deref().unwrap();
  assert!(item.synthesized);
  assert_eq!(item.as_primitive(), Some(RustPrimitive::String));

  assert_eq!(warnings.len(), 1);
  assert!(matches!(
    warnings.iter().next(),
    Some(GenerationWarning::MissingArrayItems { location }) if location == "Widget.tags"
  ));

  assert_eq!(node, SchemaNode::array(None), "input node must not change");
}

#[test]
fn test_maps() {
  let registry = registry_with(&["widget"]);
  let config = GeneratorConfig::default();
  let resolver = TypeResolver::new(&registry, &config);
  let mut warnings = sink();

  let typed = resolver
    .resolve(&SchemaNode::map(Some(SchemaNode::reference("widget"))), "m", &mut warnings)
    .unwrap();
  assert_eq!(typed.name, "HashMap<String, Widget>");
  assert!(typed.is_map);

  let open = resolver.resolve(&SchemaNode::map(None), "m", &mut warnings).unwrap();
  assert_eq!(open.name, "HashMap<String, Value>");

  let with_schema = ObjectSchema {
    additional_properties: Some(AdditionalProperties::Schema(Box::new(SchemaNode::integer()))),
    ..ObjectSchema::default()
  };
  let object_map = resolver
    .resolve(&SchemaNode::object(with_schema), "m", &mut warnings)
    .unwrap();
  assert_eq!(object_map.name, "HashMap<String, isize>");

  let map_like = resolver
    .resolve(
      &SchemaNode::object(map_like_object(&[("a", SchemaNode::string())])),
      "m",
      &mut warnings,
    )
    .unwrap();
  assert_eq!(map_like.name, "HashMap<String, Value>");
  assert!(warnings.is_empty());
}

#[test]
fn test_open_objects_fall_back_to_value() {
  let registry = registry_with(&[]);
  let config = GeneratorConfig::default();
  let resolver = TypeResolver::new(&registry, &config);
  let mut warnings = sink();

  let empty = resolver
    .resolve(&SchemaNode::object(ObjectSchema::default()), "payload", &mut warnings)
    .unwrap();
  assert_eq!(empty, TypeDescriptor::dynamic());
  assert!(!empty.is_primitive);
  assert!(!empty.is_displayable);
  assert!(warnings.is_empty());

  let inline = resolver
    .resolve(&object_node(&[("id", SchemaNode::string())], &[]), "inline", &mut warnings)
    .unwrap();
  assert!(inline.is_dynamic());
  assert_eq!(warnings.len(), 1);
}

#[test]
fn test_inline_union_collapses_to_single_distinct_type() {
  let registry = registry_with(&[]);
  let config = GeneratorConfig::default();
  let resolver = TypeResolver::new(&registry, &config);
  let mut warnings = sink();

  let same = one_of(vec![SchemaNode::string(), string_with_format("email")]);
  assert_eq!(resolver.resolve(&same, "u", &mut warnings).unwrap().name, "String");
  assert!(warnings.is_empty());

  let mixed = SchemaNode::union(UnionKind::AnyOf, vec![SchemaNode::string(), SchemaNode::boolean()]);
  assert!(resolver.resolve(&mixed, "u", &mut warnings).unwrap().is_dynamic());
  assert!(matches!(
    warnings.iter().next(),
    Some(GenerationWarning::DynamicFallback { reason, .. }) if reason.contains("AnyOf")
  ));
}

#[test]
fn test_unknown_reference_is_fatal() {
  let registry = registry_with(&["widget"]);
  let config = GeneratorConfig::default();
  let resolver = TypeResolver::new(&registry, &config);

  let err = resolver
    .resolve(&SchemaNode::array(Some(SchemaNode::reference("gadget"))), "list", &mut sink())
    .unwrap_err();
  assert_eq!(err, ResolveError::unresolved("gadget"));
}

#[test]
fn test_canonical_name_comparison() {
  let mut qualified = TypeDescriptor::model("widget", "models::Widget");
  assert!(qualified.same_type(&TypeDescriptor::model("widget", "Widget")));

  qualified.name = "HashMap<String,  models::Widget>".to_string();
  assert_eq!(qualified.canonical_name(), "HashMap<String,Widget>");
}
