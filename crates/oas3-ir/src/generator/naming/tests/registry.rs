use crate::generator::{
  ast::{ModelDescriptor, ModelFlag},
  metrics::GenerationWarning,
  registry::ModelRegistry,
  schema::ModelOrigin,
};

#[test]
fn test_register_allocates_unique_names() {
  let mut registry = ModelRegistry::new();

  let first = registry.register("user_profile", ModelOrigin::Declared);
  let second = registry.register("UserProfile", ModelOrigin::Declared);
  let again = registry.register("user_profile", ModelOrigin::Composed);

  assert_eq!(first.class_name, "UserProfile");
  assert_eq!(second.class_name, "UserProfile2");
  assert_eq!(again.class_name, "UserProfile");
  assert_eq!(registry.len(), 2);
  assert_eq!(registry.get("user_profile").unwrap().origin, ModelOrigin::Declared);
}

#[test]
fn test_register_reports_escaped_names() {
  let mut registry = ModelRegistry::new();
  let registration = registry.register("enum", ModelOrigin::Declared);

  assert_eq!(registration.class_name, "ModelEnum");
  assert_eq!(
    registration.warning,
    Some(GenerationWarning::ReservedModelName {
      name: "enum".to_string(),
      class_name: "ModelEnum".to_string(),
    })
  );
}

#[test]
fn test_install_keeps_allocated_identity() {
  let mut registry = ModelRegistry::new();
  registry.register("Body1", ModelOrigin::RequestBody);

  let mut descriptor = ModelDescriptor::new("Body1", "Whatever", ModelOrigin::Declared);
  descriptor.flags.insert(ModelFlag::Record);
  registry.install(descriptor);

  let stored = registry.get("Body1").unwrap();
  assert_eq!(stored.class_name, "Body1");
  assert_eq!(stored.origin, ModelOrigin::RequestBody);
  assert!(stored.flags.contains(&ModelFlag::Record));

  registry.install(ModelDescriptor::new("Unknown", "Unknown", ModelOrigin::Declared));
  assert!(!registry.contains_key("Unknown"));
}

#[test]
fn test_rename_suffixes_on_collision() {
  let mut registry = ModelRegistry::new();
  registry.register("Widget", ModelOrigin::Declared);
  registry.register("Body1", ModelOrigin::RequestBody);

  assert_eq!(registry.rename("Body1", "widget").as_deref(), Some("Widget2"));
  assert!(!registry.is_taken("Body1"));
  assert!(registry.is_taken("Widget2"));
  assert_eq!(registry.rename("missing", "Anything"), None);

  // Renaming to the name already held is a no-op.
  assert_eq!(registry.rename("Widget", "Widget").as_deref(), Some("Widget"));
}

#[test]
fn test_rename_if_free() {
  let mut registry = ModelRegistry::new();
  registry.register("Pet", ModelOrigin::Declared);
  registry.register("OneOfPet", ModelOrigin::Composed);
  registry.register("OneOfCat", ModelOrigin::Composed);

  assert!(!registry.rename_if_free("OneOfPet", "Pet"));
  assert_eq!(registry.class_name("OneOfPet"), Some("OneOfPet"));

  assert!(registry.rename_if_free("OneOfCat", "Cat"));
  assert_eq!(registry.class_name("OneOfCat"), Some("Cat"));
  assert!(!registry.is_taken("OneOfCat"));
}

#[test]
fn test_remove_releases_name() {
  let mut registry = ModelRegistry::new();
  registry.register("Pet", ModelOrigin::Declared);
  registry.register("OneOfPet", ModelOrigin::Composed);

  let removed = registry.remove("Pet").unwrap();
  assert_eq!(removed.class_name, "Pet");
  assert!(registry.remove("Pet").is_none());

  assert!(registry.rename_if_free("OneOfPet", "Pet"));
  let models = registry.into_models();
  assert_eq!(models.keys().collect::<Vec<_>>(), ["Pet"]);
  assert_eq!(models["Pet"].canonical_key, "OneOfPet");
}
