//! Second naming pass over the completed IR.
//!
//! Runs once every model and operation exists. Synthetic models take the
//! names suggested during operation construction, unnamed synthetic unions
//! are dropped, and every type reference is then rebuilt from the registry.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::generator::{
  ast::{
    ExtensionsExt, ModelDescriptor, ModelFlag, OperationDescriptor, TypeDescriptor, UnionDescriptor, extensions,
  },
  converter::UNION_MODEL_SUFFIX,
  metrics::{GenerationStats, GenerationWarning, WarningSink},
  naming::{identifiers::to_model_name, patch_table::NamePatchTable},
  registry::ModelRegistry,
  schema::{ModelOrigin, UnionKind},
};

pub(crate) struct NamePatcher<'a> {
  registry: &'a mut ModelRegistry,
  patches: &'a NamePatchTable,
}

impl<'a> NamePatcher<'a> {
  pub(crate) fn new(registry: &'a mut ModelRegistry, patches: &'a NamePatchTable) -> Self {
    Self { registry, patches }
  }

  pub(crate) fn run(
    mut self,
    operations: &mut [OperationDescriptor],
    warnings: &mut WarningSink,
    stats: &mut GenerationStats,
  ) {
    self.apply_suggestions(warnings, stats);
    self.settle_composed_models(operations, stats);
    self.relabel(operations, warnings);
  }

  fn apply_suggestions(&mut self, warnings: &mut WarningSink, stats: &mut GenerationStats) {
    let patches = self.patches;
    let candidates: Vec<(String, ModelOrigin, bool)> = self
      .registry
      .iter()
      .map(|(key, model)| (key.to_string(), model.origin, model.is_union()))
      .collect();

    for (key, origin, is_union) in candidates {
      if patches.is_forced(&key) {
        if let Some(name) = patches.suggestion(&key) {
          self.rename(&key, name, stats);
        }
        continue;
      }

      if !matches!(origin, ModelOrigin::RequestBody | ModelOrigin::InlineResponse) {
        continue;
      }

      match patches.suggestion(&key) {
        Some(suggestion) => {
          let desired = if is_union {
            format!("{}{UNION_MODEL_SUFFIX}", to_model_name(suggestion))
          } else {
            suggestion.to_string()
          };
          self.rename(&key, &desired, stats);
          if origin == ModelOrigin::RequestBody
            && let Some(model) = self.registry.get_mut(&key)
          {
            model.flags.insert(ModelFlag::BodyModel);
            model.vendor_extensions.set_flag(extensions::BODY_MODEL);
          }
        }
        None if is_union => self.drop_model(&key, warnings, stats),
        None => {}
      }
    }
  }

  /// Drops unreferenced composed unions and strips the `OneOf`/`AnyOf` marker
  /// from the rest when the shorter name is free at that moment.
  fn settle_composed_models(&mut self, operations: &[OperationDescriptor], stats: &mut GenerationStats) {
    loop {
      let referenced = self.referenced_keys(operations);
      let unreferenced: Vec<String> = self
        .registry
        .iter()
        .filter(|(key, model)| model.origin == ModelOrigin::Composed && !referenced.contains(*key))
        .map(|(key, _)| key.to_string())
        .collect();
      if unreferenced.is_empty() {
        break;
      }
      for key in unreferenced {
        if self.registry.remove(&key).is_some() {
          stats.record_drop();
        }
      }
    }

    let composed: Vec<(String, String)> = self
      .registry
      .iter()
      .filter(|(_, model)| model.origin == ModelOrigin::Composed)
      .map(|(key, model)| (key.to_string(), model.class_name.clone()))
      .collect();

    for (key, class_name) in composed {
      let Some(stripped) = strip_union_marker(&class_name) else {
        continue;
      };
      let stripped = to_model_name(stripped);
      if self.registry.rename_if_free(&key, &stripped) {
        self.after_rename(&key, &class_name, stats);
      } else {
        debug!(key, class_name, stripped, "kept union marker, stripped name is taken");
      }
    }
  }

  /// Rebuilds every type name from the registry.
  fn relabel(&mut self, operations: &mut [OperationDescriptor], warnings: &mut WarningSink) {
    let names: HashMap<String, String> = self
      .registry
      .iter()
      .map(|(key, model)| (key.to_string(), model.class_name.clone()))
      .collect();
    let lookup = |key: &str| names.get(key).cloned();

    for model in self.registry.values_mut() {
      let location = model.class_name.clone();
      for descriptor in model.type_descriptors_mut() {
        relabel_one(descriptor, &lookup, &location, warnings);
      }
    }

    for operation in operations {
      let location = operation.operation_id.clone();
      for descriptor in operation.type_descriptors_mut() {
        relabel_one(descriptor, &lookup, &location, warnings);
      }
    }
  }

  fn rename(&mut self, key: &str, desired: &str, stats: &mut GenerationStats) {
    let Some(previous) = self.registry.class_name(key).map(String::from) else {
      return;
    };
    if let Some(class_name) = self.registry.rename(key, desired)
      && class_name != previous
    {
      self.after_rename(key, &previous, stats);
    }
  }

  fn after_rename(&mut self, key: &str, previous: &str, stats: &mut GenerationStats) {
    let Some(model) = self.registry.get_mut(key) else {
      return;
    };
    model.flags.insert(ModelFlag::Renamed);

    let current = model.class_name.clone();
    rebase_nested_names(model, previous, &current);
    stats.record_rename();
  }

  fn drop_model(&mut self, key: &str, warnings: &mut WarningSink, stats: &mut GenerationStats) {
    if let Some(model) = self.registry.remove(key) {
      warnings.push(GenerationWarning::DroppedSyntheticModel {
        class_name: model.class_name,
      });
      stats.record_drop();
    }
  }

  /// Keys referenced by any model other than themselves, or by any operation.
  fn referenced_keys(&self, operations: &[OperationDescriptor]) -> BTreeSet<String> {
    let mut referenced = BTreeSet::new();
    for (key, model) in self.registry.iter() {
      for descriptor in model.type_descriptors() {
        referenced.extend(
          referenced_by(descriptor)
            .filter(|target| *target != key)
            .map(String::from),
        );
      }
    }
    for operation in operations {
      for descriptor in operation.type_descriptors() {
        referenced.extend(referenced_by(descriptor).map(String::from));
      }
    }
    referenced
  }
}

/// Moves enum and union variant names built from `previous` over to `current`.
fn rebase_nested_names(model: &mut ModelDescriptor, previous: &str, current: &str) {
  let rebase = |name: &mut String| {
    if let Some(rest) = name.strip_prefix(previous) {
      *name = format!("{current}{rest}");
    }
  };
  let rebase_union = |union: &mut UnionDescriptor| {
    for variant in &mut union.variants {
      rebase(&mut variant.name);
      rebase(&mut variant.base_name);
    }
  };

  if let Some(enum_values) = model.enum_values.as_mut() {
    rebase(&mut enum_values.name);
  }
  if let Some(union) = model.union.as_mut() {
    rebase_union(union);
  }
  for property in &mut model.properties {
    if let Some(enum_values) = property.enum_values.as_mut() {
      rebase(&mut enum_values.name);
    }
    if let Some(union) = property.union.as_mut() {
      rebase_union(union);
    }
  }
}

fn referenced_by(descriptor: &TypeDescriptor) -> impl Iterator<Item = &str> {
  descriptor.walk().filter_map(|t| t.reference.as_deref())
}

fn relabel_one<F>(descriptor: &mut TypeDescriptor, lookup: &F, location: &str, warnings: &mut WarningSink)
where
  F: Fn(&str) -> Option<String>,
{
  if let Some(key) = descriptor.relabel(lookup) {
    warnings.push(GenerationWarning::DanglingReference {
      location: location.to_string(),
      key,
    });
  }
}

/// The class name without its leading `OneOf`/`AnyOf`, when it has one.
pub(crate) fn strip_union_marker(class_name: &str) -> Option<&str> {
  [UnionKind::OneOf, UnionKind::AnyOf]
    .into_iter()
    .find_map(|kind| class_name.strip_prefix(kind.to_string().as_str()))
    .filter(|rest| !rest.is_empty())
}
