//! Canonical model identities and their class names.
//!
//! The registry is keyed by the document's model key and owns the
//! `ModelDescriptor` for every live model. Class names are allocated here and
//! only here, so uniqueness holds at every point of the run.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use tracing::debug;

use super::{
  ast::ModelDescriptor,
  metrics::GenerationWarning,
  naming::identifiers::{NameAdjustment, ensure_unique, model_name},
  schema::ModelOrigin,
};

/// Result of allocating a class name for a newly registered key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
  pub class_name: String,
  pub warning: Option<GenerationWarning>,
}

#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
  models: IndexMap<String, ModelDescriptor>,
  used_names: BTreeSet<String>,
}

impl ModelRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Registers a key and allocates its class name. Re-registering a key is a no-op.
  pub fn register(&mut self, key: &str, origin: ModelOrigin) -> Registration {
    if let Some(existing) = self.models.get(key) {
      return Registration {
        class_name: existing.class_name.clone(),
        warning: None,
      };
    }

    let resolved = model_name(key);
    let class_name = ensure_unique(&resolved.class_name, &self.used_names);
    let warning = resolved.adjustment.map(|adjustment| match adjustment {
      NameAdjustment::Reserved => GenerationWarning::ReservedModelName {
        name: key.to_string(),
        class_name: class_name.clone(),
      },
      NameAdjustment::DigitLeading => GenerationWarning::DigitLeadingModelName {
        name: key.to_string(),
        class_name: class_name.clone(),
      },
    });

    self.used_names.insert(class_name.clone());
    self
      .models
      .insert(key.to_string(), ModelDescriptor::new(key, class_name.clone(), origin));

    Registration { class_name, warning }
  }

  pub fn contains_key(&self, key: &str) -> bool {
    self.models.contains_key(key)
  }

  pub fn get(&self, key: &str) -> Option<&ModelDescriptor> {
    self.models.get(key)
  }

  pub fn get_mut(&mut self, key: &str) -> Option<&mut ModelDescriptor> {
    self.models.get_mut(key)
  }

  pub fn class_name(&self, key: &str) -> Option<&str> {
    self.models.get(key).map(|m| m.class_name.as_str())
  }

  /// Whether a class name is held by any live model right now.
  pub fn is_taken(&self, class_name: &str) -> bool {
    self.used_names.contains(class_name)
  }

  /// Replaces the stored descriptor for an already registered key.
  ///
  /// The class name and origin allocated at registration are kept.
  pub fn install(&mut self, mut descriptor: ModelDescriptor) {
    if let Some(slot) = self.models.get_mut(&descriptor.canonical_key) {
      descriptor.class_name = std::mem::take(&mut slot.class_name);
      descriptor.origin = slot.origin;
      *slot = descriptor;
    }
  }

  /// Renames a model to `desired`, suffixing it when another model holds the name.
  ///
  /// Returns the new class name, or `None` for an unknown key.
  pub fn rename(&mut self, key: &str, desired: &str) -> Option<String> {
    let current = self.models.get(key)?.class_name.clone();
    let base = model_name(desired).class_name;
    if base == current {
      return Some(current);
    }

    self.used_names.remove(&current);
    let class_name = ensure_unique(&base, &self.used_names);
    self.assign(key, &current, class_name.clone());
    Some(class_name)
  }

  /// Renames a model only when `class_name` is free. Returns whether it moved.
  pub fn rename_if_free(&mut self, key: &str, class_name: &str) -> bool {
    let Some(current) = self.models.get(key).map(|m| m.class_name.clone()) else {
      return false;
    };
    if current == class_name {
      return true;
    }
    if self.is_taken(class_name) {
      return false;
    }

    self.used_names.remove(&current);
    self.assign(key, &current, class_name.to_string());
    true
  }

  /// Removes a model and releases its class name.
  pub fn remove(&mut self, key: &str) -> Option<ModelDescriptor> {
    let removed = self.models.shift_remove(key)?;
    self.used_names.remove(&removed.class_name);
    debug!(key, class_name = %removed.class_name, "dropped model");
    Some(removed)
  }

  pub fn keys(&self) -> impl Iterator<Item = &str> {
    self.models.keys().map(String::as_str)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &ModelDescriptor)> {
    self.models.iter().map(|(k, m)| (k.as_str(), m))
  }

  pub fn values_mut(&mut self) -> impl Iterator<Item = &mut ModelDescriptor> {
    self.models.values_mut()
  }

  pub fn len(&self) -> usize {
    self.models.len()
  }

  pub fn is_empty(&self) -> bool {
    self.models.is_empty()
  }

  /// Consumes the registry into a class name keyed map, in registration order.
  pub fn into_models(self) -> IndexMap<String, ModelDescriptor> {
    self
      .models
      .into_values()
      .map(|model| (model.class_name.clone(), model))
      .collect()
  }

  fn assign(&mut self, key: &str, previous: &str, class_name: String) {
    debug!(key, from = previous, to = %class_name, "renamed model");
    self.used_names.insert(class_name.clone());
    if let Some(model) = self.models.get_mut(key) {
      model.class_name = class_name;
    }
  }
}
