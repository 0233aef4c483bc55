use std::collections::{BTreeMap, btree_map::Entry};

use super::identifiers::camelize;

/// Replacement names for synthetic models, keyed by the camelized model key.
///
/// The first suggestion recorded for a key sticks; later operations that use
/// the same synthetic model cannot move it. Overrides from configuration sit
/// in their own table and always win over suggestions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamePatchTable {
  suggestions: BTreeMap<String, String>,
  overrides: BTreeMap<String, String>,
}

impl NamePatchTable {
  pub fn new() -> Self {
    Self::default()
  }

  /// Records a suggestion. Returns `false` when the key already had one.
  pub fn suggest(&mut self, synthetic_key: &str, suggested_name: impl Into<String>) -> bool {
    match self.suggestions.entry(camelize(synthetic_key)) {
      Entry::Vacant(slot) => {
        slot.insert(suggested_name.into());
        true
      }
      Entry::Occupied(_) => false,
    }
  }

  pub fn force(&mut self, key: &str, name: impl Into<String>) {
    self.overrides.insert(camelize(key), name.into());
  }

  /// The name a key should take: an override if present, else the first suggestion.
  pub fn suggestion(&self, key: &str) -> Option<&str> {
    let key = camelize(key);
    self
      .overrides
      .get(&key)
      .or_else(|| self.suggestions.get(&key))
      .map(String::as_str)
  }

  pub fn is_forced(&self, key: &str) -> bool {
    self.overrides.contains_key(&camelize(key))
  }

  pub fn len(&self) -> usize {
    self.suggestions.len() + self.overrides.len()
  }

  pub fn is_empty(&self) -> bool {
    self.suggestions.is_empty() && self.overrides.is_empty()
  }
}
