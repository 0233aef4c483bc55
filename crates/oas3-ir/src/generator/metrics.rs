use serde::Serialize;
use strum::Display;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct GenerationStats {
  pub models_resolved: usize,
  pub union_models: usize,
  pub map_like_models: usize,
  pub operations_converted: usize,
  pub models_renamed: usize,
  pub models_dropped: usize,
  pub warnings: Vec<GenerationWarning>,
}

impl GenerationStats {
  pub fn record_model(&mut self) {
    self.models_resolved += 1;
  }

  pub fn record_union_model(&mut self) {
    self.union_models += 1;
  }

  pub fn record_map_like_model(&mut self) {
    self.map_like_models += 1;
  }

  pub fn record_operation(&mut self) {
    self.operations_converted += 1;
  }

  pub fn record_rename(&mut self) {
    self.models_renamed += 1;
  }

  pub fn record_drop(&mut self) {
    self.models_dropped += 1;
  }

  pub fn record_warnings(&mut self, warnings: impl IntoIterator<Item = GenerationWarning>) {
    self.warnings.extend(warnings);
  }
}

/// Non-fatal conditions hit during a run. The run always continues.
#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GenerationWarning {
  #[strum(to_string = "'{location}': array has no items schema, using String elements")]
  MissingArrayItems { location: String },
  #[strum(to_string = "Model '{name}' collides with a reserved identifier, renamed to '{class_name}'")]
  ReservedModelName { name: String, class_name: String },
  #[strum(to_string = "Model '{name}' starts with a digit, renamed to '{class_name}'")]
  DigitLeadingModelName { name: String, class_name: String },
  #[strum(to_string = "'{location}': {reason}, falling back to Value")]
  DynamicFallback { location: String, reason: String },
  #[strum(to_string = "'{location}' referenced dropped model '{key}', falling back to Value")]
  DanglingReference { location: String, key: String },
  #[strum(to_string = "Dropped unnamed union model '{class_name}'")]
  DroppedSyntheticModel { class_name: String },
}

impl GenerationWarning {
  pub fn is_naming(&self) -> bool {
    matches!(
      self,
      Self::ReservedModelName { .. } | Self::DigitLeadingModelName { .. }
    )
  }
}

/// Collects warnings for a run and mirrors each one to the log.
#[derive(Debug, Clone, Default)]
pub struct WarningSink {
  warnings: Vec<GenerationWarning>,
}

impl WarningSink {
  pub fn push(&mut self, warning: GenerationWarning) {
    tracing::warn!("{warning}");
    self.warnings.push(warning);
  }

  pub fn len(&self) -> usize {
    self.warnings.len()
  }

  pub fn is_empty(&self) -> bool {
    self.warnings.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &GenerationWarning> {
    self.warnings.iter()
  }

  pub fn take(&mut self) -> Vec<GenerationWarning> {
    std::mem::take(&mut self.warnings)
  }
}
