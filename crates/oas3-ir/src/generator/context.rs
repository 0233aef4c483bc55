use super::{
  config::GeneratorConfig,
  converter::map_like::MapLikeDetector,
  metrics::{GenerationStats, WarningSink},
  naming::patch_table::NamePatchTable,
  registry::ModelRegistry,
  schema::ModelOrigin,
};

/// All mutable state of one generation run.
///
/// Created fresh for every run and dropped with it, so two runs never share
/// a registry, patch table or memo.
pub(crate) struct GenerationContext<'a> {
  pub config: &'a GeneratorConfig,
  pub registry: ModelRegistry,
  pub patches: NamePatchTable,
  pub map_like: MapLikeDetector,
  pub warnings: WarningSink,
  pub stats: GenerationStats,
}

impl<'a> GenerationContext<'a> {
  pub fn new(config: &'a GeneratorConfig) -> Self {
    Self {
      config,
      registry: ModelRegistry::new(),
      patches: NamePatchTable::new(),
      map_like: MapLikeDetector::new(),
      warnings: WarningSink::default(),
      stats: GenerationStats::default(),
    }
  }

  pub fn register_model(&mut self, key: &str, origin: ModelOrigin) -> String {
    let registration = self.registry.register(key, origin);
    if let Some(warning) = registration.warning {
      self.warnings.push(warning);
    }
    registration.class_name
  }

  /// Moves collected warnings into the stats and returns them.
  pub fn finish(mut self) -> (ModelRegistry, GenerationStats) {
    self.stats.record_warnings(self.warnings.take());
    (self.registry, self.stats)
  }
}
