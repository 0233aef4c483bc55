//! Entry point of the resolution pipeline.
//!
//! ## Usage
//!
//! ```no_run
//! use oas3_ir::{ApiDocument, GeneratorConfig, Orchestrator};
//!
//! # fn example() -> anyhow::Result<()> {
//! let json = std::fs::read_to_string("api.json")?;
//! let document: ApiDocument = serde_json::from_str(&json)?;
//!
//! let (ir, stats) = Orchestrator::new(document, GeneratorConfig::default()).run()?;
//! println!("{} models, {} warnings", ir.models.len(), stats.warnings.len());
//! # Ok(())
//! # }
//! ```

use indexmap::IndexMap;
use inflections::Inflect;
use tracing::{debug, info};

use super::{
  ast::{GeneratedIr, ModelFlag, OperationDescriptor, TagGroup},
  config::GeneratorConfig,
  context::GenerationContext,
  converter::{ModelConverter, operations::OperationConverter},
  errors::ResolveResult,
  metrics::GenerationStats,
  naming::identifiers::camelize,
  postprocess::{name_patch::NamePatcher, vendor_flags::apply_model_flags},
  schema::ApiDocument,
};

/// Runs one document through the resolver and both naming passes.
pub struct Orchestrator {
  document: ApiDocument,
  config: GeneratorConfig,
}

impl Orchestrator {
  pub fn new(document: ApiDocument, config: GeneratorConfig) -> Self {
    Self { document, config }
  }

  pub fn document(&self) -> &ApiDocument {
    &self.document
  }

  pub fn config(&self) -> &GeneratorConfig {
    &self.config
  }

  /// Produces the IR for the document.
  ///
  /// The pipeline:
  /// 1. Registers every model key and allocates its class name
  /// 2. Converts models, flattening unions and memoizing map-like objects
  /// 3. Converts operations, recording name suggestions for inline bodies and responses
  /// 4. Substitutes memoized map-like properties
  /// 5. Renames, drops and relabels in the second naming pass
  /// 6. Computes renderer flags and groups operations by tag
  ///
  /// # Errors
  ///
  /// Fails on a reference to an unknown model or an integer bound that cannot
  /// be represented. No IR is produced in that case.
  pub fn run(&self) -> ResolveResult<(GeneratedIr, GenerationStats)> {
    let mut ctx = GenerationContext::new(&self.config);

    for (key, spec) in &self.document.models {
      ctx.register_model(key, spec.origin);
    }

    let mut converted = Vec::with_capacity(self.document.models.len());
    {
      let converter = ModelConverter::new(&ctx.registry, ctx.config);
      for (key, spec) in &self.document.models {
        converted.push(converter.convert(key, spec, &mut ctx.map_like, &mut ctx.warnings)?);
      }
    }
    for model in converted {
      ctx.stats.record_model();
      if model.is_union() {
        ctx.stats.record_union_model();
      }
      ctx.registry.install(model);
    }
    debug!(map_like = ctx.map_like.len(), "converted models");

    let mut operations = Vec::with_capacity(self.document.operations.len());
    {
      let converter = OperationConverter::new(&ctx.registry, ctx.config);
      for operation in &self.document.operations {
        operations.push(converter.convert(operation, &mut ctx.patches, &mut ctx.warnings)?);
        ctx.stats.record_operation();
      }
    }
    debug!(suggestions = ctx.patches.len(), "collected name suggestions");

    substitute_map_like(&mut ctx);

    NamePatcher::new(&mut ctx.registry, &ctx.patches).run(&mut operations, &mut ctx.warnings, &mut ctx.stats);

    for model in ctx.registry.values_mut() {
      apply_model_flags(model);
    }

    let tags = group_by_tag(operations);
    let (registry, stats) = ctx.finish();
    let ir = GeneratedIr {
      title: self.document.title.clone(),
      version: self.document.version.clone(),
      models: registry.into_models(),
      tags,
    };

    info!(
      models = ir.models.len(),
      operations = stats.operations_converted,
      warnings = stats.warnings.len(),
      "resolved document"
    );
    Ok((ir, stats))
  }
}

fn substitute_map_like(ctx: &mut GenerationContext<'_>) {
  let keys: Vec<String> = ctx.registry.keys().map(String::from).collect();
  for key in keys {
    let Some(map_like) = ctx.map_like.get(&key) else {
      continue;
    };
    if let Some(model) = ctx.registry.get_mut(&key) {
      model.properties.clone_from(&map_like.properties);
      model.flags.insert(ModelFlag::MapLike);
      ctx.stats.record_map_like_model();
    }
  }
}

fn group_by_tag(operations: Vec<OperationDescriptor>) -> IndexMap<String, TagGroup> {
  let mut tags: IndexMap<String, TagGroup> = IndexMap::new();
  for operation in operations {
    tags
      .entry(operation.tag.clone())
      .or_insert_with(|| TagGroup {
        base_name: operation.tag.to_snake_case(),
        class_name: camelize(&operation.tag),
        operations: vec![],
      })
      .operations
      .push(operation);
  }
  tags
}
