//! Objects that allow arbitrary keys but also list example properties.

use std::{collections::HashMap, sync::Arc};

use tracing::debug;

use super::{properties::PropertyBuilder, type_resolver::TypeResolver};
use crate::generator::{
  ast::{PropertyDescriptor, TypeDescriptor},
  errors::ResolveResult,
  metrics::WarningSink,
  schema::ObjectSchema,
};

/// Memoized rewrite of a map-like object.
#[derive(Debug, Clone, PartialEq)]
pub struct MapLikeModel {
  pub name: String,
  /// The declared properties, resolved once.
  pub properties: Vec<PropertyDescriptor>,
  /// `HashMap<String, Value>`, the type the object is used as.
  pub map_type: TypeDescriptor,
}

#[derive(Debug, Default)]
pub(crate) struct MapLikeDetector {
  memo: HashMap<String, Arc<MapLikeModel>>,
}

impl MapLikeDetector {
  pub(crate) fn new() -> Self {
    Self::default()
  }

  /// Returns the map-like rewrite of `object`, or `None` when it is not map-like.
  ///
  /// The first call for a name resolves the declared properties and stores the
  /// result. Later calls for that name return the stored `Arc` untouched.
  pub(crate) fn detect_and_rewrite(
    &mut self,
    name: &str,
    object: &ObjectSchema,
    resolver: TypeResolver<'_>,
    warnings: &mut WarningSink,
  ) -> ResolveResult<Option<Arc<MapLikeModel>>> {
    if !object.is_map_like() {
      return Ok(None);
    }
    if let Some(existing) = self.memo.get(name) {
      return Ok(Some(Arc::clone(existing)));
    }

    let properties = PropertyBuilder::new(resolver).build_all(name, object, None, warnings)?;
    debug!(name, properties = properties.len(), "detected map-like object");

    let model = Arc::new(MapLikeModel {
      name: name.to_string(),
      properties,
      map_type: TypeDescriptor::map_of(TypeDescriptor::dynamic()),
    });
    self.memo.insert(name.to_string(), Arc::clone(&model));
    Ok(Some(model))
  }

  pub(crate) fn get(&self, name: &str) -> Option<Arc<MapLikeModel>> {
    self.memo.get(name).cloned()
  }

  pub(crate) fn len(&self) -> usize {
    self.memo.len()
  }
}
