//! Process-wide model registry
//!
//! Caches the registered [`ModelSchema`] of every [`Model`] type so that
//! registration runs once per type. Failed registrations are not cached.

use crate::error::Result;
use crate::model::{Model, ModelBuilder, ModelSchema};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::any::TypeId;
use std::sync::Arc;

static MODELS: Lazy<RwLock<FxHashMap<TypeId, Arc<ModelSchema>>>> =
    Lazy::new(|| RwLock::new(FxHashMap::default()));

/// Registered schema of `M`, registering it on first use
pub(crate) fn schema_of<M: Model>() -> Result<Arc<ModelSchema>> {
    let id = TypeId::of::<M>();
    if let Some(schema) = MODELS.read().get(&id) {
        return Ok(Arc::clone(schema));
    }

    // Declared outside the lock: `declare` may look up a base model
    let schema = Arc::new(M::declare(ModelBuilder::new(M::NAME))?.register()?);

    // A concurrent first use may have won; keep whichever landed first
    let mut models = MODELS.write();
    Ok(Arc::clone(models.entry(id).or_insert(schema)))
}

/// Number of model types registered so far
pub fn registered_count() -> usize {
    MODELS.read().len()
}
