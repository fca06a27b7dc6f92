//! Incremental generation cache.
//!
//! The cache holds at most one prior generation per logical container
//! declaration, keyed by a host-supplied declaration id. A lookup compares
//! the full stored descriptor against the current one with structural
//! equality; generation is only skipped when every semantically relevant
//! field matches, so a reordered registration or a changed lifetime is a
//! miss even though the declaration id is the same.
//!
//! Because [`crate::codegen::generate`] is deterministic, replaying a cached
//! [`GeneratedOutput`] for an unchanged descriptor is indistinguishable from
//! regenerating it.

use std::collections::HashMap;
use std::sync::Arc;

use crate::codegen::GeneratedOutput;
use crate::descriptors::ContainerDescriptor;

#[cfg(feature = "ahash")]
type MapState = ahash::RandomState;
#[cfg(not(feature = "ahash"))]
type MapState = std::collections::hash_map::RandomState;

struct CacheEntry {
    descriptor: ContainerDescriptor,
    output: Arc<GeneratedOutput>,
}

/// Outcome of a cache lookup for one declaration.
#[derive(Debug, Clone)]
pub enum CacheDecision {
    /// The stored descriptor is structurally equal; reuse the prior output.
    Unchanged(Arc<GeneratedOutput>),
    /// No entry, or the descriptor differs; the container must be generated.
    Changed,
}

/// One-deep per-declaration cache of generated container sources
///
/// Stores the last `(descriptor, output)` pair seen for each declaration id.
/// There is no history: [`store`](GenerationCache::store) replaces whatever
/// was there, and [`evict`](GenerationCache::evict) drops the entry so a
/// stale output is never replayed after a failed regeneration.
///
/// The cache itself is not synchronized; [`crate::pipeline::Generator`] wraps
/// it in a lock for concurrent hosts.
///
/// # Examples
///
/// ```rust
/// use rivet_di::{
///     codegen, CacheDecision, ConstructionSource, ContainerDescriptor, GenerationCache,
///     Lifetime, Registration,
/// };
/// use std::sync::Arc;
///
/// let mut descriptor = ContainerDescriptor::new(None, "AppContainerBase");
/// descriptor.register(Registration::new(
///     "Config",
///     "Config",
///     Lifetime::Singleton,
///     ConstructionSource::expression("Config::default()"),
/// ));
///
/// let mut cache = GenerationCache::new();
/// assert!(matches!(cache.check("app", &descriptor), CacheDecision::Changed));
///
/// let output = Arc::new(codegen::generate(&descriptor).unwrap());
/// cache.store("app", descriptor.clone(), output.clone());
///
/// match cache.check("app", &descriptor) {
///     CacheDecision::Unchanged(cached) => assert_eq!(cached, output),
///     CacheDecision::Changed => unreachable!(),
/// }
/// ```
pub struct GenerationCache {
    entries: HashMap<String, CacheEntry, MapState>,
}

impl GenerationCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            entries: HashMap::default(),
        }
    }

    /// Compares `descriptor` against the stored entry for `id`.
    ///
    /// Returns [`CacheDecision::Unchanged`] with the prior output only when
    /// an entry exists and its descriptor is structurally equal, namespace,
    /// container name, usings, and registrations in order.
    pub fn check(&self, id: &str, descriptor: &ContainerDescriptor) -> CacheDecision {
        match self.entries.get(id) {
            Some(entry) if entry.descriptor == *descriptor => {
                CacheDecision::Unchanged(entry.output.clone())
            }
            _ => CacheDecision::Changed,
        }
    }

    /// Records the generation for `id`, replacing any prior entry.
    pub fn store<I: Into<String>>(
        &mut self,
        id: I,
        descriptor: ContainerDescriptor,
        output: Arc<GeneratedOutput>,
    ) {
        self.entries.insert(id.into(), CacheEntry { descriptor, output });
    }

    /// Drops the entry for `id`, if any.
    ///
    /// Called after a changed descriptor fails generation so the next check
    /// cannot resurrect output that no longer matches any valid declaration.
    pub fn evict(&mut self, id: &str) {
        self.entries.remove(id);
    }

    /// Number of declarations currently cached.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no declaration is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for GenerationCache {
    fn default() -> Self {
        Self::new()
    }
}
