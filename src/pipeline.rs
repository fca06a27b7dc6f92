//! Incremental generation pipeline.
//!
//! [`Generator`] is the front door a host drives: hand it a declaration id
//! and the descriptor extracted for that declaration, get back the generated
//! output, cached or fresh. The cache consultation, regeneration, and
//! eviction policy all live here so hosts never touch
//! [`GenerationCache`](crate::cache::GenerationCache) directly.

use std::sync::Arc;

#[cfg(feature = "parking-lot")]
use parking_lot::Mutex;
#[cfg(not(feature = "parking-lot"))]
use std::sync::Mutex;

use crate::cache::{CacheDecision, GenerationCache};
use crate::codegen::{self, GeneratedOutput};
use crate::descriptors::ContainerDescriptor;
use crate::error::GenResult;

/// Thread-safe incremental container generator
///
/// Wraps the generation cache in a lock so distinct declarations can be
/// processed from multiple threads. Per call:
///
/// - an unchanged descriptor returns the cached output without invoking the
///   code generator
/// - a changed descriptor is regenerated and the entry replaced
/// - a failed regeneration evicts the entry, so stale output from the prior
///   version of the declaration is never replayed, and returns the error for
///   this declaration only
///
/// Outputs are shared as `Arc<GeneratedOutput>`; a cache hit is a pointer
/// clone, never a copy of the source text.
///
/// # Examples
///
/// ```rust
/// use rivet_di::{ConstructionSource, ContainerDescriptor, Generator, Lifetime, Registration};
///
/// let mut descriptor = ContainerDescriptor::new(None, "AppContainerBase");
/// descriptor.register(Registration::new(
///     "Config",
///     "Config",
///     Lifetime::Singleton,
///     ConstructionSource::expression("Config::default()"),
/// ));
///
/// let generator = Generator::new();
/// let first = generator.generate("app", &descriptor).unwrap();
/// let second = generator.generate("app", &descriptor).unwrap();
/// assert!(std::sync::Arc::ptr_eq(&first, &second));
/// ```
pub struct Generator {
    cache: Mutex<GenerationCache>,
}

impl Generator {
    /// Creates a generator with an empty cache.
    pub fn new() -> Self {
        Self {
            cache: Mutex::new(GenerationCache::new()),
        }
    }

    /// Generates the container for one declaration, reusing cached output
    /// when the descriptor is structurally unchanged.
    ///
    /// Errors are local to this declaration; the cache entries of other
    /// declarations are untouched.
    pub fn generate(
        &self,
        id: &str,
        descriptor: &ContainerDescriptor,
    ) -> GenResult<Arc<GeneratedOutput>> {
        if let CacheDecision::Unchanged(output) = self.lock().check(id, descriptor) {
            return Ok(output);
        }

        match codegen::generate(descriptor) {
            Ok(output) => {
                let output = Arc::new(output);
                self.lock().store(id, descriptor.clone(), output.clone());
                Ok(output)
            }
            Err(error) => {
                self.lock().evict(id);
                Err(error)
            }
        }
    }

    /// Generates every declaration in `declarations`, independently.
    ///
    /// One container failing never blocks its siblings; each result carries
    /// its declaration id so hosts can report diagnostics per declaration.
    pub fn generate_many(
        &self,
        declarations: &[(String, ContainerDescriptor)],
    ) -> Vec<(String, GenResult<Arc<GeneratedOutput>>)> {
        declarations
            .iter()
            .map(|(id, descriptor)| (id.clone(), self.generate(id, descriptor)))
            .collect()
    }

    /// Drops the cache entry for one declaration.
    ///
    /// Hosts call this when a declaration disappears from the source tree.
    pub fn forget(&self, id: &str) {
        self.lock().evict(id);
    }

    /// Number of declarations with cached output.
    pub fn cached_declarations(&self) -> usize {
        self.lock().len()
    }

    #[cfg(feature = "parking-lot")]
    fn lock(&self) -> parking_lot::MutexGuard<'_, GenerationCache> {
        self.cache.lock()
    }

    #[cfg(not(feature = "parking-lot"))]
    fn lock(&self) -> std::sync::MutexGuard<'_, GenerationCache> {
        self.cache.lock().unwrap()
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}
