//! Provider lifetime definitions.

/// Provider lifetimes controlling instance caching in generated containers
///
/// Defines how the generated accessor for a registration creates, caches,
/// and shares instances. Each lifetime gets its own emission template in the
/// code generator, with a distinct cache-slot scope.
///
/// # Lifetime Characteristics
///
/// - **Singleton**: one cache slot per *root* container instance; every
///   instance sharing that root observes the same value
/// - **Scoped**: one cache slot per container *instance*; two instances get
///   independent values even when they share a root
/// - **Transient**: no cache slot; every access reconstructs
///
/// # Examples
///
/// ```rust
/// use rivet_di::{ContainerDescriptor, Lifetime, Registration, ConstructionSource};
///
/// let mut descriptor = ContainerDescriptor::new(None, "AppContainerBase");
/// descriptor.register(Registration::new(
///     "Config",
///     "Config",
///     Lifetime::Singleton,
///     ConstructionSource::expression("Config::load()"),
/// ));
///
/// assert_eq!(descriptor.registrations[0].lifetime, Lifetime::Singleton);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifetime {
    /// New instance per access, never cached
    ///
    /// Transient accessors evaluate the construction expression on every
    /// call. No backing field is emitted for them.
    Transient,
    /// Single instance per container instance, cached for the instance lifetime
    ///
    /// Scoped accessors get a backing cell on the generated container struct
    /// itself; the first access on an instance constructs, later accesses on
    /// that instance return the stored value. A fresh container instance
    /// starts with an empty cell even when it shares a root.
    Scoped,
    /// Single instance per root container, shared by all attached instances
    ///
    /// Singleton accessors read and write their backing cell through the
    /// container's root reference, never through `self`, so every instance
    /// created with the same root observes one shared value.
    Singleton,
}

impl Lifetime {
    /// Short lowercase label used in generated-source comments and graph
    /// exports.
    pub fn label(&self) -> &'static str {
        match self {
            Lifetime::Transient => "transient",
            Lifetime::Scoped => "scoped",
            Lifetime::Singleton => "singleton",
        }
    }

    /// Whether accessors of this lifetime need a backing cell on the
    /// generated struct.
    pub fn has_backing_field(&self) -> bool {
        !matches!(self, Lifetime::Transient)
    }
}
