//! Container descriptors: the immutable registration model.
//!
//! A host front-end (attribute parser, syntax walker, declarative config)
//! extracts one [`ContainerDescriptor`] per declared container and hands it
//! to the generator. Everything in this module is a plain value: equality and
//! hashing are structural over every semantically relevant field and ignore
//! incidental details such as source positions, which makes these types the
//! unit of comparison for the incremental generation cache.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::lifetime::Lifetime;

/// A resolved constructor signature: the target type plus the ordered
/// parameter types the dependency resolver binds against sibling providers.
///
/// Parameter order is semantically meaningful; it becomes the argument order
/// of the emitted construction call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConstructorSignature {
    /// The concrete type the constructor produces
    pub target_type: String,
    /// Ordered parameter types, resolved against sibling registrations
    pub param_types: Vec<String>,
}

impl ConstructorSignature {
    /// Creates a signature from a target type and its parameter types.
    pub fn new<T, I, P>(target_type: T, param_types: I) -> Self
    where
        T: Into<String>,
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            target_type: target_type.into(),
            param_types: param_types.into_iter().map(Into::into).collect(),
        }
    }
}

/// How a registration's value gets built
///
/// Either a raw construction expression emitted verbatim, or a constructor
/// signature whose parameters the resolver rewrites into sibling accessor
/// calls.
///
/// # Examples
///
/// ```rust
/// use rivet_di::ConstructionSource;
///
/// // Emitted exactly as written:
/// let raw = ConstructionSource::expression("Config::from_env()");
///
/// // Parameters bound to sibling providers by type:
/// let ctor = ConstructionSource::constructor("UserService", ["Database", "Config"]);
///
/// assert_ne!(raw, ctor);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConstructionSource {
    /// A raw expression evaluated verbatim; bypasses dependency resolution
    Expression(String),
    /// A constructor call whose arguments are resolved from sibling providers
    Constructor(ConstructorSignature),
}

impl ConstructionSource {
    /// Creates a verbatim expression source.
    pub fn expression<S: Into<String>>(expr: S) -> Self {
        ConstructionSource::Expression(expr.into())
    }

    /// Creates a constructor-call source from a target type and parameter
    /// types.
    pub fn constructor<T, I, P>(target_type: T, param_types: I) -> Self
    where
        T: Into<String>,
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        ConstructionSource::Constructor(ConstructorSignature::new(target_type, param_types))
    }
}

/// One declared provider: a type, a member name, a lifetime, and a
/// construction source
///
/// Pure data holder with no behavior beyond structural equality. Two
/// registrations are equal iff type, name, lifetime, and construction source
/// all are; the cache component relies on exactly this equality.
///
/// # Examples
///
/// ```rust
/// use rivet_di::{ConstructionSource, Lifetime, Registration};
///
/// let a = Registration::new(
///     "Database",
///     "Db",
///     Lifetime::Singleton,
///     ConstructionSource::expression("Database::connect()"),
/// );
/// let b = a.clone();
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Registration {
    /// Nominal type identifier of the provided value
    pub type_name: String,
    /// Member name exposed on the container; unique within a container
    pub member_name: String,
    /// Caching discipline for the generated accessor
    pub lifetime: Lifetime,
    /// Verbatim expression or resolvable constructor signature
    pub source: ConstructionSource,
}

impl Registration {
    /// Creates a registration.
    pub fn new<T, N>(type_name: T, member_name: N, lifetime: Lifetime, source: ConstructionSource) -> Self
    where
        T: Into<String>,
        N: Into<String>,
    {
        Self {
            type_name: type_name.into(),
            member_name: member_name.into(),
            lifetime,
            source,
        }
    }
}

/// Everything the generator needs to know about one declared container
///
/// Registration order is declaration order and is semantically meaningful:
/// it drives both the last-write-wins type lookup used for constructor
/// argument binding and the order of generated members. Reordering providers
/// is therefore a semantic change, and the incremental cache treats it as
/// one.
///
/// # Examples
///
/// ```rust
/// use rivet_di::{ConstructionSource, ContainerDescriptor, Lifetime, Registration};
///
/// let mut descriptor = ContainerDescriptor::new(Some("app"), "AppContainerBase");
/// descriptor.add_using("use crate::services::*;");
/// descriptor.register(Registration::new(
///     "Database",
///     "Db",
///     Lifetime::Singleton,
///     ConstructionSource::expression("Database::connect()"),
/// ));
/// descriptor.register(Registration::new(
///     "UserService",
///     "Users",
///     Lifetime::Scoped,
///     ConstructionSource::constructor("UserService", ["Database"]),
/// ));
///
/// assert_eq!(descriptor.container_name, "AppContainerBase");
/// assert_eq!(descriptor.registrations.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerDescriptor {
    /// Optional namespace the generated container is emitted into
    pub namespace: Option<String>,
    /// Declared container name, conventionally carrying a `Base` suffix
    pub container_name: String,
    /// Import directives re-emitted verbatim, in declaration order
    pub usings: Vec<String>,
    /// Declared providers, in declaration order
    pub registrations: Vec<Registration>,
}

impl ContainerDescriptor {
    /// Creates an empty descriptor for the named container.
    pub fn new<N: Into<String>>(namespace: Option<&str>, container_name: N) -> Self {
        Self {
            namespace: namespace.map(str::to_string),
            container_name: container_name.into(),
            usings: Vec::new(),
            registrations: Vec::new(),
        }
    }

    /// Appends an import directive, re-emitted verbatim into the generated
    /// source.
    pub fn add_using<S: Into<String>>(&mut self, using: S) -> &mut Self {
        self.usings.push(using.into());
        self
    }

    /// Appends a provider registration. Declaration order is preserved.
    pub fn register(&mut self, registration: Registration) -> &mut Self {
        self.registrations.push(registration);
        self
    }

    /// Structural fingerprint of this descriptor.
    ///
    /// A convenience hash over the same fields structural equality covers,
    /// handy for telemetry and diagnostics. The cache itself always compares
    /// full descriptors; the fingerprint is not a substitute.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}
