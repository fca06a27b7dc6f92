//! Error types for container generation.

use std::fmt;

/// Container generation errors
///
/// Represents the error conditions that can occur while resolving a
/// container descriptor or generating its source. Every error is local to
/// one container declaration; failing declarations never block generation
/// for their siblings.
///
/// # Examples
///
/// ```rust
/// use rivet_di::{
///     codegen, ConstructionSource, ContainerDescriptor, GenError, Lifetime, Registration,
/// };
///
/// let mut descriptor = ContainerDescriptor::new(None, "OrdersContainerBase");
/// descriptor.register(Registration::new(
///     "OrderService",
///     "Orders",
///     Lifetime::Scoped,
///     ConstructionSource::constructor("OrderService", ["Repository"]),
/// ));
///
/// match codegen::generate(&descriptor) {
///     Err(GenError::UnresolvedDependency { param_type, container }) => {
///         assert_eq!(param_type, "Repository");
///         assert_eq!(container, "OrdersContainerBase");
///     }
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenError {
    /// A constructor parameter type has no matching provider in the container
    UnresolvedDependency {
        /// The parameter type that could not be resolved
        param_type: String,
        /// The declared name of the offending container
        container: String,
    },
    /// Two registrations map to the same generated member identifier
    DuplicateMember {
        /// The colliding accessor identifier
        member: String,
        /// The declared name of the offending container
        container: String,
    },
    /// A registration lacks a usable construction source
    MalformedRegistration {
        /// The member name of the unusable registration
        member: String,
        /// The declared name of the offending container
        container: String,
    },
}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenError::UnresolvedDependency { param_type, container } => {
                write!(f, "No provider for {} in container {}", param_type, container)
            }
            GenError::DuplicateMember { member, container } => {
                write!(f, "Duplicate member {} in container {}", member, container)
            }
            GenError::MalformedRegistration { member, container } => {
                write!(f, "Malformed registration {} in container {}", member, container)
            }
        }
    }
}

impl std::error::Error for GenError {}

/// Result type for generation operations
///
/// A convenience alias for `Result<T, GenError>` used throughout rivet-di,
/// following the common Rust pattern of a crate-specific result type to
/// reduce signature boilerplate.
///
/// # Examples
///
/// ```rust
/// use rivet_di::{GenError, GenResult};
///
/// fn check(name: &str) -> GenResult<()> {
///     if name.is_empty() {
///         return Err(GenError::MalformedRegistration {
///             member: name.to_string(),
///             container: "AppContainerBase".to_string(),
///         });
///     }
///     Ok(())
/// }
///
/// assert!(check("Config").is_ok());
/// assert!(check("").is_err());
/// ```
pub type GenResult<T> = Result<T, GenError>;
