//! Advisory validation of container descriptors.
//!
//! Validation inspects one [`ContainerDescriptor`] before generation and
//! reports configuration problems the generator itself either hard-fails on
//! (missing providers, duplicate members) or silently accepts (lifetime
//! captivity, shadowed providers). It is purely advisory: generation never
//! runs validation implicitly, and a report full of warnings does not stop
//! [`crate::codegen::generate`].
//!
//! # Validation Rules
//!
//! - **Missing dependency**: error, a constructor parameter type has no
//!   provider in this container
//! - **Duplicate member**: error, two registrations derive the same accessor
//!   identifier
//! - **Singleton → Scoped**: warning, the root-held singleton captures one
//!   instance's scoped value forever
//! - **Singleton → Transient**: warning, the singleton holds the same
//!   transient instance forever
//! - **Shadowed provider**: warning, a later registration of the same type
//!   makes the earlier one unreachable as a constructor argument

use std::collections::{HashMap, HashSet};

use crate::descriptors::{ConstructionSource, ContainerDescriptor};
use crate::lifetime::Lifetime;
use crate::resolver::snake_ident;

/// A configuration error the generator would reject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A constructor parameter type has no provider in the container
    MissingDependency {
        /// Member whose constructor needs the dependency
        member: String,
        /// The parameter type no registration provides
        param_type: String,
    },
    /// Two registrations derive the same accessor identifier
    DuplicateMember {
        /// The colliding accessor identifier
        member: String,
    },
}

/// A potentially problematic configuration the generator accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationWarning {
    /// A singleton member's constructor takes a scoped sibling; the value
    /// captured at first root access never refreshes per instance
    SingletonDependsOnScoped {
        /// The singleton member
        singleton: String,
        /// The scoped member it captures
        scoped: String,
    },
    /// A singleton member's constructor takes a transient sibling and will
    /// hold that one instance forever
    SingletonDependsOnTransient {
        /// The singleton member
        singleton: String,
        /// The transient member it freezes
        transient: String,
    },
    /// Two registrations provide the same type; only the later one is
    /// reachable as a constructor argument
    ShadowedProvider {
        /// The provided type registered more than once
        type_name: String,
        /// The earlier, unreachable member
        shadowed: String,
        /// The later member that wins the type lookup
        winner: String,
    },
}

/// Result of validating one container descriptor
///
/// # Examples
///
/// ```rust
/// use rivet_di::{
///     validation, ConstructionSource, ContainerDescriptor, Lifetime, Registration,
/// };
///
/// let mut descriptor = ContainerDescriptor::new(None, "AppContainerBase");
/// descriptor.register(Registration::new(
///     "RequestContext",
///     "Context",
///     Lifetime::Scoped,
///     ConstructionSource::expression("RequestContext::default()"),
/// ));
/// descriptor.register(Registration::new(
///     "UserService",
///     "Users",
///     Lifetime::Singleton,
///     ConstructionSource::constructor("UserService", ["RequestContext"]),
/// ));
///
/// let report = validation::validate(&descriptor);
/// assert!(report.is_valid());
/// assert!(report.has_warnings());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Errors the generator would reject the descriptor for
    pub errors: Vec<ValidationError>,
    /// Warnings about configurations the generator accepts
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    /// Returns true if validation found no errors.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns true if there are warnings.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Formats errors and warnings for display.
    pub fn format_issues(&self) -> String {
        let mut output = String::new();

        if !self.errors.is_empty() {
            output.push_str("Validation Errors:\n");
            for error in &self.errors {
                output.push_str(&format!("  - {}\n", format_error(error)));
            }
        }

        if !self.warnings.is_empty() {
            if !output.is_empty() {
                output.push('\n');
            }
            output.push_str("Validation Warnings:\n");
            for warning in &self.warnings {
                output.push_str(&format!("  - {}\n", format_warning(warning)));
            }
        }

        output
    }
}

fn format_error(error: &ValidationError) -> String {
    match error {
        ValidationError::MissingDependency { member, param_type } => {
            format!("Member '{}' depends on unprovided type '{}'", member, param_type)
        }
        ValidationError::DuplicateMember { member } => {
            format!("Accessor '{}' is derived by more than one registration", member)
        }
    }
}

fn format_warning(warning: &ValidationWarning) -> String {
    match warning {
        ValidationWarning::SingletonDependsOnScoped { singleton, scoped } => {
            format!(
                "Singleton '{}' captures scoped '{}'; the first instance's value is held forever",
                singleton, scoped
            )
        }
        ValidationWarning::SingletonDependsOnTransient { singleton, transient } => {
            format!(
                "Singleton '{}' holds one instance of transient '{}' forever",
                singleton, transient
            )
        }
        ValidationWarning::ShadowedProvider { type_name, shadowed, winner } => {
            format!(
                "Provider '{}' for type '{}' is shadowed by '{}'",
                shadowed, type_name, winner
            )
        }
    }
}

/// Validates one container descriptor.
///
/// Mirrors the resolver's binding rules, last registration of a type wins
/// the lookup, parameters bind by provided type, but reports every issue in
/// one pass instead of aborting at the first.
pub fn validate(descriptor: &ContainerDescriptor) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    // Same last-write-wins lookup the resolver binds against.
    let mut providers: HashMap<&str, (&str, Lifetime)> = HashMap::new();
    for registration in &descriptor.registrations {
        if let Some((earlier, _)) = providers.insert(
            registration.type_name.as_str(),
            (registration.member_name.as_str(), registration.lifetime),
        ) {
            warnings.push(ValidationWarning::ShadowedProvider {
                type_name: registration.type_name.clone(),
                shadowed: earlier.to_string(),
                winner: registration.member_name.clone(),
            });
        }
    }

    let mut seen: HashSet<String> = HashSet::new();
    for registration in &descriptor.registrations {
        let member_ident = snake_ident(&registration.member_name);
        if !seen.insert(member_ident.clone()) {
            errors.push(ValidationError::DuplicateMember { member: member_ident });
        }

        let signature = match &registration.source {
            ConstructionSource::Constructor(signature) => signature,
            ConstructionSource::Expression(_) => continue,
        };

        for param in &signature.param_types {
            match providers.get(param.as_str()) {
                None => errors.push(ValidationError::MissingDependency {
                    member: registration.member_name.clone(),
                    param_type: param.clone(),
                }),
                Some((provider_member, provider_lifetime)) => {
                    if registration.lifetime == Lifetime::Singleton {
                        match provider_lifetime {
                            Lifetime::Scoped => {
                                warnings.push(ValidationWarning::SingletonDependsOnScoped {
                                    singleton: registration.member_name.clone(),
                                    scoped: provider_member.to_string(),
                                });
                            }
                            Lifetime::Transient => {
                                warnings.push(ValidationWarning::SingletonDependsOnTransient {
                                    singleton: registration.member_name.clone(),
                                    transient: provider_member.to_string(),
                                });
                            }
                            Lifetime::Singleton => {}
                        }
                    }
                }
            }
        }
    }

    ValidationReport { errors, warnings }
}

#[cfg(test)]
mod tests {
    use super::{validate, ValidationError, ValidationWarning};
    use crate::descriptors::{ConstructionSource, ContainerDescriptor, Registration};
    use crate::lifetime::Lifetime;

    fn registration(
        type_name: &str,
        member: &str,
        lifetime: Lifetime,
        source: ConstructionSource,
    ) -> Registration {
        Registration::new(type_name, member, lifetime, source)
    }

    #[test]
    fn clean_descriptor_passes() {
        let mut descriptor = ContainerDescriptor::new(None, "AppContainerBase");
        descriptor.register(registration(
            "Config",
            "Config",
            Lifetime::Singleton,
            ConstructionSource::expression("Config::default()"),
        ));
        descriptor.register(registration(
            "Audit",
            "Audit",
            Lifetime::Singleton,
            ConstructionSource::constructor("Audit", ["Config"]),
        ));

        let report = validate(&descriptor);
        assert!(report.is_valid());
        assert!(!report.has_warnings());
        assert!(report.format_issues().is_empty());
    }

    #[test]
    fn missing_dependency_is_an_error() {
        let mut descriptor = ContainerDescriptor::new(None, "AppContainerBase");
        descriptor.register(registration(
            "Service",
            "Service",
            Lifetime::Scoped,
            ConstructionSource::constructor("Service", ["Missing"]),
        ));

        let report = validate(&descriptor);
        assert_eq!(
            report.errors,
            vec![ValidationError::MissingDependency {
                member: "Service".to_string(),
                param_type: "Missing".to_string(),
            }]
        );
    }

    #[test]
    fn captive_singleton_warns_per_dependency_lifetime() {
        let mut descriptor = ContainerDescriptor::new(None, "AppContainerBase");
        descriptor.register(registration(
            "Clock",
            "Clock",
            Lifetime::Transient,
            ConstructionSource::expression("Clock::system()"),
        ));
        descriptor.register(registration(
            "Session",
            "Session",
            Lifetime::Scoped,
            ConstructionSource::expression("Session::default()"),
        ));
        descriptor.register(registration(
            "Reporter",
            "Reporter",
            Lifetime::Singleton,
            ConstructionSource::constructor("Reporter", ["Clock", "Session"]),
        ));

        let report = validate(&descriptor);
        assert!(report.is_valid());
        assert_eq!(
            report.warnings,
            vec![
                ValidationWarning::SingletonDependsOnTransient {
                    singleton: "Reporter".to_string(),
                    transient: "Clock".to_string(),
                },
                ValidationWarning::SingletonDependsOnScoped {
                    singleton: "Reporter".to_string(),
                    scoped: "Session".to_string(),
                },
            ]
        );
    }

    #[test]
    fn shadowed_provider_is_reported_with_both_members() {
        let mut descriptor = ContainerDescriptor::new(None, "AppContainerBase");
        descriptor.register(registration(
            "Store",
            "Primary",
            Lifetime::Singleton,
            ConstructionSource::expression("Store::open()"),
        ));
        descriptor.register(registration(
            "Store",
            "Replica",
            Lifetime::Singleton,
            ConstructionSource::expression("Store::replica()"),
        ));

        let report = validate(&descriptor);
        assert_eq!(
            report.warnings,
            vec![ValidationWarning::ShadowedProvider {
                type_name: "Store".to_string(),
                shadowed: "Primary".to_string(),
                winner: "Replica".to_string(),
            }]
        );
    }

    #[test]
    fn duplicate_accessor_is_an_error() {
        let mut descriptor = ContainerDescriptor::new(None, "AppContainerBase");
        descriptor.register(registration(
            "Config",
            "UserService",
            Lifetime::Singleton,
            ConstructionSource::expression("Config::default()"),
        ));
        descriptor.register(registration(
            "Users",
            "userService",
            Lifetime::Scoped,
            ConstructionSource::expression("Users::default()"),
        ));

        let report = validate(&descriptor);
        assert_eq!(
            report.errors,
            vec![ValidationError::DuplicateMember {
                member: "user_service".to_string(),
            }]
        );
    }
}
