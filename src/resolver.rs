//! Dependency resolution: from a declared descriptor to a generation plan.
//!
//! Resolution walks a [`ContainerDescriptor`] once, builds the
//! `type -> accessor` lookup table, rewrites every constructor-based
//! registration into a concrete construction expression, and derives the
//! generated identifiers. The output is a [`ResolvedContainer`], the exact
//! input the code generator renders.
//!
//! The lookup table is built over *all* registrations in declaration order,
//! each later registration of a type overwriting the earlier mapping.
//! Reordering providers can therefore change which sibling a constructor
//! parameter binds to; callers who need every provider of a type reachable
//! as a constructor argument must avoid duplicate provided types.

use std::collections::{HashMap, HashSet};

use crate::descriptors::{ConstructionSource, ContainerDescriptor};
use crate::error::{GenError, GenResult};
use crate::lifetime::Lifetime;

/// One registration after resolution: stable identifiers plus the rendered
/// construction expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMember {
    /// Generated accessor identifier (snake_case of the member name)
    pub member_ident: String,
    /// Generated backing-cell identifier (`<accessor>_cell`)
    pub field_ident: String,
    /// Provided type, as declared
    pub type_name: String,
    /// Caching discipline for the accessor
    pub lifetime: Lifetime,
    /// Construction expression the accessor evaluates, ready to emit
    pub construction: String,
}

/// A fully resolved container, ready for code generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedContainer {
    /// Declared container name, including any conventional suffix
    pub container_name: String,
    /// Generated type name (declared name minus the `Base` suffix)
    pub type_name: String,
    /// Namespace the generated items are emitted into, if any
    pub namespace: Option<String>,
    /// Import directives re-emitted verbatim
    pub usings: Vec<String>,
    /// Resolved members in declaration order
    pub members: Vec<ResolvedMember>,
}

/// Resolves a descriptor into a generation plan.
///
/// Pure function: identical descriptors always resolve identically. Fails
/// with [`GenError::MalformedRegistration`] for unusable construction
/// sources, [`GenError::DuplicateMember`] when two registrations collide on
/// the derived accessor identifier, and [`GenError::UnresolvedDependency`]
/// when a constructor parameter type has no provider in this container.
/// Errors abort resolution for this container only.
pub fn resolve(descriptor: &ContainerDescriptor) -> GenResult<ResolvedContainer> {
    let container = descriptor.container_name.as_str();

    // Last write wins: a later registration of the same type owns the
    // mapping for constructor argument binding.
    let mut type_to_accessor: HashMap<&str, String> = HashMap::new();
    for registration in &descriptor.registrations {
        type_to_accessor.insert(
            registration.type_name.as_str(),
            snake_ident(&registration.member_name),
        );
    }

    let mut members = Vec::with_capacity(descriptor.registrations.len());
    let mut seen: HashSet<String> = HashSet::new();

    for registration in &descriptor.registrations {
        if registration.member_name.trim().is_empty() || registration.type_name.trim().is_empty() {
            return Err(GenError::MalformedRegistration {
                member: registration.member_name.clone(),
                container: container.to_string(),
            });
        }

        let member_ident = snake_ident(&registration.member_name);
        if !seen.insert(member_ident.clone()) {
            return Err(GenError::DuplicateMember {
                member: member_ident,
                container: container.to_string(),
            });
        }

        let construction = match &registration.source {
            ConstructionSource::Expression(expr) => {
                if expr.trim().is_empty() {
                    return Err(GenError::MalformedRegistration {
                        member: registration.member_name.clone(),
                        container: container.to_string(),
                    });
                }
                expr.clone()
            }
            ConstructionSource::Constructor(signature) => {
                if signature.target_type.trim().is_empty() {
                    return Err(GenError::MalformedRegistration {
                        member: registration.member_name.clone(),
                        container: container.to_string(),
                    });
                }

                let mut args = Vec::with_capacity(signature.param_types.len());
                for param in &signature.param_types {
                    let accessor = type_to_accessor.get(param.as_str()).ok_or_else(|| {
                        GenError::UnresolvedDependency {
                            param_type: param.clone(),
                            container: container.to_string(),
                        }
                    })?;
                    args.push(format!("self.{}()", accessor));
                }
                format!("{}::new({})", signature.target_type, args.join(", "))
            }
        };

        let field_ident = format!("{}_cell", member_ident);
        members.push(ResolvedMember {
            member_ident,
            field_ident,
            type_name: registration.type_name.clone(),
            lifetime: registration.lifetime,
            construction,
        });
    }

    Ok(ResolvedContainer {
        container_name: container.to_string(),
        type_name: trim_base_suffix(container).to_string(),
        namespace: descriptor.namespace.clone(),
        usings: descriptor.usings.clone(),
        members,
    })
}

/// Strips the conventional `Base` suffix from a declared container name.
///
/// Names without the suffix (or that are nothing but the suffix) come back
/// unchanged.
pub(crate) fn trim_base_suffix(name: &str) -> &str {
    match name.strip_suffix("Base") {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => name,
    }
}

/// Derives the generated accessor identifier from a declared member name.
///
/// PascalCase and camelCase collapse to snake_case, acronym runs stay
/// together (`HTTPServer` -> `http_server`), and existing underscores pass
/// through. The derivation is deterministic, so identical member names always
/// produce identical identifiers.
pub(crate) fn snake_ident(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let chars: Vec<char> = name.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev_lower_or_digit = i > 0
                && (chars[i - 1].is_lowercase() || chars[i - 1].is_ascii_digit());
            let acronym_end = i > 0
                && chars[i - 1].is_uppercase()
                && chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev_lower_or_digit || acronym_end {
                out.push('_');
            }
            for lower in c.to_lowercase() {
                out.push(lower);
            }
        } else {
            out.push(c);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::{snake_ident, trim_base_suffix};

    #[test]
    fn snake_ident_handles_common_shapes() {
        assert_eq!(snake_ident("Config"), "config");
        assert_eq!(snake_ident("UserService"), "user_service");
        assert_eq!(snake_ident("requestId"), "request_id");
        assert_eq!(snake_ident("HTTPServer"), "http_server");
        assert_eq!(snake_ident("already_snake"), "already_snake");
        assert_eq!(snake_ident("Db2Pool"), "db2_pool");
    }

    #[test]
    fn base_suffix_is_conditional() {
        assert_eq!(trim_base_suffix("AppContainerBase"), "AppContainer");
        assert_eq!(trim_base_suffix("AppContainer"), "AppContainer");
        assert_eq!(trim_base_suffix("Base"), "Base");
    }
}
