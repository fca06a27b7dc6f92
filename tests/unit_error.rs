/// Unit tests for GenError display formatting and the GenResult alias

use rivet_di::{GenError, GenResult};
use std::error::Error;

#[test]
fn test_error_display_unresolved_dependency() {
    let error = GenError::UnresolvedDependency {
        param_type: "Database".to_string(),
        container: "AppContainerBase".to_string(),
    };
    let display_str = format!("{}", error);
    assert_eq!(display_str, "No provider for Database in container AppContainerBase");
    assert!(display_str.contains("Database"));
    assert!(display_str.contains("AppContainerBase"));
}

#[test]
fn test_error_display_duplicate_member() {
    let error = GenError::DuplicateMember {
        member: "user_service".to_string(),
        container: "AppContainerBase".to_string(),
    };
    let display_str = format!("{}", error);
    assert_eq!(display_str, "Duplicate member user_service in container AppContainerBase");
    assert!(display_str.contains("user_service"));
}

#[test]
fn test_error_display_malformed_registration() {
    let error = GenError::MalformedRegistration {
        member: "Users".to_string(),
        container: "AppContainerBase".to_string(),
    };
    let display_str = format!("{}", error);
    assert_eq!(display_str, "Malformed registration Users in container AppContainerBase");
}

#[test]
fn test_error_implements_std_error() {
    let error = GenError::DuplicateMember {
        member: "config".to_string(),
        container: "AppContainerBase".to_string(),
    };
    let as_dyn: &dyn Error = &error;
    assert!(!as_dyn.to_string().is_empty());
    assert!(as_dyn.source().is_none());
}

#[test]
fn test_error_equality() {
    let a = GenError::UnresolvedDependency {
        param_type: "Database".to_string(),
        container: "AppContainerBase".to_string(),
    };
    let b = a.clone();
    assert_eq!(a, b);

    let c = GenError::UnresolvedDependency {
        param_type: "Config".to_string(),
        container: "AppContainerBase".to_string(),
    };
    assert_ne!(a, c);
}

#[test]
fn test_gen_result_alias() {
    fn produces(ok: bool) -> GenResult<u32> {
        if ok {
            Ok(7)
        } else {
            Err(GenError::MalformedRegistration {
                member: "Users".to_string(),
                container: "AppContainerBase".to_string(),
            })
        }
    }

    assert_eq!(produces(true).unwrap(), 7);
    assert!(produces(false).is_err());
}
