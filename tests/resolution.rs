/// Dependency resolution tests: binding rules, shadowing, and error cases

use rivet_di::{codegen, ConstructionSource, ContainerDescriptor, GenError, Lifetime, Registration};

fn expression(type_name: &str, member: &str, lifetime: Lifetime, expr: &str) -> Registration {
    Registration::new(type_name, member, lifetime, ConstructionSource::expression(expr))
}

#[test]
fn test_zero_parameter_constructor() {
    let mut descriptor = ContainerDescriptor::new(None, "AppContainerBase");
    descriptor.register(Registration::new(
        "Config",
        "Config",
        Lifetime::Singleton,
        ConstructionSource::constructor("Config", Vec::<String>::new()),
    ));

    let output = codegen::generate(&descriptor).unwrap();
    assert!(output.source_text.contains("Config::new()"));
}

#[test]
fn test_expression_emitted_verbatim() {
    let mut descriptor = ContainerDescriptor::new(None, "AppContainerBase");
    descriptor.register(expression(
        "Config",
        "Config",
        Lifetime::Transient,
        "Config::builder().port(8080).build()",
    ));

    let output = codegen::generate(&descriptor).unwrap();
    assert!(output.source_text.contains("Config::builder().port(8080).build()"));
}

#[test]
fn test_last_registration_of_a_type_wins_binding() {
    let mut descriptor = ContainerDescriptor::new(None, "AppContainerBase");
    descriptor.register(expression("Store", "Primary", Lifetime::Singleton, "Store::open()"));
    descriptor.register(expression("Store", "Replica", Lifetime::Singleton, "Store::replica()"));
    descriptor.register(Registration::new(
        "Reader",
        "Reader",
        Lifetime::Scoped,
        ConstructionSource::constructor("Reader", ["Store"]),
    ));

    let output = codegen::generate(&descriptor).unwrap();
    assert!(output.source_text.contains("Reader::new(self.replica())"));
    assert!(!output.source_text.contains("Reader::new(self.primary())"));
    // The shadowed provider still gets its own accessor.
    assert!(output.source_text.contains("fn primary(&self)"));
}

#[test]
fn test_binding_ignores_declaration_position() {
    // A provider declared after its consumer still satisfies the parameter.
    let mut descriptor = ContainerDescriptor::new(None, "AppContainerBase");
    descriptor.register(Registration::new(
        "Service",
        "Service",
        Lifetime::Scoped,
        ConstructionSource::constructor("Service", ["Config"]),
    ));
    descriptor.register(expression("Config", "Config", Lifetime::Singleton, "Config::default()"));

    let output = codegen::generate(&descriptor).unwrap();
    assert!(output.source_text.contains("Service::new(self.config())"));
}

#[test]
fn test_unresolved_dependency_error() {
    let mut descriptor = ContainerDescriptor::new(None, "OrdersContainerBase");
    descriptor.register(Registration::new(
        "OrderService",
        "Orders",
        Lifetime::Scoped,
        ConstructionSource::constructor("OrderService", ["Repository"]),
    ));

    match codegen::generate(&descriptor) {
        Err(GenError::UnresolvedDependency { param_type, container }) => {
            assert_eq!(param_type, "Repository");
            assert_eq!(container, "OrdersContainerBase");
        }
        other => panic!("expected UnresolvedDependency, got {:?}", other),
    }
}

#[test]
fn test_duplicate_member_error_after_case_folding() {
    let mut descriptor = ContainerDescriptor::new(None, "AppContainerBase");
    descriptor.register(expression("Config", "UserService", Lifetime::Singleton, "Config::default()"));
    descriptor.register(expression("Users", "userService", Lifetime::Scoped, "Users::default()"));

    match codegen::generate(&descriptor) {
        Err(GenError::DuplicateMember { member, container }) => {
            assert_eq!(member, "user_service");
            assert_eq!(container, "AppContainerBase");
        }
        other => panic!("expected DuplicateMember, got {:?}", other),
    }
}

#[test]
fn test_malformed_registration_errors() {
    // Blank member name.
    let mut blank_member = ContainerDescriptor::new(None, "AppContainerBase");
    blank_member.register(expression("Config", "  ", Lifetime::Singleton, "Config::default()"));
    assert!(matches!(
        codegen::generate(&blank_member),
        Err(GenError::MalformedRegistration { .. })
    ));

    // Blank provided type.
    let mut blank_type = ContainerDescriptor::new(None, "AppContainerBase");
    blank_type.register(expression("", "Config", Lifetime::Singleton, "Config::default()"));
    assert!(matches!(
        codegen::generate(&blank_type),
        Err(GenError::MalformedRegistration { .. })
    ));

    // Blank expression body.
    let mut blank_expr = ContainerDescriptor::new(None, "AppContainerBase");
    blank_expr.register(expression("Config", "Config", Lifetime::Singleton, "   "));
    assert!(matches!(
        codegen::generate(&blank_expr),
        Err(GenError::MalformedRegistration { .. })
    ));

    // Blank constructor target.
    let mut blank_target = ContainerDescriptor::new(None, "AppContainerBase");
    blank_target.register(Registration::new(
        "Config",
        "Config",
        Lifetime::Singleton,
        ConstructionSource::constructor("", Vec::<String>::new()),
    ));
    assert!(matches!(
        codegen::generate(&blank_target),
        Err(GenError::MalformedRegistration { .. })
    ));
}

#[test]
fn test_failure_produces_no_partial_output() {
    let mut descriptor = ContainerDescriptor::new(None, "AppContainerBase");
    descriptor.register(expression("Config", "Config", Lifetime::Singleton, "Config::default()"));
    descriptor.register(Registration::new(
        "Service",
        "Service",
        Lifetime::Scoped,
        ConstructionSource::constructor("Service", ["Missing"]),
    ));

    // One bad registration fails the whole container, even though the first
    // member on its own would generate fine.
    assert!(codegen::generate(&descriptor).is_err());
}

#[test]
fn test_self_dependency_resolves_to_own_accessor() {
    // A provider whose constructor takes its own provided type binds to
    // itself under last-write-wins; generation accepts it.
    let mut descriptor = ContainerDescriptor::new(None, "AppContainerBase");
    descriptor.register(Registration::new(
        "Node",
        "Node",
        Lifetime::Transient,
        ConstructionSource::constructor("Node", ["Node"]),
    ));

    let output = codegen::generate(&descriptor).unwrap();
    assert!(output.source_text.contains("Node::new(self.node())"));
}
