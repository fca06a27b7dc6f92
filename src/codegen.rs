//! Source emission for resolved containers.
//!
//! [`generate`] is the whole public surface: a pure, deterministic function
//! from a [`ContainerDescriptor`] to a [`GeneratedOutput`]. Identical
//! descriptors yield byte-identical source text, which is what makes the
//! incremental cache sound and builds reproducible.
//!
//! Emitted code is self-qualified: every path the generator introduces is
//! written as `::std::sync::Arc` / `::once_cell::sync::OnceCell`, so the
//! output can never collide with the consumer's imports. Types named by the
//! descriptor (provided types, constructor targets, expression bodies) are
//! emitted exactly as declared and resolve through the re-emitted usings.

use crate::descriptors::ContainerDescriptor;
use crate::error::GenResult;
use crate::lifetime::Lifetime;
use crate::resolver::{self, ResolvedContainer, ResolvedMember};

const HEADER: &str = "// Code generated by rivet-di. Do not edit.\n";

/// One generated compilation unit: the file name to write it under and its
/// complete source text
///
/// Produced once per container descriptor and handed to the host pipeline,
/// which owns persisting the text and wiring the file into the build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedOutput {
    /// Derived file name, `<container-minus-Base-suffix>.Generated.rs`
    pub file_name: String,
    /// Complete, self-contained source text
    pub source_text: String,
}

/// Generates the container source for one descriptor.
///
/// Resolution errors ([`crate::GenError`]) abort generation for this
/// container; no partial output is ever produced.
///
/// # Examples
///
/// ```rust
/// use rivet_di::{codegen, ConstructionSource, ContainerDescriptor, Lifetime, Registration};
///
/// let mut descriptor = ContainerDescriptor::new(None, "AppContainerBase");
/// descriptor.register(Registration::new(
///     "Config",
///     "Config",
///     Lifetime::Singleton,
///     ConstructionSource::expression("Config::default()"),
/// ));
///
/// let output = codegen::generate(&descriptor).unwrap();
/// assert_eq!(output.file_name, "AppContainer.Generated.rs");
/// assert!(output.source_text.contains("impl AppContainerBase for AppContainer"));
/// ```
pub fn generate(descriptor: &ContainerDescriptor) -> GenResult<GeneratedOutput> {
    let resolved = resolver::resolve(descriptor)?;
    Ok(render(&resolved))
}

fn render(resolved: &ResolvedContainer) -> GeneratedOutput {
    let mut body = String::new();

    for using in &resolved.usings {
        body.push_str(using);
        body.push('\n');
    }
    if !resolved.usings.is_empty() {
        body.push('\n');
    }

    render_struct(&mut body, resolved);
    body.push('\n');
    render_inherent_impl(&mut body, resolved);
    body.push('\n');
    render_base_impl(&mut body, resolved);

    let mut source_text = String::from(HEADER);
    source_text.push('\n');
    match &resolved.namespace {
        Some(namespace) => {
            source_text.push_str(&format!("pub mod {} {{\n", namespace));
            source_text.push_str(&indent(&body));
            source_text.push_str("}\n");
        }
        None => source_text.push_str(&body),
    }

    GeneratedOutput {
        file_name: format!("{}.Generated.rs", resolved.type_name),
        source_text,
    }
}

fn render_struct(out: &mut String, resolved: &ResolvedContainer) {
    let name = &resolved.type_name;
    out.push_str(&format!("pub struct {} {{\n", name));
    out.push_str(&format!(
        "    root: ::std::option::Option<::std::sync::Arc<{}>>,\n",
        name
    ));
    for member in backed_members(resolved) {
        out.push_str(&format!(
            "    {}: ::once_cell::sync::OnceCell<::std::sync::Arc<{}>>,\n",
            member.field_ident, member.type_name
        ));
    }
    out.push_str("}\n");
}

fn render_inherent_impl(out: &mut String, resolved: &ResolvedContainer) {
    let name = &resolved.type_name;
    out.push_str(&format!("impl {} {{\n", name));

    out.push_str("    /// Creates a root container; it owns its own singleton storage.\n");
    out.push_str("    pub fn new() -> Self {\n");
    out.push_str("        Self {\n");
    out.push_str("            root: ::std::option::Option::None,\n");
    for member in backed_members(resolved) {
        out.push_str(&format!(
            "            {}: ::once_cell::sync::OnceCell::new(),\n",
            member.field_ident
        ));
    }
    out.push_str("        }\n");
    out.push_str("    }\n");
    out.push('\n');

    out.push_str("    /// Creates an instance attached to `root`; singletons are shared with it.\n");
    out.push_str(&format!(
        "    pub fn with_root(root: ::std::sync::Arc<{}>) -> Self {{\n",
        name
    ));
    out.push_str("        Self {\n");
    out.push_str("            root: ::std::option::Option::Some(root),\n");
    for member in backed_members(resolved) {
        out.push_str(&format!(
            "            {}: ::once_cell::sync::OnceCell::new(),\n",
            member.field_ident
        ));
    }
    out.push_str("        }\n");
    out.push_str("    }\n");
    out.push('\n');

    out.push_str(&format!("    fn root(&self) -> &{} {{\n", name));
    out.push_str("        self.root.as_deref().unwrap_or(self)\n");
    out.push_str("    }\n");
    out.push_str("}\n");
}

fn render_base_impl(out: &mut String, resolved: &ResolvedContainer) {
    let name = &resolved.type_name;
    let base = &resolved.container_name;

    if resolved.members.is_empty() {
        out.push_str(&format!("impl {} for {} {{}}\n", base, name));
        return;
    }

    out.push_str(&format!("impl {} for {} {{\n", base, name));
    for (index, member) in resolved.members.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        render_member(out, member);
    }
    out.push_str("}\n");
}

fn render_member(out: &mut String, member: &ResolvedMember) {
    out.push_str(&format!("    // {}\n", member.lifetime.label()));
    out.push_str(&format!(
        "    fn {}(&self) -> ::std::sync::Arc<{}> {{\n",
        member.member_ident, member.type_name
    ));

    match member.lifetime {
        Lifetime::Transient => {
            out.push_str(&format!(
                "        ::std::sync::Arc::new({})\n",
                member.construction
            ));
        }
        Lifetime::Scoped => {
            out.push_str(&format!("        self.{}\n", member.field_ident));
            out.push_str(&format!(
                "            .get_or_init(|| ::std::sync::Arc::new({}))\n",
                member.construction
            ));
            out.push_str("            .clone()\n");
        }
        Lifetime::Singleton => {
            out.push_str("        let root = self.root();\n");
            out.push_str(&format!("        root.{}\n", member.field_ident));
            out.push_str(&format!(
                "            .get_or_init(|| ::std::sync::Arc::new({}))\n",
                member.construction
            ));
            out.push_str("            .clone()\n");
        }
    }

    out.push_str("    }\n");
}

fn backed_members(resolved: &ResolvedContainer) -> impl Iterator<Item = &ResolvedMember> {
    resolved
        .members
        .iter()
        .filter(|member| member.lifetime.has_backing_field())
}

fn indent(body: &str) -> String {
    let mut out = String::with_capacity(body.len() + body.len() / 8);
    for line in body.lines() {
        if line.is_empty() {
            out.push('\n');
        } else {
            out.push_str("    ");
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}
