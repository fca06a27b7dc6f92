//! Graph export functionality for dependency visualization.
//!
//! Exports the provider graph of a [`ContainerDescriptor`] as a serializable
//! structure for visualization tools, debuggers, and documentation. Export is
//! best-effort and never fails: unresolved constructor parameters simply
//! produce no edge while staying listed on their node, so a descriptor the
//! generator would reject can still be drawn.

use serde::{Deserialize, Serialize};

use crate::descriptors::{ConstructionSource, ContainerDescriptor};
use crate::lifetime::Lifetime;
use crate::resolver::snake_ident;

/// Export format version carried in [`GraphMetadata`].
const GRAPH_VERSION: &str = "1";

/// A node in the provider graph: one registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Unique identifier, the derived accessor name
    pub id: String,
    /// Declared member name
    pub member_name: String,
    /// Provided type, as declared
    pub type_name: String,
    /// Lifetime label (`singleton`, `scoped`, `transient`)
    pub lifetime: String,
    /// Raw constructor parameter types; empty for expression registrations
    pub dependencies: Vec<String>,
}

/// An edge from a depending member to the provider its constructor parameter
/// binds to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Accessor id of the member that takes the dependency
    pub from: String,
    /// Accessor id of the provider that satisfies it
    pub to: String,
    /// The parameter type the binding resolves
    pub param_type: String,
}

/// Metadata about the exported container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphMetadata {
    /// Declared container name
    pub container_name: String,
    /// Namespace of the declaration, if any
    pub namespace: Option<String>,
    /// Total registrations
    pub member_count: usize,
    /// Number of singleton registrations
    pub singleton_count: usize,
    /// Number of scoped registrations
    pub scoped_count: usize,
    /// Number of transient registrations
    pub transient_count: usize,
    /// Export format version
    pub version: String,
}

/// Complete provider graph for one container declaration
///
/// # Examples
///
/// ```rust
/// use rivet_di::graph_export::export;
/// use rivet_di::{ConstructionSource, ContainerDescriptor, Lifetime, Registration};
///
/// let mut descriptor = ContainerDescriptor::new(None, "AppContainerBase");
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
/// let graph = export(&descriptor);
/// assert_eq!(graph.nodes.len(), 2);
/// assert_eq!(graph.edges.len(), 1);
/// assert_eq!(graph.edges[0].from, "users");
/// assert_eq!(graph.edges[0].to, "db");
///
/// let json = graph.to_json().unwrap();
/// assert!(json.contains("\"container_name\": \"AppContainerBase\""));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyGraph {
    /// All registration nodes, in declaration order
    pub nodes: Vec<GraphNode>,
    /// Resolved dependency edges
    pub edges: Vec<GraphEdge>,
    /// Graph-level metadata
    pub metadata: GraphMetadata,
}

impl DependencyGraph {
    /// Serializes the graph as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a graph previously produced by [`to_json`](Self::to_json).
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Exports the provider graph of one descriptor.
///
/// Bindings follow the resolver's rules, the last registration of a type
/// wins, but unlike resolution this never fails: parameters without a
/// provider are left edge-less.
pub fn export(descriptor: &ContainerDescriptor) -> DependencyGraph {
    let mut type_to_id: std::collections::HashMap<&str, String> =
        std::collections::HashMap::new();
    for registration in &descriptor.registrations {
        type_to_id.insert(
            registration.type_name.as_str(),
            snake_ident(&registration.member_name),
        );
    }

    let mut nodes = Vec::with_capacity(descriptor.registrations.len());
    let mut edges = Vec::new();
    let mut singleton_count = 0;
    let mut scoped_count = 0;
    let mut transient_count = 0;

    for registration in &descriptor.registrations {
        match registration.lifetime {
            Lifetime::Singleton => singleton_count += 1,
            Lifetime::Scoped => scoped_count += 1,
            Lifetime::Transient => transient_count += 1,
        }

        let id = snake_ident(&registration.member_name);
        let dependencies = match &registration.source {
            ConstructionSource::Constructor(signature) => signature.param_types.clone(),
            ConstructionSource::Expression(_) => Vec::new(),
        };

        for param in &dependencies {
            if let Some(provider_id) = type_to_id.get(param.as_str()) {
                edges.push(GraphEdge {
                    from: id.clone(),
                    to: provider_id.clone(),
                    param_type: param.clone(),
                });
            }
        }

        nodes.push(GraphNode {
            id,
            member_name: registration.member_name.clone(),
            type_name: registration.type_name.clone(),
            lifetime: registration.lifetime.label().to_string(),
            dependencies,
        });
    }

    DependencyGraph {
        nodes,
        edges,
        metadata: GraphMetadata {
            container_name: descriptor.container_name.clone(),
            namespace: descriptor.namespace.clone(),
            member_count: descriptor.registrations.len(),
            singleton_count,
            scoped_count,
            transient_count,
            version: GRAPH_VERSION.to_string(),
        },
    }
}
