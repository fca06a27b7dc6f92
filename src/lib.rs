//! # rivet-di
//!
//! Compile-time dependency injection container generation for Rust hosts,
//! inspired by source-generator DI frameworks.
//!
//! ## Features
//!
//! - **Declarative containers**: describe providers as plain data, get a
//!   complete container type as source text
//! - **Three lifetimes**: Singleton (per root), Scoped (per instance), and
//!   Transient (per access) with distinct emission templates
//! - **Constructor wiring**: parameter types bind to sibling providers and
//!   become accessor calls in the emitted constructor invocation
//! - **Deterministic output**: identical descriptors yield byte-identical
//!   source, so outputs are cacheable and builds reproducible
//! - **Incremental generation**: a one-deep per-declaration cache skips
//!   regeneration for structurally unchanged descriptors
//! - **Advisory validation**: captive-dependency and shadowing diagnostics
//!   before generation ever runs
//!
//! ## Quick Start
//!
//! ```rust
//! use rivet_di::{
//!     codegen, ConstructionSource, ContainerDescriptor, Lifetime, Registration,
//! };
//!
//! // Describe the container a front-end extracted from one declaration.
//! let mut descriptor = ContainerDescriptor::new(Some("app"), "AppContainerBase");
//! descriptor.register(Registration::new(
//!     "Database",
//!     "Db",
//!     Lifetime::Singleton,
//!     ConstructionSource::expression("Database::connect()"),
//! ));
//! descriptor.register(Registration::new(
//!     "UserService",
//!     "Users",
//!     Lifetime::Scoped,
//!     ConstructionSource::constructor("UserService", ["Database"]),
//! ));
//!
//! // Generate the container implementation.
//! let output = codegen::generate(&descriptor).unwrap();
//! assert_eq!(output.file_name, "AppContainer.Generated.rs");
//! assert!(output.source_text.contains("impl AppContainerBase for AppContainer"));
//! assert!(output.source_text.contains("UserService::new(self.db())"));
//! ```
//!
//! ## Provider Lifetimes
//!
//! - **Singleton**: one instance per *root* container; generated instances
//!   created with `with_root` share it through the root reference
//! - **Scoped**: one instance per container *instance*, independent even
//!   under a shared root
//! - **Transient**: constructed fresh on every accessor call
//!
//! ## Incremental Generation
//!
//! ```rust
//! use rivet_di::{
//!     ConstructionSource, ContainerDescriptor, Generator, Lifetime, Registration,
//! };
//! use std::sync::Arc;
//!
//! let mut descriptor = ContainerDescriptor::new(None, "JobsContainerBase");
//! descriptor.register(Registration::new(
//!     "Queue",
//!     "Queue",
//!     Lifetime::Singleton,
//!     ConstructionSource::expression("Queue::default()"),
//! ));
//!
//! let generator = Generator::new();
//! let first = generator.generate("jobs", &descriptor).unwrap();
//!
//! // Structurally unchanged: the cached output is reused, not regenerated.
//! let second = generator.generate("jobs", &descriptor).unwrap();
//! assert!(Arc::ptr_eq(&first, &second));
//! ```

pub mod cache;
pub mod codegen;
pub mod descriptors;
pub mod error;
pub mod lifetime;
pub mod pipeline;
pub mod resolver;
pub mod validation;

#[cfg(feature = "graph-export")]
pub mod graph_export;

pub use cache::{CacheDecision, GenerationCache};
pub use codegen::GeneratedOutput;
pub use descriptors::{ConstructionSource, ConstructorSignature, ContainerDescriptor, Registration};
pub use error::{GenError, GenResult};
pub use lifetime::Lifetime;
pub use pipeline::Generator;
pub use resolver::{ResolvedContainer, ResolvedMember};
pub use validation::{ValidationError, ValidationReport, ValidationWarning};

#[cfg(feature = "graph-export")]
pub use graph_export::{DependencyGraph, GraphEdge, GraphMetadata, GraphNode};
