//! # ferrous-wire
//!
//! A type-keyed service registry and resolution engine.
//!
//! ## Features
//!
//! - **Instances and factories**: register ready-made values or constructors
//!   whose parameters are resolved from the container
//! - **Lifetimes**: Transient, Singleton and Scoped caching policies
//! - **Container trees**: child containers delegate to their parent and get a
//!   private cache for every Scoped factory
//! - **Function invocation**: call any function with its parameters resolved
//! - **Circular dependency detection**: cycles are reported with their path
//!
//! ## Quick Start
//!
//! ```rust
//! use ferrous_wire::{ContainerBuilder, DiResult, Lifetime, Resolver};
//! use std::sync::Arc;
//!
//! struct Database {
//!     connection_string: String,
//! }
//!
//! struct UserService {
//!     db: Arc<Database>,
//! }
//!
//! // Register services
//! let mut builder = ContainerBuilder::new();
//! builder
//!     .register_instance(Arc::new(Database {
//!         connection_string: "postgres://localhost".to_string(),
//!     }))
//!     .unwrap();
//! builder
//!     .register_factory(|db: Arc<Database>| Arc::new(UserService { db }), Lifetime::Transient)
//!     .unwrap();
//!
//! // Build the container and resolve
//! let container = builder.build();
//! let users = container.get::<Arc<UserService>>().unwrap();
//! assert_eq!(users.db.connection_string, "postgres://localhost");
//!
//! // Or let the container call a function for you
//! container
//!     .resolve(|users: Arc<UserService>| -> DiResult<()> {
//!         assert_eq!(users.db.connection_string, "postgres://localhost");
//!         Ok(())
//!     })
//!     .unwrap();
//! ```
//!
//! ## Service Lifetimes
//!
//! - **Singleton**: constructed once, in the container that holds the registration
//! - **Scoped**: constructed once per child container
//! - **Transient**: constructed on every resolution
//!
//! ## Trait Objects
//!
//! Any `Clone + Send + Sync + 'static` type can be a service, including
//! `Arc<dyn Trait>`:
//!
//! ```rust
//! use ferrous_wire::{ContainerBuilder, Lifetime, Resolver};
//! use std::sync::Arc;
//!
//! trait Logger: Send + Sync {
//!     fn prefix(&self) -> &str;
//! }
//!
//! struct ConsoleLogger;
//! impl Logger for ConsoleLogger {
//!     fn prefix(&self) -> &str {
//!         "[console]"
//!     }
//! }
//!
//! let mut builder = ContainerBuilder::new();
//! builder
//!     .register_factory(|| Arc::new(ConsoleLogger) as Arc<dyn Logger>, Lifetime::Singleton)
//!     .unwrap();
//!
//! let container = builder.build();
//! let logger = container.get::<Arc<dyn Logger>>().unwrap();
//! assert_eq!(logger.prefix(), "[console]");
//! ```

pub mod builder;
pub mod container;
pub mod error;
pub mod invocation;
pub mod key;
pub mod lifetime;
pub mod observer;
pub mod traits;

// Internal modules
mod internal;
mod registration;

// Re-exports
pub use builder::{ContainerBuilder, ContainerBuilderExt, Module};
pub use container::{Container, Resolved};
pub use error::{AggregateError, DiError, DiResult, SharedError};
pub use invocation::{Injectable, Signature};
pub use key::{key_of_type, Key};
pub use lifetime::Lifetime;
pub use observer::{DiObserver, LoggingObserver};
pub use registration::AnyArc;
pub use traits::{Resolver, ResolverCore};
