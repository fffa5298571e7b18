//! Core traits for service resolution.

pub mod resolver;

pub use resolver::{Resolver, ResolverCore};
