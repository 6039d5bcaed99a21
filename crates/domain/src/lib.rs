//! Domain layer for the interpreter core
//!
//! Contains the value objects, entities, and domain errors shared by the
//! provider adapters, the router, and the orchestration services. This layer
//! has no I/O dependencies and defines the ubiquitous language.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
