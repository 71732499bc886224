//! # Domain Layer
//!
//! Pure business logic: value objects, entities, lifecycle events, request
//! validation, and the domain error taxonomy. Nothing in this layer spawns
//! tasks, takes clocks, or touches I/O — time always arrives as an explicit
//! [`Timestamp`](value_objects::Timestamp) argument.

pub mod entities;
pub mod errors;
pub mod events;
pub mod validation;
pub mod value_objects;
