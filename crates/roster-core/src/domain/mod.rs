//! # Roster Domain
//!
//! The user entity and the value objects describing its storage lifecycle.

pub mod entities;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
