//! # Roster Core
//!
//! Core types, entities, and error definitions shared by every layer of the
//! Roster user service.

pub mod error;
pub mod id;
pub mod patch;
pub mod result;
pub mod user;
pub mod validation;

pub use error::*;
pub use id::*;
pub use patch::*;
pub use result::*;
pub use user::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
