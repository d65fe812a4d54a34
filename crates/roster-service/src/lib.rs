//! # Roster Service
//!
//! Business logic service layer for the Roster user service.
//! Validates input, applies partial updates, and maps records to responses.

pub mod dto;
pub mod r#impl;
pub mod user_service;

pub use dto::*;
pub use r#impl::UserServiceImpl;
pub use user_service::*;
