//! DAO (Data Access Object) layer.
//!
//! DAOs provide low-level, single-source data access abstractions.
//! Each DAO interface maps to one data source.
//!
//! Hierarchy:
//! ```text
//! Service → Repository (interface + impl) → DAO (interface + impl) → DB
//! ```

pub mod r#impl;
pub mod user_dao;

pub use r#impl::PgUserDao;
pub use user_dao::UserDao;

#[cfg(test)]
pub use user_dao::MockUserDao;
