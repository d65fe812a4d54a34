//! DAO implementations.
//!
//! Trait definitions live in the parent `dao/` module (e.g. `user_dao.rs`).
//! Implementations are organized by technology.

pub mod postgres;

pub use postgres::PgUserDao;
