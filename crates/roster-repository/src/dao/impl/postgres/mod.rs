//! PostgreSQL DAO implementations.

mod user_dao_impl;

pub use user_dao_impl::PgUserDao;
