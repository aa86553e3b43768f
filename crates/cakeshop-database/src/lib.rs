//! # cakeshop-database
//!
//! Persistence layer: the [`store`] traits consumed by the service layer,
//! their PostgreSQL implementations under [`repositories`], and an
//! in-memory implementation in [`memory`] selectable via the
//! `database.provider` configuration key.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use store::{OrderStore, StatusBucket, UserStore};
