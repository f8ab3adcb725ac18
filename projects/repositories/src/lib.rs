//! Popular GitHub repositories per programming language
//!
//! - REST API endpoints in `endpoints/`
//! - Fetch-and-store command in `writemodel/`
//! - Storage capabilities in `storage/`, PostgreSQL models and queries in `db/`
//! - Schema is applied from `migrations/` with the diesel CLI

pub mod config;
pub mod db;
pub mod endpoints;
pub mod storage;
pub mod types;
pub mod writemodel;
