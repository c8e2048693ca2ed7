//! Domain model structs and DTOs.
//!
//! Each CRM submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A form DTO naming every field a create or update binds, with its
//!   validation rules

pub mod active_client;
pub mod campaign;
pub mod contract;
pub mod group;
pub mod potential_client;
pub mod service;
pub mod session;
pub mod user;
