//! Domain core for the CRM back office.
//!
//! Pure logic only: identifiers, the error taxonomy, group names, the
//! authorization requirement and matrix, statistics math, and field
//! validation helpers. Nothing in this crate performs I/O.

pub mod error;
pub mod groups;
pub mod permissions;
pub mod statistics;
pub mod types;
pub mod validation;
