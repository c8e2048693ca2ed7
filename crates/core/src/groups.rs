//! Well-known permission group names.
//!
//! These must match the seed data in `20260301000002_create_identity_tables.sql`.

pub const GROUP_MARKETER: &str = "Marketer";
pub const GROUP_OPERATOR: &str = "Operator";
pub const GROUP_MANAGER: &str = "Manager";
