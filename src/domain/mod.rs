//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, roles, timestamps, errors, paging)
//! - `account` - Users, credential rules and refresh tokens
//! - `catalog` - Tools exposed by the dashboard and their ordering
//! - `usage` - Records of tool use
//! - `utilities` - The stateless developer tools themselves

pub mod account;
pub mod catalog;
pub mod foundation;
pub mod usage;
pub mod utilities;
