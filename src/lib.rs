//! Tool Hub - Developer utility hub backend
//!
//! Accounts and sessions, an admin-managed tool catalog, per-user usage
//! logging, and a set of stateless developer utilities (generators,
//! encoders, inspectors, URL tester, DNS lookup, fake data) exposed as a
//! REST API.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
