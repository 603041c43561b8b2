//! Request-identity extractors.
//!
//! - [`auth`] -- soft authentication: decode a bearer token into an
//!   explicit `Option<Principal>` without ever rejecting.
//! - [`rbac`] -- role gates built on top of the soft extractor.

pub mod auth;
pub mod rbac;
