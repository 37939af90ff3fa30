//! Taskboard REST server library.
//!
//! Exposes the document store and the HTTP surface for use in tests and
//! embedding. The server validates identifiers and input at the boundary,
//! performs one store operation per request, and maps every failure to a
//! JSON error response.

pub mod config;
pub mod routes;
pub mod store;
