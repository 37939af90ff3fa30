//! Shared entity and wire-format definitions for Taskboard.
//!
//! Both the server and the client depend on this crate so that the task
//! entity, the request/response bodies, and the title validation rule are
//! defined exactly once.

pub mod api;
pub mod task;
