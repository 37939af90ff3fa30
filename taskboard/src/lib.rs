//! Taskboard terminal client library.
//!
//! Splits the client into an HTTP API layer ([`api`]), a pure state
//! controller driven by operation outcomes ([`controller`]), the TUI input
//! state ([`app`]), and rendering ([`ui`]).

pub mod api;
pub mod app;
pub mod config;
pub mod controller;
pub mod ui;
