//! Use-case façade layer.
//!
//! # Responsibility
//! - Expose the public entry point presentation code talks to.
//! - Keep callers decoupled from storage, threading and notification details.

pub mod note_repository;
