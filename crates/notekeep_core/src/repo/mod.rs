//! Data-access contracts and persistence implementations.
//!
//! # Responsibility
//! - Define the narrow DAO contract the storage handle exposes.
//! - Isolate SQLite query details from lifecycle and façade code.
//!
//! # Invariants
//! - DAO operations are direct pass-throughs: no business logic, no
//!   validation, no notification concerns.

pub mod note_dao;
