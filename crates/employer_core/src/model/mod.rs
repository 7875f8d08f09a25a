//! Domain model for the employee roster.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep one shape for storage, service and transport layers.
//!
//! # Invariants
//! - Every stored record is identified by a store-assigned `EmployerId`.
//! - Deletion is a hard delete; ids are not handed out again.

pub mod employer;
