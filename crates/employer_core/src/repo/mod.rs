//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the keyed-store contract the service depends on.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod employer_repo;
