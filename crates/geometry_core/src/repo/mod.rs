//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the calculation store contract.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `NewCalculation::validate()` before persistence.
//! - Store errors stay distinct from shape validation errors.

pub mod calculation_repo;
