//! Outliner domain model.
//!
//! # Responsibility
//! - Define the project record (unassigned queue + topic table).
//! - Enforce uniqueness and single-placement invariants for notes.
//!
//! # Invariants
//! - Records carry data only; presentation handles live outside the model.
//! - Topics are never renamed or deleted.

pub mod project;
pub mod topic;
