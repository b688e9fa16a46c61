//! Outliner use-case services.
//!
//! # Responsibility
//! - Define the ordering contract the presentation layer fulfils.
//! - Orchestrate model and codec calls into presentation-event level APIs.

pub mod arrangement;
pub mod outliner_service;
