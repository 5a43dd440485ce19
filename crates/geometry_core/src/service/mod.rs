//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate shape construction and repository calls into use cases.
//! - Keep CLI and other controllers decoupled from storage details.

pub mod calculation_service;
