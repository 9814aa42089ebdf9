//! Core use-case services.
//!
//! # Responsibility
//! - Validate raw form input before it reaches repositories.
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep request-handling layers decoupled from storage details.

pub mod character_service;
pub mod entry_service;
pub mod form;
