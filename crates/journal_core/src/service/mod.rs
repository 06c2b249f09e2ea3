//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into UI-facing session APIs.
//! - Keep UI layers decoupled from storage details.

pub mod focus_service;
