//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation, storage and export into use-case level APIs.
//! - Keep front ends decoupled from storage details.

pub mod audit_service;
