//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store, capabilities and coordinate mapping into
//!   host-facing APIs.
//! - Keep the embedding surface decoupled from storage details.

pub mod tagger_service;
