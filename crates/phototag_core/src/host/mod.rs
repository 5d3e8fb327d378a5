//! Host collaborator capabilities.
//!
//! # Responsibility
//! - Declare the interfaces the core needs from its embedding host.
//! - Keep the core free of any implicit global host access.
//!
//! # Invariants
//! - Capabilities are passed explicitly at construction time.
//! - The core never reads image bytes or indexes documents itself.

pub mod capability;
