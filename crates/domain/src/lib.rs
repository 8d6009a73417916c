//! # Cartage Domain
//!
//! Wire types and models for the Cartage ULD-management API.
//!
//! This crate contains:
//! - Schema types exchanged with the backend (users, organizations, ULD
//!   inventory, auth payloads)
//! - Domain error types and Result definitions
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other Cartage crates
//! - Only external dependencies allowed
//! - Pure data structures; no I/O

pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use errors::*;
pub use types::*;
