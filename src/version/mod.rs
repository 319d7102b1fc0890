//! Version handling for marketplace releases
//!
//! # Modules
//!
//! - [`dotted`]: Lenient dotted numeric versions and their ordering
//! - [`requirement`]: Requirement descriptors and host compatibility
//! - [`error`]: Error types for version parsing and requirement evaluation

pub mod dotted;
pub mod error;
pub mod requirement;

pub use dotted::Version;
pub use requirement::{Requirements, is_compatible};
