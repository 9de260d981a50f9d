//! The central domain logic and interface definitions for Phishwatch.
//!
//! Everything here is persistence- and transport-agnostic: models, the
//! application error type, the port traits adapters implement, and the
//! slug rules for case URLs.

pub mod error;
pub mod models;
pub mod slug;
pub mod traits;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use traits::*;
