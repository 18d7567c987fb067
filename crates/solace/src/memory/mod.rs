//! Memory types and operations
//!
//! The per-user journal ledger: bounded record types, the persisting store,
//! and the validated user id that keys everything.

pub mod store;
pub mod types;
pub mod user;

pub use store::MemoryStore;
pub use types::{MEMORY_LIMIT, MemoryLedger, MemoryRecord};
pub use user::{UserId, UserIdError};
