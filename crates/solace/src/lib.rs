//! Solace - Emotionally supportive journaling companion
//!
//! This crate provides a per-user bounded memory of journal entries and a
//! reply pipeline that grounds generated responses in the newest entry only,
//! behind a keyword safety gate.

pub mod config;
pub mod error;
pub mod memory;
pub mod providers;
pub mod reply;
pub mod safety;
pub mod storage;
pub mod testing;

pub use error::SolaceError;
