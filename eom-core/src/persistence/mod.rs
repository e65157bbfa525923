//! Debounced persistence
//!
//! Configuration edits never write to flash directly. They request a
//! save at a deadline and the single pending deadline is committed once
//! time passes it.

pub mod scheduler;

pub use scheduler::{PersistenceFailed, PersistenceScheduler, DEFAULT_SAVE_DELAY_MS};
