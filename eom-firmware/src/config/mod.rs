//! Persistent configuration backend

pub mod storage;

pub use storage::FlashConfigStorage;
