//! # tagsum-vault
//!
//! Document store implementations for tagsum.
//!
//! This crate provides two [`DocumentStore`] backends sharing the same
//! reference mapping and change-event contract:
//! - [`FilesystemVault`]: documents as `.md` files under a root directory
//! - [`MemoryVault`]: in-memory store for tests and embedded use
//!
//! [`DocumentStore`]: tagsum_core::DocumentStore

pub mod fs;
pub mod memory;

// Re-export commonly used types at crate root
pub use fs::FilesystemVault;
pub use memory::MemoryVault;
