//! Storage module for report attachments
//!
//! Provides the process-local disk blob store that backs attachment
//! writes during submission and raw downloads.

mod disk_store;

pub use disk_store::DiskStorage;
