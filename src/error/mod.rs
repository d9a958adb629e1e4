//! Error management system
//!
//! Provides error types for the FTP client.

pub mod types;

pub use types::{StorageError, TransferError};
