//! Error types
//!
//! Defines domain-specific error types for each module of the FTP client.

use std::fmt;
use std::path::PathBuf;

/// Transfer module errors
#[derive(Debug)]
pub enum TransferError {
    TypeNegotiationFailed,
    PassiveModeFailed,
    DataConnectFailed { host: String, port: String },
    CommandFailed(String),
}

impl fmt::Display for TransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferError::TypeNegotiationFailed => {
                write!(f, "Server rejected TYPE I transfer type")
            }
            TransferError::PassiveModeFailed => {
                write!(f, "No usable connection information in PASV reply")
            }
            TransferError::DataConnectFailed { host, port } => {
                write!(f, "Could not open data connection to {host}:{port}")
            }
            TransferError::CommandFailed(cmd) => write!(f, "Data command failed: {cmd}"),
        }
    }
}

impl std::error::Error for TransferError {}

/// Storage module errors
#[derive(Debug)]
pub enum StorageError {
    SourceMissing(PathBuf),
    DestinationExists(PathBuf),
    ParentMissing(PathBuf),
    NotADirectory(PathBuf),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::SourceMissing(p) => {
                write!(f, "Local source file not found: {}", p.display())
            }
            StorageError::DestinationExists(p) => {
                write!(f, "Local destination already exists: {}", p.display())
            }
            StorageError::ParentMissing(p) => {
                write!(f, "Parent directory not found: {}", p.display())
            }
            StorageError::NotADirectory(p) => {
                write!(f, "Not a directory: {}", p.display())
            }
        }
    }
}

impl std::error::Error for StorageError {}
