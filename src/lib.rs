//! Client-side implementation of the File Transfer Protocol (RFC 959,
//! with RFC 1123 clarifications).
//!
//! One persistent control channel carries commands and replies; each
//! file transfer or listing opens an ephemeral passive-mode data channel
//! that is closed before the server's completion reply is read. Only
//! unstructured binary transfer (TYPE I) is supported.
//!
//! # Example
//! ```no_run
//! use ftp_client::{Credentials, FtpClient};
//!
//! let mut client = FtpClient::new();
//! if client.connect("test.rebex.net") && client.login(&Credentials::anonymous()) {
//!     if let Some(dir) = client.pwd() {
//!         println!("working directory: {dir}");
//!     }
//!     client.quit();
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod io;
pub mod protocol;
pub mod storage;
pub mod transfer;
pub mod utils;

pub use client::{Credentials, FtpClient};
