//! Socket I/O layer
//!
//! Provides the byte-stream contract the protocol layer is written
//! against, and its blocking TCP implementation.

pub mod socket;

pub use socket::{Socket, TcpSocket, CHUNK_SIZE};
