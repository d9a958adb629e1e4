//! Transfer module
//!
//! Passive-mode data channel bringup and the data-transfer command
//! drivers built on top of it.

pub mod data_channel;
pub mod operations;

pub use data_channel::open_data_connection;
pub use operations::{download, download_listing, upload, UploadMode};
