//! Local storage checks
//!
//! Filesystem queries consulted before transfer commands are issued.

pub mod validation;

pub use validation::{check_download_destination, check_upload_source, file_size};
