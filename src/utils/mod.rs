//! Utility functions
//!
//! Shared helpers for the client.

pub mod logging;
