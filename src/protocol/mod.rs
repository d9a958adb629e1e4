//! FTP protocol implementation
//!
//! Command/reply exchange, reply classification and parsing, and the
//! command sequencing state machines.

pub mod fsm;
pub mod parser;
pub mod reply;

pub use parser::{parse_directory_reply, parse_pasv_reply};
pub use reply::{classify, ReplyClass, CRLF};
