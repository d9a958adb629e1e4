//! Module `reply`
//!
//! Command/reply exchange on the control channel. Every server reply is a
//! CRLF-terminated line whose first three bytes are a numeric code; only
//! the first digit is classified here.

use log::{debug, error, warn};

use crate::io::Socket;

/// Line terminator for commands and replies (RFC 959).
pub const CRLF: &str = "\r\n";

/// A reply shorter than this cannot carry a reply code.
const MIN_REPLY_LEN: usize = 3;

/// First-digit classification of a server reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyClass {
    /// 1xx: positive preliminary, a second reply will follow.
    Preliminary,
    /// 2xx: positive completion.
    Success,
    /// 3xx: positive intermediate, the server expects another command.
    Intermediate,
    /// 4xx/5xx, or anything that is not a recognizable code.
    Failure,
}

/// Classify a reply by its leading byte.
pub fn classify(reply: &str) -> ReplyClass {
    match reply.as_bytes().first() {
        Some(b'1') => ReplyClass::Preliminary,
        Some(b'2') => ReplyClass::Success,
        Some(b'3') => ReplyClass::Intermediate,
        _ => ReplyClass::Failure,
    }
}

/// Send one command line and read the single reply that answers it.
///
/// The returned reply has the CRLF stripped and is guaranteed to be at
/// least three characters long, so `reply[0..3]` indexing is safe.
pub fn exchange<S: Socket>(control: &mut S, command: &str) -> Option<String> {
    let line = format!("{command}{CRLF}");
    let sent = control.send_string(&line);
    if sent < line.len() {
        error!("Short write sending command: sent={sent} expected={}", line.len());
        return None;
    }
    debug!("--> {command}");
    receive(control)
}

/// Read the next reply without sending a command first. Used for the
/// welcome message after connecting and for the server-initiated
/// completion reply after a data transfer.
///
/// Multi-line (`nnn-`) replies are not recognized; continuation lines
/// would be misread by the next exchange.
pub fn receive<S: Socket>(control: &mut S) -> Option<String> {
    let reply = control.read_until(CRLF)?;
    if reply.len() < MIN_REPLY_LEN {
        warn!("Malformed reply from server: {reply:?}");
        return None;
    }
    debug!("<-- {reply}");
    Some(reply)
}
