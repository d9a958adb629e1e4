//! Module `fsm`
//!
//! Command sequencing state machines. Each function drives one command
//! exchange pattern on the control socket: single reply, preliminary
//! reply bracketing a data phase, the multi-exchange login and rename
//! sequences, and the 227/257 extracting variants.

use log::warn;

use crate::client::Credentials;
use crate::io::Socket;
use crate::protocol::parser;
use crate::protocol::reply::{self, ReplyClass};

/// Issue `command` and succeed on a 2xx reply.
///
/// Used by NOOP, QUIT, CWD, DELE, RMD and TYPE I.
pub fn one_step<S: Socket>(control: &mut S, command: &str) -> bool {
    match reply::exchange(control, command) {
        Some(r) => reply::classify(&r) == ReplyClass::Success,
        None => false,
    }
}

/// Issue a data-transfer command: a 1xx reply must arrive before the data
/// phase, and an unsolicited completion reply follows it.
///
/// `on_preliminary` performs the transfer and must close the data socket
/// before returning; the server does not emit the completion reply until
/// the data channel is closed. Succeeds iff the callback returned true and
/// the completion reply is 2xx.
///
/// Used by STOR, APPE, RETR and LIST.
pub fn two_step<S, F>(control: &mut S, command: &str, on_preliminary: F) -> bool
where
    S: Socket,
    F: FnOnce() -> bool,
{
    let first = match reply::exchange(control, command) {
        Some(r) => r,
        None => return false,
    };
    if reply::classify(&first) != ReplyClass::Preliminary {
        warn!("Expected preliminary reply for {command}, got: {first}");
        return false;
    }

    let transferred = on_preliminary();

    match reply::receive(control) {
        Some(completion) => transferred && reply::classify(&completion) == ReplyClass::Success,
        None => false,
    }
}

/// Run the USER / PASS / ACCT login sequence.
///
/// Supplied credentials are always sent, even when the previous step
/// already answered 2xx; a 3xx with nothing further to send fails the
/// login since the server expects more than we have.
pub fn login<S: Socket>(control: &mut S, credentials: &Credentials) -> bool {
    let user_reply = match reply::exchange(control, &format!("USER {}", credentials.username())) {
        Some(r) => reply::classify(&r),
        None => return false,
    };
    let password = match (user_reply, credentials.password()) {
        (ReplyClass::Success, None) => return true,
        (ReplyClass::Success | ReplyClass::Intermediate, Some(p)) => p,
        (ReplyClass::Intermediate, None) => {
            warn!("Server wants a password but none was supplied");
            return false;
        }
        _ => {
            warn!("Server rejected USER {}", credentials.username());
            return false;
        }
    };

    let pass_reply = match reply::exchange(control, &format!("PASS {password}")) {
        Some(r) => reply::classify(&r),
        None => return false,
    };
    let account = match (pass_reply, credentials.account()) {
        (ReplyClass::Success, None) => return true,
        (ReplyClass::Success | ReplyClass::Intermediate, Some(a)) => a,
        (ReplyClass::Intermediate, None) => {
            warn!("Server wants account information but none was supplied");
            return false;
        }
        _ => {
            warn!("Server rejected the password for {}", credentials.username());
            return false;
        }
    };

    match reply::exchange(control, &format!("ACCT {account}")) {
        Some(r) => reply::classify(&r) == ReplyClass::Success,
        None => false,
    }
}

/// Run the RNFR / RNTO rename sequence: RNFR must answer 3xx, RNTO 2xx.
pub fn rename<S: Socket>(control: &mut S, from: &str, to: &str) -> bool {
    match reply::exchange(control, &format!("RNFR {from}")) {
        Some(r) if reply::classify(&r) == ReplyClass::Intermediate => {}
        _ => {
            warn!("Server did not accept RNFR {from}");
            return false;
        }
    }

    match reply::exchange(control, &format!("RNTO {to}")) {
        Some(r) => reply::classify(&r) == ReplyClass::Success,
        None => false,
    }
}

/// Issue PWD (no path) or MKD (with path) and extract the pathname from
/// the 257 reply.
///
/// A `None` result does not always mean the operation failed: a
/// successful MKD whose reply cannot be parsed also yields no pathname.
pub fn directory<S: Socket>(control: &mut S, path: Option<&str>) -> Option<String> {
    let command = match path {
        Some(dir) => format!("MKD {dir}"),
        None => "PWD".to_string(),
    };

    let r = reply::exchange(control, &command)?;
    if !r.starts_with("257 ") {
        warn!("{command} failed: {r}");
        return None;
    }
    parser::parse_directory_reply(&r)
}

/// Issue PASV and extract the advertised data-connection endpoint.
pub fn pasv<S: Socket>(control: &mut S) -> Option<(String, String)> {
    let r = reply::exchange(control, "PASV")?;
    parser::parse_pasv_reply(&r)
}
