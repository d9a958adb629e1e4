//! Module `parser`
//!
//! Structured extraction from the two reply shapes the client cares
//! about beyond their code class: 227 (passive-mode endpoint) and
//! 257 (server pathname).

use regex::Regex;

/// Extract the data-connection endpoint from a 227 reply.
///
/// The endpoint is taken from the first six comma-separated decimal
/// groups anywhere in the reply body; parentheses are not required
/// (RFC 1123 section 4.1.2.6 forbids relying on them). The port is
/// group5 * 256 + group6, returned as a decimal string.
pub fn parse_pasv_reply(reply: &str) -> Option<(String, String)> {
    if !reply.starts_with("227 ") {
        return None;
    }

    let re = Regex::new(r"(\d+),(\d+),(\d+),(\d+),(\d+),(\d+)").unwrap();
    let groups = re.captures(reply)?;

    let host = format!("{}.{}.{}.{}", &groups[1], &groups[2], &groups[3], &groups[4]);
    let upper: u32 = groups[5].parse().ok()?;
    let lower: u32 = groups[6].parse().ok()?;
    let port = upper * 256 + lower;
    if port > u16::MAX as u32 {
        return None;
    }

    Some((host, port.to_string()))
}

/// Extract the quoted pathname from a 257 reply.
///
/// Matches the longest substring inside quotes, i.e. everything between
/// the first quote after `257 ` and the last quote on the line. That
/// tolerates embedded quotes in the pathname but can be misled by stray
/// quotes later in the message. Doubled-quote decoding is not applied.
pub fn parse_directory_reply(reply: &str) -> Option<String> {
    if !reply.starts_with("257 ") {
        return None;
    }

    let re = Regex::new(r#"257 "(.*)""#).unwrap();
    let groups = re.captures(reply)?;
    Some(groups[1].to_string())
}
