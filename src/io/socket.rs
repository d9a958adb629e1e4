//! Module `socket`
//!
//! Blocking TCP socket adapter shared by the control and data channels.
//! The protocol layer depends only on the `Socket` trait, so the command
//! state machines can be exercised against scripted sockets in tests.

use log::{debug, error, warn};
use std::fs::File;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::path::Path;

/// Fixed chunk size for file streaming in both directions.
pub const CHUNK_SIZE: usize = 1024;

/// Byte-stream contract consumed by the protocol and transfer layers.
pub trait Socket {
    /// Connect to `host:port`. Returns false on resolution or connect failure.
    fn connect(&mut self, host: &str, port: &str) -> bool;

    fn is_open(&self) -> bool;

    /// Shut down and drop the connection. False if there was nothing open
    /// or the shutdown failed.
    fn close(&mut self) -> bool;

    /// Write `s` to the connection. A return value smaller than `s.len()`
    /// indicates a short write.
    fn send_string(&mut self, s: &str) -> usize;

    /// Read up to and including the first occurrence of `delim`, which is
    /// stripped from the returned buffer. No bytes past the delimiter are
    /// consumed. None on read error or connection close before `delim`.
    fn read_until(&mut self, delim: &str) -> Option<String>;

    /// Stream a local file's bytes to the connection in fixed-size chunks.
    fn send_file(&mut self, path: &Path) -> bool;

    /// Create `path` and write every byte read from the connection into it
    /// until the peer closes. Precondition: `path` does not exist.
    fn retrieve_file(&mut self, path: &Path) -> bool;

    /// Like `retrieve_file` but sinks into an in-memory writer.
    fn retrieve_to_stream(&mut self, sink: &mut dyn Write) -> bool;
}

/// `Socket` implementation over a blocking `std::net::TcpStream`.
#[derive(Debug, Default)]
pub struct TcpSocket {
    stream: Option<TcpStream>,
}

impl TcpSocket {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Socket for TcpSocket {
    fn connect(&mut self, host: &str, port: &str) -> bool {
        if self.stream.is_some() {
            warn!("Socket already connected, refusing to reconnect");
            return false;
        }

        let port: u16 = match port.parse() {
            Ok(p) => p,
            Err(_) => {
                error!("Invalid port: {port}");
                return false;
            }
        };

        let addrs = match (host, port).to_socket_addrs() {
            Ok(addrs) => addrs,
            Err(e) => {
                error!("Could not resolve host={host} port={port}: {e}");
                return false;
            }
        };

        for addr in addrs {
            match TcpStream::connect(addr) {
                Ok(stream) => {
                    debug!("Connected to {addr}");
                    self.stream = Some(stream);
                    return true;
                }
                Err(e) => warn!("Connection attempt to {addr} failed: {e}"),
            }
        }

        error!("Could not make connection: host={host} port={port}");
        false
    }

    fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    fn close(&mut self) -> bool {
        match self.stream.take() {
            Some(stream) => match stream.shutdown(Shutdown::Both) {
                Ok(()) => true,
                Err(e) => {
                    warn!("Socket shutdown failed: {e}");
                    false
                }
            },
            None => false,
        }
    }

    fn send_string(&mut self, s: &str) -> usize {
        let Some(stream) = self.stream.as_mut() else {
            error!("Cannot send on a closed socket");
            return 0;
        };

        let bytes = s.as_bytes();
        let mut written = 0;
        while written < bytes.len() {
            match stream.write(&bytes[written..]) {
                Ok(0) => break,
                Ok(n) => written += n,
                Err(e) => {
                    error!("Socket write failed: {e}");
                    break;
                }
            }
        }
        written
    }

    fn read_until(&mut self, delim: &str) -> Option<String> {
        let stream = self.stream.as_mut()?;

        // One byte at a time so nothing past the delimiter is consumed;
        // the next reader of this socket sees an untouched stream.
        let mut buf: Vec<u8> = Vec::new();
        let mut byte = [0u8; 1];
        loop {
            match stream.read(&mut byte) {
                Ok(0) => {
                    warn!("Connection closed before delimiter arrived");
                    return None;
                }
                Ok(_) => buf.push(byte[0]),
                Err(e) => {
                    error!("Socket read failed: {e}");
                    return None;
                }
            }

            if buf.ends_with(delim.as_bytes()) {
                buf.truncate(buf.len() - delim.len());
                return Some(String::from_utf8_lossy(&buf).into_owned());
            }
        }
    }

    fn send_file(&mut self, path: &Path) -> bool {
        let Some(stream) = self.stream.as_mut() else {
            error!("Cannot stream a file on a closed socket");
            return false;
        };

        let mut file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                error!("Could not open file {}: {e}", path.display());
                return false;
            }
        };

        debug!("Sending file {} in {CHUNK_SIZE}-byte chunks", path.display());

        let mut buf = [0u8; CHUNK_SIZE];
        loop {
            let n = match file.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) => {
                    error!("Read error on {}: {e}", path.display());
                    return false;
                }
            };

            if let Err(e) = stream.write_all(&buf[..n]) {
                error!("Write failure while streaming {}: {e}", path.display());
                return false;
            }
        }

        true
    }

    fn retrieve_file(&mut self, path: &Path) -> bool {
        if path.exists() {
            error!("Refusing to overwrite existing file: {}", path.display());
            return false;
        }

        let mut file = match File::create(path) {
            Ok(file) => file,
            Err(e) => {
                error!("Could not create file {}: {e}", path.display());
                return false;
            }
        };

        self.retrieve_to_stream(&mut file)
    }

    fn retrieve_to_stream(&mut self, sink: &mut dyn Write) -> bool {
        let Some(stream) = self.stream.as_mut() else {
            error!("Cannot retrieve on a closed socket");
            return false;
        };

        // The peer closing the connection is the end-of-transfer signal.
        let mut buf = [0u8; CHUNK_SIZE];
        loop {
            match stream.read(&mut buf) {
                Ok(0) => return true,
                Ok(n) => {
                    if let Err(e) = sink.write_all(&buf[..n]) {
                        error!("Write failure on local sink: {e}");
                        return false;
                    }
                }
                Err(e) => {
                    error!("Read failure on data connection: {e}");
                    return false;
                }
            }
        }
    }
}
