//! Module `session`
//!
//! The client session: one exclusively-owned control socket, connected
//! once and reused for every command until QUIT. Data sockets are created
//! and destroyed per transfer by the transfer layer.
//!
//! All operations are strictly sequential; a failed operation leaves the
//! session usable unless the caller closes it.

use std::path::Path;

use log::{debug, error, info, warn};

use crate::client::Credentials;
use crate::io::{Socket, TcpSocket};
use crate::protocol::{fsm, reply};
use crate::storage;
use crate::transfer::{self, UploadMode};

/// Default control port for the "ftp" service.
const FTP_PORT: &str = "21";

/// FTP client over a persistent control channel.
#[derive(Debug, Default)]
pub struct FtpClient {
    control: TcpSocket,
}

impl FtpClient {
    /// A disconnected client. Call [`connect`](Self::connect) before
    /// issuing commands.
    pub fn new() -> Self {
        Self::default()
    }

    /// Connect the control socket to `host` on the standard FTP port and
    /// consume the server's welcome message.
    pub fn connect(&mut self, host: &str) -> bool {
        self.connect_with_port(host, FTP_PORT)
    }

    /// Connect to a server on a non-default control port.
    pub fn connect_with_port(&mut self, host: &str, port: &str) -> bool {
        if self.control.is_open() {
            warn!("Already connected to a server");
            return false;
        }

        if !self.control.connect(host, port) {
            return false;
        }

        // Servers always open with a reply; a silent peer is not a session.
        match reply::receive(&mut self.control) {
            Some(welcome) => {
                info!("Welcome message: {welcome}");
                true
            }
            None => {
                error!("No welcome message from {host}");
                self.control.close();
                false
            }
        }
    }

    /// Whether the control socket is currently open.
    pub fn is_connected(&self) -> bool {
        self.control.is_open()
    }

    /// Authenticate with the USER / PASS / ACCT sequence.
    pub fn login(&mut self, credentials: &Credentials) -> bool {
        fsm::login(&mut self.control, credentials)
    }

    pub fn noop(&mut self) -> bool {
        fsm::one_step(&mut self.control, "NOOP")
    }

    /// Send QUIT and close the control socket regardless of the server's
    /// answer. True iff the close itself succeeds.
    pub fn quit(&mut self) -> bool {
        if !fsm::one_step(&mut self.control, "QUIT") {
            warn!("Server did not acknowledge QUIT");
        }
        self.control.close()
    }

    /// Current working directory on the server.
    pub fn pwd(&mut self) -> Option<String> {
        fsm::directory(&mut self.control, None)
    }

    pub fn cwd(&mut self, dir: &str) -> bool {
        fsm::one_step(&mut self.control, &format!("CWD {dir}"))
    }

    /// Create a directory on the server. Returns the server's pathname for
    /// it when extractable; `None` does not necessarily mean the directory
    /// was not created.
    pub fn mkd(&mut self, dir: &str) -> Option<String> {
        fsm::directory(&mut self.control, Some(dir))
    }

    pub fn rmd(&mut self, dir: &str) -> bool {
        fsm::one_step(&mut self.control, &format!("RMD {dir}"))
    }

    pub fn dele(&mut self, file: &str) -> bool {
        fsm::one_step(&mut self.control, &format!("DELE {file}"))
    }

    pub fn rename(&mut self, from: &str, to: &str) -> bool {
        fsm::rename(&mut self.control, from, to)
    }

    /// Upload a local file to `server_dest`.
    pub fn stor(&mut self, local_src: &Path, server_dest: &str) -> bool {
        self.upload(UploadMode::Store, local_src, server_dest)
    }

    /// Upload a local file, appending to `server_dest` if it exists.
    pub fn appe(&mut self, local_src: &Path, server_dest: &str) -> bool {
        self.upload(UploadMode::Append, local_src, server_dest)
    }

    fn upload(&mut self, mode: UploadMode, local_src: &Path, server_dest: &str) -> bool {
        if let Err(e) = storage::check_upload_source(local_src) {
            error!("Upload rejected: {e}");
            return false;
        }
        if let Some(size) = storage::file_size(local_src) {
            debug!("Uploading {size} bytes from {}", local_src.display());
        }

        match transfer::upload(&mut self.control, mode, local_src, server_dest) {
            Ok(()) => true,
            Err(e) => {
                error!("Upload failed: {e}");
                false
            }
        }
    }

    /// Download `server_src` into a new local file at `local_dest`.
    pub fn retr(&mut self, server_src: &str, local_dest: &Path) -> bool {
        if let Err(e) = storage::check_download_destination(local_dest) {
            error!("Download rejected: {e}");
            return false;
        }

        match transfer::download(&mut self.control, server_src, local_dest) {
            Ok(()) => true,
            Err(e) => {
                error!("Download failed: {e}");
                false
            }
        }
    }

    /// Directory listing of `dir`, or of the current directory when `dir`
    /// is `None`. An empty listing is a valid result.
    pub fn list(&mut self, dir: Option<&str>) -> Option<String> {
        match transfer::download_listing(&mut self.control, dir) {
            Ok(listing) => Some(listing),
            Err(e) => {
                error!("Listing failed: {e}");
                None
            }
        }
    }
}
