//! Module `operations`
//!
//! Data-transfer command drivers. Each operation opens its own data
//! connection, issues the command through the two-step state machine and
//! releases the data socket before returning, success or failure.
//!
//! The ordering is fixed: preliminary reply, bytes on the data channel,
//! data channel close, completion reply on the control channel. Closing
//! the data channel is the termination signal, so the callbacks close the
//! data socket even when the transfer itself failed.

use std::path::Path;

use log::info;

use crate::error::TransferError;
use crate::io::Socket;
use crate::protocol::fsm;
use crate::transfer::data_channel::open_data_connection;

/// Server-side write disposition for uploads.
#[derive(Debug, Clone, Copy)]
pub enum UploadMode {
    Store,
    Append,
}

impl UploadMode {
    fn verb(&self) -> &'static str {
        match self {
            UploadMode::Store => "STOR",
            UploadMode::Append => "APPE",
        }
    }
}

/// Stream a local file to the server as `server_dest`.
pub fn upload<S: Socket>(
    control: &mut S,
    mode: UploadMode,
    local_src: &Path,
    server_dest: &str,
) -> Result<(), TransferError> {
    let mut data = open_data_connection(control)?;

    let command = format!("{} {server_dest}", mode.verb());
    let completed = fsm::two_step(control, &command, || {
        let streamed = data.send_file(local_src);
        data.close();
        streamed
    });
    data.close();

    if completed {
        info!("Uploaded {} as {server_dest}", local_src.display());
        Ok(())
    } else {
        Err(TransferError::CommandFailed(command))
    }
}

/// Retrieve `server_src` into a new local file at `local_dest`.
pub fn download<S: Socket>(
    control: &mut S,
    server_src: &str,
    local_dest: &Path,
) -> Result<(), TransferError> {
    let mut data = open_data_connection(control)?;

    let command = format!("RETR {server_src}");
    let completed = fsm::two_step(control, &command, || {
        let received = data.retrieve_file(local_dest);
        data.close();
        received
    });
    data.close();

    if completed && local_dest.exists() {
        info!("Retrieved {server_src} into {}", local_dest.display());
        Ok(())
    } else {
        Err(TransferError::CommandFailed(command))
    }
}

/// Retrieve a directory listing into memory. An empty listing is valid.
pub fn download_listing<S: Socket>(
    control: &mut S,
    dir: Option<&str>,
) -> Result<String, TransferError> {
    let mut data = open_data_connection(control)?;

    let command = match dir {
        Some(d) => format!("LIST {d}"),
        None => "LIST".to_string(),
    };
    let mut listing: Vec<u8> = Vec::new();
    let completed = fsm::two_step(control, &command, || {
        let received = data.retrieve_to_stream(&mut listing);
        data.close();
        received
    });
    data.close();

    if completed {
        Ok(String::from_utf8_lossy(&listing).into_owned())
    } else {
        Err(TransferError::CommandFailed(command))
    }
}
