//! Module `data_channel`
//!
//! Passive-mode data connection bringup. Each transfer command gets a
//! fresh data socket, negotiated on the control channel and connected to
//! the endpoint the server advertises.

use log::{debug, info};

use crate::error::TransferError;
use crate::io::{Socket, TcpSocket};
use crate::protocol::fsm;

/// Negotiate TYPE I, request passive mode and connect a fresh data socket
/// to the advertised endpoint.
///
/// TYPE I is always sent before PASV; only unstructured binary transfer
/// is supported.
pub fn open_data_connection<S: Socket>(control: &mut S) -> Result<TcpSocket, TransferError> {
    if !fsm::one_step(control, "TYPE I") {
        return Err(TransferError::TypeNegotiationFailed);
    }

    let (host, port) = fsm::pasv(control).ok_or(TransferError::PassiveModeFailed)?;
    debug!("Server listening for data connection on {host}:{port}");

    let mut data = TcpSocket::new();
    if !data.connect(&host, &port) {
        return Err(TransferError::DataConnectFailed { host, port });
    }

    info!("Data connection established to {host}:{port}");
    Ok(data)
}
