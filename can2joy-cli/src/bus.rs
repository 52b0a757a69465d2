//! SocketCAN bus transport
//!
//! Requires the interface to be configured first:
//!   sudo ip link set can0 up type can bitrate 500000

use can2joy_core::{BusFrame, FrameKind, FrameSource};
use socketcan::{CanFrame, CanSocket, EmbeddedFrame, Frame, Socket};
use std::io;
use std::time::Duration;

/// Raw CAN socket bound to one interface
///
/// The socket is closed when this value is dropped.
pub struct SocketCanSource {
    socket: CanSocket,
    interface: String,
}

impl SocketCanSource {
    /// Open and bind a raw CAN socket on `interface`
    ///
    /// Reads block for at most `read_timeout` so the caller can notice a
    /// shutdown request on a quiet bus.
    pub fn open(interface: &str, read_timeout: Duration) -> io::Result<Self> {
        let socket = CanSocket::open(interface)?;
        socket.set_read_timeout(read_timeout)?;

        log::info!("Bound CAN socket to {}", interface);
        Ok(Self {
            socket,
            interface: interface.to_string(),
        })
    }

    pub fn interface(&self) -> &str {
        &self.interface
    }
}

impl FrameSource for SocketCanSource {
    fn recv_frame(&mut self) -> io::Result<Option<BusFrame>> {
        let frame = read_result(self.socket.read_frame())?;
        if let Some(frame) = &frame {
            if frame.kind != FrameKind::Data {
                log::trace!("Received {} frame on {}", frame.kind, self.interface);
            }
        }
        Ok(frame)
    }
}

/// Convert a socket frame into the translator's frame type
///
/// Remote and error frames are passed on too; the decoder rejects them, so
/// they behave like any other unrecognized frame.
pub fn to_bus_frame(frame: &CanFrame) -> BusFrame {
    let kind = match frame {
        CanFrame::Data(_) => FrameKind::Data,
        CanFrame::Remote(_) => FrameKind::Remote,
        CanFrame::Error(_) => FrameKind::Error,
    };

    BusFrame::from_payload(frame.raw_id(), frame.is_extended(), frame.data()).with_kind(kind)
}

/// Map the outcome of one socket read
///
/// A read timeout is not an error: it yields `Ok(None)` so the caller can
/// check for shutdown.
fn read_result(result: io::Result<CanFrame>) -> io::Result<Option<BusFrame>> {
    match result {
        Ok(frame) => Ok(Some(to_bus_frame(&frame))),
        Err(ref e)
            if e.kind() == io::ErrorKind::WouldBlock || e.kind() == io::ErrorKind::TimedOut =>
        {
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
