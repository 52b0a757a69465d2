//! Core types for the CAN-to-joystick translator
//!
//! This module defines the values that flow through the pipeline: the raw
//! bus frame, what the decoder extracts from it, and the input events handed
//! to the virtual device. None of them carry state from one frame to the next.

use crate::protocol::{codes, CAN_EFF_MASK, PAYLOAD_LEN};
use std::fmt;

/// Result type for translator operations
pub type Result<T> = std::result::Result<T, TranslateError>;

/// CAN frame types
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FrameKind {
    /// Regular data frame
    #[default]
    Data,
    /// Remote transmission request (RTR)
    Remote,
    /// Error frame reported by the controller
    Error,
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameKind::Data => write!(f, "data"),
            FrameKind::Remote => write!(f, "remote"),
            FrameKind::Error => write!(f, "error"),
        }
    }
}

/// Raw CAN frame as delivered by the bus transport
///
/// The payload is always 8 bytes; shorter frames are zero-padded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusFrame {
    /// CAN message ID (11-bit or 29-bit, without flag bits)
    pub can_id: u32,
    /// True if this is an extended (29-bit) CAN ID
    pub is_extended: bool,
    /// Data, remote or error frame
    pub kind: FrameKind,
    /// Frame data bytes
    pub data: [u8; PAYLOAD_LEN],
}

impl BusFrame {
    /// Create a standard-format data frame
    pub fn new(can_id: u32, data: [u8; PAYLOAD_LEN]) -> Self {
        Self {
            can_id,
            is_extended: false,
            kind: FrameKind::Data,
            data,
        }
    }

    /// Builder method: mark the frame as remote or error frame
    pub fn with_kind(mut self, kind: FrameKind) -> Self {
        self.kind = kind;
        self
    }

    /// Build a frame from a payload slice of any length
    ///
    /// Bytes beyond the eighth are discarded, missing bytes read as zero.
    pub fn from_payload(can_id: u32, is_extended: bool, payload: &[u8]) -> Self {
        let mut data = [0u8; PAYLOAD_LEN];
        let len = payload.len().min(PAYLOAD_LEN);
        data[..len].copy_from_slice(&payload[..len]);

        Self {
            can_id: can_id & CAN_EFF_MASK,
            is_extended,
            kind: FrameKind::Data,
            data,
        }
    }
}

/// Brake and clutch switch states from one pedal frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PedalState {
    pub brake: bool,
    pub clutch: bool,
}

/// A recognized message and its extracted raw fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodedMessage {
    /// Pedal frame
    Pedals(PedalState),
    /// Steering frame with the raw (not yet normalized) wheel angle
    Steering { raw_angle: i16 },
}

impl DecodedMessage {
    /// Short name used in log lines
    pub fn kind(&self) -> &'static str {
        match self {
            DecodedMessage::Pedals(_) => "pedals",
            DecodedMessage::Steering { .. } => "steering",
        }
    }
}

/// Input event classes understood by the virtual device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventClass {
    /// EV_SYN
    Sync,
    /// EV_KEY
    Key,
    /// EV_ABS
    Absolute,
}

impl EventClass {
    /// Numeric event type as used by the kernel
    pub fn raw(self) -> u16 {
        match self {
            EventClass::Sync => codes::EV_SYN,
            EventClass::Key => codes::EV_KEY,
            EventClass::Absolute => codes::EV_ABS,
        }
    }
}

impl fmt::Display for EventClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventClass::Sync => write!(f, "EV_SYN"),
            EventClass::Key => write!(f, "EV_KEY"),
            EventClass::Absolute => write!(f, "EV_ABS"),
        }
    }
}

/// One (class, code, value) triple written to the virtual device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub class: EventClass,
    pub code: u16,
    pub value: i32,
}

impl InputEvent {
    /// Button event: 1 if pressed, 0 if released
    pub fn button(code: u16, pressed: bool) -> Self {
        Self {
            class: EventClass::Key,
            code,
            value: i32::from(pressed),
        }
    }

    /// Absolute axis event
    pub fn axis(code: u16, value: i32) -> Self {
        Self {
            class: EventClass::Absolute,
            code,
            value,
        }
    }

    /// SYN_REPORT marking the end of a coherent batch
    pub fn sync() -> Self {
        Self {
            class: EventClass::Sync,
            code: codes::SYN_REPORT,
            value: 0,
        }
    }

    pub fn is_sync(&self) -> bool {
        self.class == EventClass::Sync
    }
}

impl fmt::Display for InputEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} 0x{:03X} = {}", self.class, self.code, self.value)
    }
}

/// Errors that can stop the translator
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("Bus transport read failed: {0}")]
    Transport(#[source] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Counters collected over one translator run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Frames pulled from the transport
    pub frames_received: u64,
    /// Frames decoded as pedal messages
    pub pedal_frames: u64,
    /// Frames decoded as steering messages
    pub steering_frames: u64,
    /// Frames the decoder did not recognize: unknown or extended IDs, remote
    /// and error frames
    pub ignored_frames: u64,
    /// Events the sink accepted
    pub events_written: u64,
    /// Events that never reached the device. A sink that writes in batches
    /// counts every event of a failed batch, sync included.
    pub writes_dropped: u64,
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} frames ({} pedals, {} steering, {} ignored), {} events written, {} dropped",
            self.frames_received,
            self.pedal_frames,
            self.steering_frames,
            self.ignored_frames,
            self.events_written,
            self.writes_dropped
        )
    }
}
