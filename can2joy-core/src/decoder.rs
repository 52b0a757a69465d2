//! Frame decoding
//!
//! Recognizes the two message identifiers sent by the steering unit and
//! extracts their raw fields. No I/O, no state.

use crate::protocol::{
    BRAKE_BYTE, BRAKE_MASK, CLUTCH_BYTE, CLUTCH_MASK, PAYLOAD_LEN, PEDAL_FRAME_ID,
    STEERING_FRAME_ID, WHEEL_ANGLE_BYTE, WHEEL_ANGLE_LEN,
};
use crate::types::{BusFrame, DecodedMessage, FrameKind, PedalState};
use byteorder::{ByteOrder, LittleEndian};

/// Frame decoder - maps a bus frame to a recognized message
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameDecoder;

impl FrameDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Decode a bus frame
    ///
    /// # Returns
    /// * `Some(DecodedMessage)` for a pedal or steering frame
    /// * `None` for any other identifier, for extended-format frames, and for
    ///   remote and error frames
    pub fn decode(&self, frame: &BusFrame) -> Option<DecodedMessage> {
        if frame.is_extended || frame.kind != FrameKind::Data {
            return None;
        }

        match frame.can_id {
            PEDAL_FRAME_ID => Some(DecodedMessage::Pedals(Self::decode_pedals(&frame.data))),
            STEERING_FRAME_ID => Some(DecodedMessage::Steering {
                raw_angle: Self::decode_wheel_angle(&frame.data),
            }),
            _ => None,
        }
    }

    /// Extract brake and clutch switches from a pedal payload
    ///
    /// Only one bit per pedal is read, so there is no analog pedal travel.
    pub fn decode_pedals(data: &[u8; PAYLOAD_LEN]) -> PedalState {
        PedalState {
            brake: data[BRAKE_BYTE] & BRAKE_MASK != 0,
            clutch: data[CLUTCH_BYTE] & CLUTCH_MASK != 0,
        }
    }

    /// Extract the signed wheel angle from a steering payload
    pub fn decode_wheel_angle(data: &[u8; PAYLOAD_LEN]) -> i16 {
        LittleEndian::read_i16(&data[WHEEL_ANGLE_BYTE..WHEEL_ANGLE_BYTE + WHEEL_ANGLE_LEN])
    }
}
