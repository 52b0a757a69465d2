//! Wire layout of the steering unit's CAN messages and the Linux input codes
//! they are translated into.
//!
//! Every byte offset and bit mask used by the decoder lives here so the
//! frame layout can be audited in one place.

/// Pedal message: brake and clutch switches
pub const PEDAL_FRAME_ID: u32 = 0x35B;

/// Steering message: wheel angle and angular speed
pub const STEERING_FRAME_ID: u32 = 0x3C3;

/// Classic CAN payload length
pub const PAYLOAD_LEN: usize = 8;

/// Mask for a 29-bit extended identifier
pub const CAN_EFF_MASK: u32 = 0x1FFF_FFFF;

/// Brake switch byte in a pedal frame
pub const BRAKE_BYTE: usize = 4;
/// Brake sets bits 0 and 1; either one counts as engaged
pub const BRAKE_MASK: u8 = 0b0000_0011;

/// Clutch switch byte in a pedal frame
pub const CLUTCH_BYTE: usize = 6;
/// Clutch sets bit 2
pub const CLUTCH_MASK: u8 = 0b0000_0100;

/// First byte of the little-endian i16 wheel angle in a steering frame
pub const WHEEL_ANGLE_BYTE: usize = 0;
/// Width of the wheel angle field in bytes
pub const WHEEL_ANGLE_LEN: usize = 2;
/// Angular speed (bytes 2-3) is present on the wire but never decoded
pub const WHEEL_SPEED_BYTE: usize = 2;

/// Lower bound of the reported wheel axis
pub const WHEEL_AXIS_MIN: i32 = -256;
/// Upper bound of the reported wheel axis
pub const WHEEL_AXIS_MAX: i32 = 255;

/// The Y axis only ever carries 0; the range exists for consumers that
/// insist on a two-axis joystick.
pub const DUMMY_AXIS_MIN: i32 = -1;
pub const DUMMY_AXIS_MAX: i32 = 1;

/// Linux input event types and codes (`linux/input-event-codes.h`)
pub mod codes {
    pub const EV_SYN: u16 = 0x00;
    pub const EV_KEY: u16 = 0x01;
    pub const EV_ABS: u16 = 0x03;

    pub const SYN_REPORT: u16 = 0x00;

    /// Brake pedal
    pub const BTN_TRIGGER: u16 = 0x120;
    /// Clutch pedal
    pub const BTN_THUMB: u16 = 0x121;

    /// Wheel position
    pub const ABS_X: u16 = 0x00;
    /// Constant zero
    pub const ABS_Y: u16 = 0x01;
}
