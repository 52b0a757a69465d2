//! Wheel angle normalization
//!
//! Clamps the wheel position to a narrow window around center so that a game
//! cannot command full-lock turns on a parked car's steering.
//!
//! The sensor's negative half is laid out backwards: the first reading left
//! of center is -32768, and -1 is as far left as it goes. Negative readings
//! are therefore shifted by 32768 and negated before clamping, which gives an
//! axis that is monotonic through zero in both directions.

use crate::protocol::{WHEEL_AXIS_MAX, WHEEL_AXIS_MIN};

/// Offset between the sensor's negative encoding and the axis value
const NEGATIVE_ORIGIN: i32 = 32768;

/// Map a raw wheel angle to the reported X axis value in [-256, 255]
pub fn normalize_wheel_angle(raw: i16) -> i32 {
    let raw = i32::from(raw);

    if raw >= 0 {
        raw.min(WHEEL_AXIS_MAX)
    } else {
        let shifted = 0 - (raw + NEGATIVE_ORIGIN);
        shifted.max(WHEEL_AXIS_MIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_points() {
        assert_eq!(normalize_wheel_angle(0), 0);
        assert_eq!(normalize_wheel_angle(-32768), 0);
        assert_eq!(normalize_wheel_angle(-1), -256);
        assert_eq!(normalize_wheel_angle(32767), 255);
    }

    #[test]
    fn test_small_positive_passes_through() {
        for raw in 0..=255i16 {
            assert_eq!(normalize_wheel_angle(raw), i32::from(raw));
        }
    }

    #[test]
    fn test_large_positive_clamps() {
        for raw in 256..=i16::MAX {
            assert_eq!(normalize_wheel_angle(raw), 255);
        }
    }

    #[test]
    fn test_negative_half() {
        for raw in i16::MIN..=-1 {
            let expected = (-(i32::from(raw) + 32768)).max(-256);
            assert_eq!(normalize_wheel_angle(raw), expected, "raw = {}", raw);
        }

        assert_eq!(normalize_wheel_angle(-32767), -1);
        assert_eq!(normalize_wheel_angle(-32512), -256);
        assert_eq!(normalize_wheel_angle(-32513), -255);
    }

    #[test]
    fn test_output_always_in_range() {
        for raw in i16::MIN..=i16::MAX {
            let value = normalize_wheel_angle(raw);
            assert!((WHEEL_AXIS_MIN..=WHEEL_AXIS_MAX).contains(&value), "raw = {}", raw);
        }
    }
}
