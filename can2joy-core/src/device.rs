//! Virtual joystick description
//!
//! Identity and capability table for the virtual device. The application
//! layer turns this into a real uinput device; keeping it here lets the
//! capability set be checked against what the emitter produces.

use crate::protocol::{codes, DUMMY_AXIS_MAX, DUMMY_AXIS_MIN, WHEEL_AXIS_MAX, WHEEL_AXIS_MIN};
use crate::types::{Result, TranslateError};
use serde::{Deserialize, Serialize};

/// Longest name the kernel accepts (UINPUT_MAX_NAME_SIZE, including NUL)
pub const MAX_NAME_LEN: usize = 79;

/// Absolute axis capability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisRange {
    pub code: u16,
    pub min: i32,
    pub max: i32,
}

impl AxisRange {
    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Identity of the virtual joystick
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeviceProfile {
    /// Device name shown to applications
    #[serde(default = "default_name")]
    pub name: String,
    /// USB vendor ID
    #[serde(default = "default_vendor")]
    pub vendor: u16,
    /// USB product ID
    #[serde(default = "default_product")]
    pub product: u16,
    /// Device version
    #[serde(default = "default_version")]
    pub version: u16,
}

fn default_name() -> String {
    "can2joy".to_string()
}

fn default_vendor() -> u16 {
    0x1234
}

fn default_product() -> u16 {
    0xfedc
}

fn default_version() -> u16 {
    1
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self {
            name: default_name(),
            vendor: default_vendor(),
            product: default_product(),
            version: default_version(),
        }
    }
}

impl DeviceProfile {
    /// Button codes the device declares: brake, clutch
    pub fn buttons(&self) -> [u16; 2] {
        [codes::BTN_TRIGGER, codes::BTN_THUMB]
    }

    /// Absolute axes the device declares: wheel (X) and the constant Y axis
    pub fn axes(&self) -> [AxisRange; 2] {
        [
            AxisRange {
                code: codes::ABS_X,
                min: WHEEL_AXIS_MIN,
                max: WHEEL_AXIS_MAX,
            },
            AxisRange {
                code: codes::ABS_Y,
                min: DUMMY_AXIS_MIN,
                max: DUMMY_AXIS_MAX,
            },
        ]
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(TranslateError::Config("device name must not be empty".to_string()));
        }
        if self.name.len() > MAX_NAME_LEN {
            return Err(TranslateError::Config(format!(
                "device name is {} bytes, the limit is {}",
                self.name.len(),
                MAX_NAME_LEN
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_identity() {
        let profile = DeviceProfile::default();
        assert_eq!(profile.name, "can2joy");
        assert_eq!(profile.vendor, 0x1234);
        assert_eq!(profile.product, 0xfedc);
        assert_eq!(profile.version, 1);
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_axis_ranges_are_ordered() {
        for axis in DeviceProfile::default().axes() {
            assert!(axis.min < axis.max, "axis 0x{:02X}", axis.code);
            assert!(axis.contains(0));
        }
    }

    #[test]
    fn test_name_validation() {
        let mut profile = DeviceProfile::default();
        profile.name = String::new();
        assert!(profile.validate().is_err());

        profile.name = "x".repeat(MAX_NAME_LEN + 1);
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_partial_deserialization() {
        let profile: DeviceProfile = toml::from_str(r#"name = "Wheel""#).unwrap();
        assert_eq!(profile.name, "Wheel");
        assert_eq!(profile.vendor, 0x1234);
    }
}
