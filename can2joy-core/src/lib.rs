//! can2joy core library
//!
//! Translates CAN frames from a steering-wheel-and-pedals unit into joystick
//! input events.
//!
//! # Architecture
//!
//! The pipeline runs once per received frame:
//! - [`FrameDecoder`] recognizes the pedal (0x35B) and steering (0x3C3) frames
//! - [`normalize_wheel_angle`] clamps the wheel angle to [-256, 255]
//! - [`EventEmitter`] produces button/axis events followed by a sync
//! - [`Translator`] pulls frames from a [`FrameSource`] and writes to an
//!   [`EventSink`] until told to stop
//!
//! The library does NOT open sockets or create input devices. The SocketCAN
//! transport and the uinput device are in the application layer (can2joy-cli).
//!
//! # Example Usage
//!
//! ```
//! use can2joy_core::{BusFrame, InputEvent, Translator, TranslatorConfig};
//!
//! let mut translator = Translator::new(&TranslatorConfig::new()).unwrap();
//! let mut events: Vec<InputEvent> = Vec::new();
//!
//! // Steering frame, raw angle 500
//! let frame = BusFrame::new(0x3C3, [0xF4, 0x01, 0, 0, 0, 0, 0, 0]);
//! translator.process_frame(&frame, &mut events);
//!
//! assert_eq!(events[0].value, 255);
//! assert!(events[2].is_sync());
//! ```

// Public modules
pub mod config;
pub mod decoder;
pub mod device;
pub mod emitter;
pub mod normalizer;
pub mod protocol;
pub mod transport;
pub mod translator;
pub mod types;

// Re-export main types for convenience
pub use config::{SyncPolicy, TranslatorConfig};
pub use decoder::FrameDecoder;
pub use device::{AxisRange, DeviceProfile};
pub use emitter::{EmitOutcome, EventEmitter};
pub use normalizer::normalize_wheel_angle;
pub use transport::{EventSink, FrameSource};
pub use translator::Translator;
pub use types::{
    BusFrame, DecodedMessage, EventClass, FrameKind, InputEvent, PedalState, Result, RunStats,
    TranslateError,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
