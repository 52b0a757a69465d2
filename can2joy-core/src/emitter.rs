//! Event emission
//!
//! Turns a decoded message into the ordered batch of input events for the
//! virtual device and writes it out. Every event of a batch is emitted on
//! every frame; there is no "only on change" filtering.

use crate::config::SyncPolicy;
use crate::normalizer::normalize_wheel_angle;
use crate::protocol::codes;
use crate::transport::EventSink;
use crate::types::{DecodedMessage, InputEvent};

/// What happened when a batch was written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitOutcome {
    /// Events the sink accepted
    pub written: u32,
    /// Events the sink rejected
    pub dropped: u32,
}

impl EmitOutcome {
    pub fn is_complete(&self) -> bool {
        self.dropped == 0
    }
}

/// Event emitter - sequences decoded values into input events
#[derive(Debug, Clone, Copy, Default)]
pub struct EventEmitter {
    sync_policy: SyncPolicy,
}

impl EventEmitter {
    pub fn new(sync_policy: SyncPolicy) -> Self {
        Self { sync_policy }
    }

    pub fn sync_policy(&self) -> SyncPolicy {
        self.sync_policy
    }

    /// Build the event batch for one frame
    ///
    /// `None` stands for a frame the decoder did not recognize.
    pub fn events_for(&self, message: Option<&DecodedMessage>) -> Vec<InputEvent> {
        let mut events = Vec::with_capacity(3);

        match message {
            Some(DecodedMessage::Pedals(state)) => {
                events.push(InputEvent::button(codes::BTN_TRIGGER, state.brake));
                events.push(InputEvent::button(codes::BTN_THUMB, state.clutch));
            }
            Some(DecodedMessage::Steering { raw_angle }) => {
                let position = normalize_wheel_angle(*raw_angle);
                log::debug!("Wheel position: {} (clamped: {})", raw_angle, position);

                events.push(InputEvent::axis(codes::ABS_X, position));
                events.push(InputEvent::axis(codes::ABS_Y, 0));
            }
            None => {}
        }

        if message.is_some() || self.sync_policy == SyncPolicy::Always {
            events.push(InputEvent::sync());
        }

        events
    }

    /// Build and write the batch for one frame
    ///
    /// Write failures never abort the batch. The next frame carries fresh
    /// state, so a lost event corrects itself.
    pub fn emit<S: EventSink + ?Sized>(
        &self,
        message: Option<&DecodedMessage>,
        sink: &mut S,
    ) -> EmitOutcome {
        let events = self.events_for(message);
        if events.is_empty() {
            return EmitOutcome::default();
        }
        sink.write_batch(&events)
    }
}
