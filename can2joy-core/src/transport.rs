//! Seams between the translator and the outside world
//!
//! The bus socket and the virtual device live in the application layer; the
//! translator only sees these two traits.

use crate::emitter::EmitOutcome;
use crate::types::{BusFrame, InputEvent};
use std::io;

/// Source of bus frames
pub trait FrameSource {
    /// Receive the next frame
    ///
    /// # Returns
    /// * `Ok(Some(frame))` - a frame to translate
    /// * `Ok(None)` - nothing to translate this time (read timeout, or a
    ///   frame the transport filtered out)
    /// * `Err(_)` - the transport is broken; the translator stops
    fn recv_frame(&mut self) -> io::Result<Option<BusFrame>>;
}

/// Destination for input events
pub trait EventSink {
    /// Write one event. Events arrive in order, each batch ending with a sync.
    fn write_event(&mut self, event: &InputEvent) -> io::Result<()>;

    /// Write the batch for one frame
    ///
    /// The default writes event by event; a rejected write is logged and
    /// counted and the rest of the batch is still attempted. Sinks that
    /// deliver a batch in one operation override this so a failure counts
    /// every event it lost.
    fn write_batch(&mut self, events: &[InputEvent]) -> EmitOutcome {
        let mut outcome = EmitOutcome::default();

        for event in events {
            match self.write_event(event) {
                Ok(()) => outcome.written += 1,
                Err(e) => {
                    log::warn!("Dropped input event {}: {}", event, e);
                    outcome.dropped += 1;
                }
            }
        }

        outcome
    }
}

impl<S: FrameSource + ?Sized> FrameSource for &mut S {
    fn recv_frame(&mut self) -> io::Result<Option<BusFrame>> {
        (**self).recv_frame()
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn write_event(&mut self, event: &InputEvent) -> io::Result<()> {
        (**self).write_event(event)
    }

    fn write_batch(&mut self, events: &[InputEvent]) -> EmitOutcome {
        (**self).write_batch(events)
    }
}

/// Collects events in memory
impl EventSink for Vec<InputEvent> {
    fn write_event(&mut self, event: &InputEvent) -> io::Result<()> {
        self.push(*event);
        Ok(())
    }
}
