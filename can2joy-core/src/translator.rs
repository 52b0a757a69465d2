//! Translation loop
//!
//! Pulls frames from a [`FrameSource`], drives them through decoder and
//! emitter, and writes the result to an [`EventSink`]. Each frame is handled
//! on its own; nothing is carried over between iterations except counters.

use crate::config::TranslatorConfig;
use crate::decoder::FrameDecoder;
use crate::emitter::{EmitOutcome, EventEmitter};
use crate::transport::{EventSink, FrameSource};
use crate::types::{BusFrame, DecodedMessage, Result, RunStats, TranslateError};
use std::sync::atomic::{AtomicBool, Ordering};

/// The translator - entry point for the decode → normalize → emit pipeline
pub struct Translator {
    decoder: FrameDecoder,
    emitter: EventEmitter,
    stats: RunStats,
}

impl Translator {
    /// Create a translator from a validated configuration
    pub fn new(config: &TranslatorConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            decoder: FrameDecoder::new(),
            emitter: EventEmitter::new(config.sync_policy),
            stats: RunStats::default(),
        })
    }

    /// Translate a single frame and write its events
    pub fn process_frame<S: EventSink + ?Sized>(
        &mut self,
        frame: &BusFrame,
        sink: &mut S,
    ) -> EmitOutcome {
        self.stats.frames_received += 1;

        let message = self.decoder.decode(frame);
        match &message {
            Some(decoded) => {
                log::trace!("Decoded {} frame 0x{:X}", decoded.kind(), frame.can_id);
                match decoded {
                    DecodedMessage::Pedals(state) => {
                        self.stats.pedal_frames += 1;
                        log::debug!("Pedals: brake={} clutch={}", state.brake, state.clutch);
                    }
                    DecodedMessage::Steering { .. } => self.stats.steering_frames += 1,
                }
            }
            None => {
                self.stats.ignored_frames += 1;
                log::trace!("Ignoring {} frame 0x{:X}", frame.kind, frame.can_id);
            }
        }

        let outcome = self.emitter.emit(message.as_ref(), sink);
        self.stats.events_written += u64::from(outcome.written);
        self.stats.writes_dropped += u64::from(outcome.dropped);
        outcome
    }

    /// Run until `shutdown` is set or the transport fails
    ///
    /// The flag is checked between reads, so the source should return
    /// `Ok(None)` periodically (a read timeout) for shutdown to be noticed
    /// on a quiet bus.
    ///
    /// # Returns
    /// * `Ok(RunStats)` - orderly shutdown
    /// * `Err(TranslateError::Transport)` - a read failed; nothing is retried
    pub fn run<Src, Snk>(
        &mut self,
        mut source: Src,
        mut sink: Snk,
        shutdown: &AtomicBool,
    ) -> Result<RunStats>
    where
        Src: FrameSource,
        Snk: EventSink,
    {
        log::info!(
            "Translation loop started (sync policy: {:?})",
            self.emitter.sync_policy()
        );

        while !shutdown.load(Ordering::Relaxed) {
            match source.recv_frame() {
                Ok(Some(frame)) => {
                    self.process_frame(&frame, &mut sink);
                }
                Ok(None) => continue,
                Err(e) => {
                    log::error!("Bus read failed after {} frames: {}", self.stats.frames_received, e);
                    return Err(TranslateError::Transport(e));
                }
            }
        }

        log::info!("Translation loop stopped: {}", self.stats);
        Ok(self.stats)
    }

    /// Counters accumulated so far
    pub fn stats(&self) -> &RunStats {
        &self.stats
    }
}
