//! uinput virtual joystick
//!
//! The evdev crate appends its own SYN_REPORT to every `emit` call, so button
//! and axis events are held back until the translator's sync event arrives
//! and then written as one batch.

use can2joy_core::{DeviceProfile, EmitOutcome, EventClass, EventSink, InputEvent};
use evdev::uinput::{VirtualDevice, VirtualDeviceBuilder};
use evdev::{AbsInfo, AbsoluteAxisType, AttributeSet, BusType, EventType, InputId, Key, UinputAbsSetup};
use nix::fcntl::{fcntl, FcntlArg, OFlag};
use std::io;
use std::os::unix::io::{AsRawFd, RawFd};

/// Events waiting for the sync that closes their batch
#[derive(Debug, Default)]
struct PendingBatch {
    events: Vec<evdev::InputEvent>,
}

impl PendingBatch {
    /// Queue a button or axis event
    ///
    /// A sync event is not queued; it hands back everything queued since the
    /// previous sync and leaves the batch empty.
    fn push(&mut self, event: &InputEvent) -> Option<Vec<evdev::InputEvent>> {
        let event_type = match event.class {
            EventClass::Key => EventType::KEY,
            EventClass::Absolute => EventType::ABSOLUTE,
            EventClass::Sync => return Some(std::mem::take(&mut self.events)),
        };

        self.events
            .push(evdev::InputEvent::new(event_type, event.code, event.value));
        None
    }

    /// Queue `events` and pass each completed batch to `emit`
    ///
    /// A batch counts as its queued events plus the sync. When `emit` fails
    /// all of them are lost.
    fn write_with<F>(&mut self, events: &[InputEvent], mut emit: F) -> EmitOutcome
    where
        F: FnMut(&[evdev::InputEvent]) -> io::Result<()>,
    {
        let mut outcome = EmitOutcome::default();

        for event in events {
            let Some(batch) = self.push(event) else {
                continue;
            };

            let count = batch.len() as u32 + 1;
            match emit(&batch) {
                Ok(()) => outcome.written += count,
                Err(e) => {
                    log::warn!("Dropped batch of {} input events: {}", count, e);
                    outcome.dropped += count;
                }
            }
        }

        outcome
    }

    fn len(&self) -> usize {
        self.events.len()
    }
}

/// Virtual joystick backed by /dev/uinput
///
/// Writes never block: when the kernel cannot take a batch the write fails
/// and the batch is dropped. The kernel device is destroyed when this value
/// is dropped.
pub struct UinputSink {
    device: VirtualDevice,
    pending: PendingBatch,
}

impl UinputSink {
    /// Register and create the virtual device described by `profile`
    pub fn create(profile: &DeviceProfile) -> io::Result<Self> {
        let mut keys = AttributeSet::<Key>::new();
        for code in profile.buttons() {
            keys.insert(Key::new(code));
        }

        let id = InputId::new(BusType::BUS_USB, profile.vendor, profile.product, profile.version);
        let mut builder = VirtualDeviceBuilder::new()?
            .name(profile.name.as_str())
            .input_id(id)
            .with_keys(&keys)?;

        for axis in profile.axes() {
            let info = AbsInfo::new(0, axis.min, axis.max, 0, 0, 0);
            builder = builder.with_absolute_axis(&UinputAbsSetup::new(AbsoluteAxisType(axis.code), info))?;
        }

        let device = builder.build()?;
        set_nonblocking(device.as_raw_fd())?;
        log::info!(
            "Created virtual joystick '{}' ({:04x}:{:04x})",
            profile.name,
            profile.vendor,
            profile.product
        );

        Ok(Self {
            device,
            pending: PendingBatch::default(),
        })
    }
}

/// Switch a descriptor to O_NONBLOCK, keeping its other status flags
fn set_nonblocking(fd: RawFd) -> io::Result<()> {
    let flags = OFlag::from_bits_truncate(fcntl(fd, FcntlArg::F_GETFL)?);
    fcntl(fd, FcntlArg::F_SETFL(flags | OFlag::O_NONBLOCK))?;
    Ok(())
}

impl EventSink for UinputSink {
    fn write_event(&mut self, event: &InputEvent) -> io::Result<()> {
        match self.pending.push(event) {
            Some(batch) => self.device.emit(&batch),
            None => Ok(()),
        }
    }

    fn write_batch(&mut self, events: &[InputEvent]) -> EmitOutcome {
        let device = &mut self.device;
        self.pending.write_with(events, |batch| device.emit(batch))
    }
}

impl Drop for UinputSink {
    fn drop(&mut self) {
        if self.pending.len() > 0 {
            log::debug!("Discarding {} events without a sync", self.pending.len());
        }
        log::info!("Destroying virtual joystick");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use can2joy_core::protocol::codes;

    fn pedal_batch() -> [InputEvent; 3] {
        [
            InputEvent::button(codes::BTN_TRIGGER, true),
            InputEvent::button(codes::BTN_THUMB, false),
            InputEvent::sync(),
        ]
    }

    #[test]
    fn test_sync_flushes_queued_events() {
        let mut pending = PendingBatch::default();
        assert!(pending
            .push(&InputEvent::axis(codes::ABS_X, -256))
            .is_none());
        assert!(pending.push(&InputEvent::axis(codes::ABS_Y, 0)).is_none());
        assert_eq!(pending.len(), 2);

        let batch = pending.push(&InputEvent::sync()).unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].event_type(), EventType::ABSOLUTE);
        assert_eq!(batch[0].code(), codes::ABS_X);
        assert_eq!(batch[0].value(), -256);
        assert_eq!(batch[1].code(), codes::ABS_Y);
        assert_eq!(pending.len(), 0);
    }

    #[test]
    fn test_lone_sync_flushes_empty_batch() {
        let mut pending = PendingBatch::default();
        assert_eq!(pending.push(&InputEvent::sync()).map(|b| b.len()), Some(0));
    }

    #[test]
    fn test_batches_do_not_leak_into_each_other() {
        let mut pending = PendingBatch::default();
        let mut emitted = Vec::new();

        let batches = [pedal_batch(), pedal_batch()].concat();
        let outcome = pending.write_with(&batches, |batch| {
            emitted.push(batch.to_vec());
            Ok(())
        });

        assert_eq!(outcome, EmitOutcome { written: 6, dropped: 0 });
        assert_eq!(emitted.len(), 2);
        assert!(emitted.iter().all(|batch| batch.len() == 2));
        assert_eq!(emitted[0][0].event_type(), EventType::KEY);
        assert_eq!(emitted[0][0].code(), codes::BTN_TRIGGER);
        assert_eq!(emitted[0][0].value(), 1);
    }

    #[test]
    fn test_set_nonblocking() {
        let file = tempfile::tempfile().unwrap();
        let fd = file.as_raw_fd();
        let before = OFlag::from_bits_truncate(fcntl(fd, FcntlArg::F_GETFL).unwrap());
        assert!(!before.contains(OFlag::O_NONBLOCK));

        set_nonblocking(fd).unwrap();

        let after = OFlag::from_bits_truncate(fcntl(fd, FcntlArg::F_GETFL).unwrap());
        assert!(after.contains(OFlag::O_NONBLOCK));
        assert_eq!(after.contains(OFlag::O_RDWR), before.contains(OFlag::O_RDWR));
    }

    #[test]
    fn test_failed_emit_drops_whole_batch() {
        let mut pending = PendingBatch::default();
        let outcome = pending.write_with(&pedal_batch(), |_| {
            Err(io::Error::new(io::ErrorKind::WouldBlock, "uinput busy"))
        });

        assert_eq!(outcome, EmitOutcome { written: 0, dropped: 3 });
        assert_eq!(pending.len(), 0);
    }
}
