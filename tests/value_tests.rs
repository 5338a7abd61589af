extern crate sms12130b;

use embedded_hal::i2c::{ErrorKind, Operation};
use sms12130b::{Frame, Phase, RenderState, SMS12130BError, Sequencer, SMS12130B};

/// Records every write and fails the ones whose index is in `fail_at`, or all
/// writes from `fail_from` on.
#[derive(Default)]
struct MockI2c {
    writes: Vec<(u8, Vec<u8>)>,
    fail_at: Vec<usize>,
    fail_from: Option<usize>,
}

impl MockI2c {
    fn failing_at(indices: &[usize]) -> Self {
        Self {
            fail_at: indices.to_vec(),
            ..Default::default()
        }
    }

    fn failing_from(index: usize) -> Self {
        Self {
            fail_from: Some(index),
            ..Default::default()
        }
    }
}

impl embedded_hal::i2c::ErrorType for MockI2c {
    type Error = ErrorKind;
}

impl embedded_hal::i2c::I2c for MockI2c {
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        let index = self.writes.len();
        self.writes.push((address, data.to_vec()));
        if self.fail_at.contains(&index) || self.fail_from.is_some_and(|from| index >= from) {
            return Err(ErrorKind::Other);
        }
        Ok(())
    }

    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        for operation in operations {
            if let Operation::Write(data) = operation {
                self.write(address, data)?;
            }
        }
        Ok(())
    }
}

#[derive(Default)]
struct RecordingDelay {
    pauses_ms: Vec<u32>,
}

impl embedded_hal::delay::DelayNs for RecordingDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.pauses_ms.push(ms);
    }
}

fn frames(writes: &[(u8, Vec<u8>)]) -> Vec<[u8; 16]> {
    writes
        .chunks(16)
        .map(|chunk| {
            let mut data = [0; 16];
            for (i, (address, bytes)) in chunk.iter().enumerate() {
                assert_eq!(*address, 0x38);
                assert_eq!(bytes.len(), 3);
                assert_eq!(bytes[0], 0xE0);
                assert_eq!(bytes[1], (i * 2) as u8);
                data[i] = bytes[2];
            }
            data
        })
        .collect()
}

#[test]
fn startup_then_counting() {
    let mut sequencer = Sequencer::new(SMS12130B::new(MockI2c::default()));
    for _ in 0..(12 + 205) {
        assert!(sequencer.step().is_ok());
    }

    let writes = sequencer.release().destroy().writes;
    assert_eq!(writes[0], (0x38, vec![0xE0, 0x48]));
    assert_eq!(writes[1], (0x38, vec![0xE0, 0x70]));

    let frames = frames(&writes[2..]);
    assert_eq!(frames.len(), 1 + 9 + 1 + 205);
    assert_eq!(frames[0], [0xFF; 16]);
    for (index, frame) in frames[1..10].iter().enumerate() {
        assert_eq!(Frame::bar(index).unwrap().data(), frame);
    }
    assert_eq!(frames[10], [0x00; 16]);

    for (step, data) in frames[11..].iter().enumerate() {
        let frame = Frame::new(*data);
        assert_eq!(frame.speed_value(), Some((step % 200) as u16));
        assert_eq!(frame.battery_low(), step % 2 == 0);
    }
}

#[test]
fn failed_cell_does_not_halt_later_frames() {
    // first speed frame starts after reset (2) and 11 startup frames
    let first_render = 2 + 11 * 16;
    let mut sequencer = Sequencer::new(SMS12130B::new(MockI2c::failing_at(&[first_render + 5])));
    for _ in 0..12 {
        assert!(sequencer.step().is_ok());
    }

    assert!(matches!(sequencer.step(), Err(SMS12130BError::I2cError(ErrorKind::Other))));
    assert_eq!(
        sequencer.phase(),
        Phase::Rendering(RenderState {
            value: 1,
            battery_low: false
        })
    );
    assert_eq!(sequencer.step().ok(), Some(250));
    assert_eq!(sequencer.step().ok(), Some(250));

    let writes = sequencer.release().destroy().writes;
    // failed frame stopped after its sixth cell
    assert_eq!(writes.len(), first_render + 6 + 16 * 2);
    let frames = frames(&writes[first_render + 6..]);
    assert_eq!(Frame::new(frames[0]).speed_value(), Some(1));
    assert_eq!(Frame::new(frames[1]).speed_value(), Some(2));
}

#[test]
fn run_paces_steps_and_stops_when_unresponsive() {
    let first_render = 2 + 11 * 16;
    let i2c = MockI2c::failing_from(first_render + 2 * 16);
    let mut sequencer = Sequencer::new(SMS12130B::new(i2c));
    let mut delay = RecordingDelay::default();

    let result = sequencer.run(&mut delay);
    assert!(matches!(result, Err(SMS12130BError::Unresponsive(16))));

    let mut expected = vec![0, 1000];
    expected.extend([50; 8]);
    expected.extend([100, 50]);
    // two good renders, then fifteen failed ones before giving up
    expected.extend([250; 2 + 15]);
    assert_eq!(delay.pauses_ms, expected);
}

#[test]
fn display_speed_accepts_any_integer() {
    let mut display = SMS12130B::new(MockI2c::default());
    assert!(display.display_speed(255u64, true).is_ok());
    assert!(display.display_speed(1000u16, true).is_err());
    assert!(display.display_speed(-5i8, false).is_err());

    let writes = display.destroy().writes;
    assert_eq!(writes.len(), 16);
    assert_eq!(Frame::new(frames(&writes)[0]).speed_value(), Some(155));
}
