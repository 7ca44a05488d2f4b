//! Concurrent access to a shared device

use std::thread;

use critical_section as _;
use ledchar_core::{picture, LedState, SharedLedDevice};
use ledchar_hal::{Bank, Function, Pin, RamRegisters, RegisterBlock};

const WRITERS: usize = 8;
const WRITES_PER_THREAD: usize = 200;

/// Register block that records the bank of every word write
#[derive(Default)]
struct RecordingRegisters {
    regs: RamRegisters,
    log: Vec<Bank>,
}

impl RegisterBlock for RecordingRegisters {
    fn read_word(&self, bank: Bank, index: usize) -> u32 {
        self.regs.read_word(bank, index)
    }

    fn write_word(&mut self, bank: Bank, index: usize, value: u32) {
        self.log.push(bank);
        self.regs.write_word(bank, index, value);
    }
}

fn led_pin() -> Pin {
    Pin::new(18).unwrap()
}

#[test]
fn concurrent_writers_apply_commands_atomically() {
    let device = SharedLedDevice::new(RecordingRegisters::default(), led_pin());

    thread::scope(|s| {
        for t in 0..WRITERS {
            let device = &device;
            s.spawn(move || {
                for i in 0..WRITES_PER_THREAD {
                    let payload: &[u8] = if (t + i) % 2 == 0 { b"on\n" } else { b"off\n" };
                    assert_eq!(device.write(payload), Ok(payload.len()));
                }
            });
        }

        // Reader: logical state and pin level must agree whenever observed
        let device = &device;
        s.spawn(move || {
            for _ in 0..WRITES_PER_THREAD {
                device.inspect(|led, regs| {
                    assert_eq!(led.is_on(), regs.regs.level(led_pin()));
                });
                let mut buf = [0u8; 16];
                let len = device.read_at(&mut buf, 0).unwrap();
                assert!(&buf[..len] == picture::LIT || &buf[..len] == picture::DARK);
            }
        });
    });

    let (final_led, log, level, function) = device.inspect(|led, regs| {
        (
            led,
            regs.log.clone(),
            regs.regs.level(led_pin()),
            regs.regs.function(led_pin()),
        )
    });

    // Every command is a function-select write followed by its level write
    assert_eq!(log.len(), 2 * WRITERS * WRITES_PER_THREAD);
    for pair in log.chunks(2) {
        assert_eq!(pair[0], Bank::FunctionSelect);
        assert!(matches!(pair[1], Bank::Set | Bank::Clear));
    }

    // The last critical section decides the final state
    let last_on = log.last() == Some(&Bank::Set);
    assert_eq!(final_led, if last_on { LedState::On } else { LedState::Off });
    assert_eq!(level, last_on);
    assert_eq!(function, Function::Output);
}

#[test]
fn concurrent_sessions_are_counted() {
    let device = SharedLedDevice::new(RamRegisters::new(), led_pin());

    thread::scope(|s| {
        for _ in 0..WRITERS {
            let device = &device;
            s.spawn(move || {
                let mut session = device.open();
                session.write(b"on\n").unwrap();
                let mut buf = [0u8; 8];
                assert_eq!(session.read(&mut buf), Ok(8));
                assert_eq!(&buf, picture::LIT);
            });
        }
    });

    let diag = device.diagnostics();
    assert_eq!(diag.opened, WRITERS as u32);
    assert_eq!(diag.active, 0);
    assert_eq!(diag.led, LedState::On);
}
