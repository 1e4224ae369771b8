//! Recording pins and delay for host tests.
//!
//! Every pin write and delay lands in a shared [`Trace`], which can decode the
//! recorded CLK/DIO waveform back into the byte frames a controller would see.
extern crate std;

use std::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::digital::ErrorKind;
use embedded_hal::digital::ErrorType;
use embedded_hal::digital::OutputPin;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Clk(bool),
    Dio(bool),
    DelayNs(u32),
    DelayUs(u32),
    DelayMs(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinError;

impl embedded_hal::digital::Error for PinError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

#[derive(Default)]
struct State {
    events: Vec<Event>,
    writes: usize,
    fail_after: Option<usize>,
}

#[derive(Clone, Default)]
pub struct Trace(Rc<RefCell<State>>);

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock pin, data pin and delay all recording into this trace.
    pub fn parts(&self) -> (Pin, Pin, Delay) {
        (
            Pin {
                trace: self.clone(),
                line: Line::Clk,
            },
            Pin {
                trace: self.clone(),
                line: Line::Dio,
            },
            Delay {
                trace: self.clone(),
            },
        )
    }

    /// Let `writes` more pin writes succeed, then fail every one after.
    pub fn fail_after(&self, writes: usize) {
        let mut state = self.0.borrow_mut();
        state.fail_after = Some(state.writes + writes);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().events.clone()
    }

    /// Return and forget the events recorded so far.
    pub fn take(&self) -> Vec<Event> {
        core::mem::take(&mut self.0.borrow_mut().events)
    }

    pub fn pin_writes(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, Event::Clk(_) | Event::Dio(_)))
            .count()
    }

    pub fn delays_ms(&self) -> Vec<u32> {
        self.events()
            .iter()
            .filter_map(|e| match e {
                Event::DelayMs(ms) => Some(*ms),
                _ => None,
            })
            .collect()
    }

    /// Decode the waveform into frames. A frame opens on a DIO falling edge
    /// with CLK high and closes on a DIO rising edge with CLK high; bits are
    /// sampled on CLK rising edges and trailing partial bytes are dropped.
    pub fn frames(&self) -> Vec<Vec<u8>> {
        let mut frames = Vec::new();
        let mut clk = true;
        let mut dio = true;
        let mut bits: Option<Vec<bool>> = None;
        for event in self.events() {
            match event {
                Event::Clk(level) => {
                    if level && !clk {
                        if let Some(bits) = bits.as_mut() {
                            bits.push(dio);
                        }
                    }
                    clk = level;
                }
                Event::Dio(level) => {
                    if clk && dio && !level {
                        bits = Some(Vec::new());
                    } else if clk && !dio && level {
                        if let Some(done) = bits.take() {
                            frames.push(
                                done.chunks_exact(8)
                                    .map(|byte| byte.iter().fold(0u8, |acc, &b| (acc << 1) | b as u8))
                                    .collect(),
                            );
                        }
                    }
                    dio = level;
                }
                _ => {}
            }
        }
        frames
    }

    fn push(&self, event: Event) {
        self.0.borrow_mut().events.push(event);
    }

    fn write(&self, event: Event) -> Result<(), PinError> {
        let mut state = self.0.borrow_mut();
        if state.fail_after.is_some_and(|limit| state.writes >= limit) {
            return Err(PinError);
        }
        state.writes += 1;
        state.events.push(event);
        Ok(())
    }
}

#[derive(Clone, Copy)]
enum Line {
    Clk,
    Dio,
}

pub struct Pin {
    trace: Trace,
    line: Line,
}

impl Pin {
    fn set(&mut self, level: bool) -> Result<(), PinError> {
        let event = match self.line {
            Line::Clk => Event::Clk(level),
            Line::Dio => Event::Dio(level),
        };
        self.trace.write(event)
    }
}

impl ErrorType for Pin {
    type Error = PinError;
}

impl OutputPin for Pin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set(true)
    }
}

pub struct Delay {
    trace: Trace,
}

impl embedded_hal::delay::DelayNs for Delay {
    fn delay_ns(&mut self, ns: u32) {
        self.trace.push(Event::DelayNs(ns));
    }

    fn delay_us(&mut self, us: u32) {
        self.trace.push(Event::DelayUs(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.trace.push(Event::DelayMs(ms));
    }
}

/// Frame pacer for async tests; records into the same trace.
pub struct AsyncDelay {
    trace: Trace,
}

impl AsyncDelay {
    pub fn new(trace: &Trace) -> Self {
        Self {
            trace: trace.clone(),
        }
    }
}

impl embedded_hal_async::delay::DelayNs for AsyncDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.trace.push(Event::DelayNs(ns));
    }

    async fn delay_us(&mut self, us: u32) {
        self.trace.push(Event::DelayUs(us));
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.trace.push(Event::DelayMs(ms));
    }
}
