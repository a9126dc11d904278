//! Shared fakes for host tests
//!
//! Each fake is a cheap handle around shared state so a test can keep a
//! clone for inspection after moving the fake itself into a [`Figure`].
//!
//! [`Figure`]: crate::Figure

use core::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::string::{String, ToString};
use std::vec::Vec;

use buddy_protocol::{DecodeError, Packet};
use embedded_hal_async::delay::DelayNs;
use rand_core::RngCore;

use crate::traits::{
    AudioError, BleLink, LinkError, Servo, ServoError, Speaker, TouchError, TouchPad,
};

#[derive(Default)]
struct ServoLog {
    angles: Vec<u8>,
    fail_after: Option<usize>,
}

/// Servo that records every commanded angle
#[derive(Clone, Default)]
pub struct FakeServo(Rc<RefCell<ServoLog>>);

impl FakeServo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn angles(&self) -> Vec<u8> {
        self.0.borrow().angles.clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().angles.clear();
    }

    /// Accept `n` more commands, then fail with [`ServoError::Pwm`]
    pub fn fail_after(&self, n: usize) {
        let mut log = self.0.borrow_mut();
        log.fail_after = Some(log.angles.len() + n);
    }
}

impl Servo for FakeServo {
    fn set_angle(&mut self, angle: u8) -> Result<(), ServoError> {
        let mut log = self.0.borrow_mut();
        if log.fail_after.is_some_and(|n| log.angles.len() >= n) {
            return Err(ServoError::Pwm);
        }
        log.angles.push(angle);
        Ok(())
    }
}

/// Wave angles commanded by one playback on the default profile
///
/// 0..=48 up, `sweeps` times 50..=134 up and 135..=51 down, 49..=1 down,
/// then a settle at 0.
pub fn wave_trace(sweeps: usize) -> Vec<u8> {
    let mut trace: Vec<u8> = (0..50).step_by(3).collect();
    for _ in 0..sweeps {
        trace.extend((50..135).step_by(3));
        trace.extend((51..=135).rev().step_by(3));
    }
    trace.extend((1..=49).rev().step_by(3));
    trace.push(0);
    trace
}

#[derive(Default)]
struct SpeakerLog {
    opened: Vec<String>,
    started: Vec<String>,
    missing: Vec<String>,
    stops: usize,
    play_polls: usize,
    remaining: usize,
    fail_start: bool,
    active: bool,
}

/// Speaker that reports playing for a fixed number of polls per clip
#[derive(Clone, Default)]
pub struct FakeSpeaker(Rc<RefCell<SpeakerLog>>);

impl FakeSpeaker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report playing for `polls` calls of `is_playing` after each start
    pub fn play_for(&self, polls: usize) {
        self.0.borrow_mut().play_polls = polls;
    }

    /// Make opening `name` fail
    pub fn remove(&self, name: &str) {
        self.0.borrow_mut().missing.push(name.to_string());
    }

    pub fn fail_start(&self) {
        self.0.borrow_mut().fail_start = true;
    }

    pub fn opened(&self) -> Vec<String> {
        self.0.borrow().opened.clone()
    }

    pub fn started(&self) -> Vec<String> {
        self.0.borrow().started.clone()
    }

    pub fn stops(&self) -> usize {
        self.0.borrow().stops
    }

    /// Returns true between a successful start and the next stop
    pub fn is_active(&self) -> bool {
        self.0.borrow().active
    }
}

impl Speaker for FakeSpeaker {
    type Clip = String;

    fn open(&mut self, name: &str) -> Result<String, AudioError> {
        let mut log = self.0.borrow_mut();
        if log.missing.iter().any(|m| m == name) {
            return Err(AudioError::ClipNotFound);
        }
        log.opened.push(name.to_string());
        Ok(name.to_string())
    }

    fn start(&mut self, clip: String) -> Result<(), AudioError> {
        let mut log = self.0.borrow_mut();
        if log.fail_start {
            return Err(AudioError::Busy);
        }
        log.started.push(clip);
        log.remaining = log.play_polls;
        log.active = true;
        Ok(())
    }

    fn is_playing(&mut self) -> bool {
        let mut log = self.0.borrow_mut();
        if log.remaining > 0 {
            log.remaining -= 1;
            true
        } else {
            false
        }
    }

    fn stop(&mut self) {
        let mut log = self.0.borrow_mut();
        log.stops += 1;
        log.remaining = 0;
        log.active = false;
    }
}

struct PadState {
    raw: u16,
    threshold: u16,
    reads: usize,
    fail: bool,
}

/// Touch pad with a settable raw reading
#[derive(Clone)]
pub struct FakePad(Rc<RefCell<PadState>>);

impl FakePad {
    pub fn new(threshold: u16) -> Self {
        Self(Rc::new(RefCell::new(PadState {
            raw: 0,
            threshold,
            reads: 0,
            fail: false,
        })))
    }

    pub fn touch(&self) {
        self.set_raw(u16::MAX);
    }

    pub fn release(&self) {
        self.set_raw(0);
    }

    pub fn set_raw(&self, raw: u16) {
        self.0.borrow_mut().raw = raw;
    }

    pub fn preset_threshold(&self, threshold: u16) {
        self.0.borrow_mut().threshold = threshold;
    }

    pub fn fail(&self) {
        self.0.borrow_mut().fail = true;
    }

    pub fn reads(&self) -> usize {
        self.0.borrow().reads
    }
}

impl TouchPad for FakePad {
    fn is_touched(&mut self) -> Result<bool, TouchError> {
        let mut pad = self.0.borrow_mut();
        if pad.fail {
            return Err(TouchError::Timeout);
        }
        pad.reads += 1;
        Ok(pad.raw > pad.threshold)
    }

    fn threshold(&self) -> u16 {
        self.0.borrow().threshold
    }

    fn set_threshold(&mut self, threshold: u16) {
        self.0.borrow_mut().threshold = threshold;
    }
}

#[derive(Default)]
struct LinkLog {
    connected: bool,
    advertising: bool,
    advertising_starts: usize,
    packets: VecDeque<Result<Packet, DecodeError>>,
    polls: usize,
}

/// BLE link with a scripted packet queue
#[derive(Clone, Default)]
pub struct FakeLink(Rc<RefCell<LinkLog>>);

impl FakeLink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_connected(&self, connected: bool) {
        self.0.borrow_mut().connected = connected;
    }

    pub fn push_packet(&self, packet: Result<Packet, DecodeError>) {
        self.0.borrow_mut().packets.push_back(packet);
    }

    pub fn is_advertising(&self) -> bool {
        self.0.borrow().advertising
    }

    pub fn advertising_starts(&self) -> usize {
        self.0.borrow().advertising_starts
    }

    /// Number of `poll_packet` calls so far
    pub fn polls(&self) -> usize {
        self.0.borrow().polls
    }
}

impl BleLink for FakeLink {
    fn start_advertising(&mut self) -> Result<(), LinkError> {
        let mut log = self.0.borrow_mut();
        log.advertising = true;
        log.advertising_starts += 1;
        Ok(())
    }

    fn stop_advertising(&mut self) -> Result<(), LinkError> {
        self.0.borrow_mut().advertising = false;
        Ok(())
    }

    fn is_connected(&mut self) -> bool {
        self.0.borrow().connected
    }

    fn poll_packet(&mut self) -> Result<Option<Packet>, DecodeError> {
        let mut log = self.0.borrow_mut();
        log.polls += 1;
        log.packets.pop_front().transpose()
    }
}

/// RNG that always returns the same value
pub struct FixedRng(pub u32);

impl RngCore for FixedRng {
    fn next_u32(&mut self) -> u32 {
        self.0
    }

    fn next_u64(&mut self) -> u64 {
        self.0 as u64
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        rand_core::impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// RNG that plays back a sequence, repeating the last value
pub struct SeqRng {
    values: Vec<u32>,
    next: usize,
}

impl SeqRng {
    pub fn new(values: &[u32]) -> Self {
        Self {
            values: values.to_vec(),
            next: 0,
        }
    }
}

impl RngCore for SeqRng {
    fn next_u32(&mut self) -> u32 {
        let index = self.next.min(self.values.len().saturating_sub(1));
        self.next += 1;
        self.values.get(index).copied().unwrap_or(0)
    }

    fn next_u64(&mut self) -> u64 {
        self.next_u32() as u64
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        rand_core::impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Delay that returns immediately and accumulates the requested time
#[derive(Clone, Default)]
pub struct FakeDelay(Rc<Cell<u64>>);

impl FakeDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_ms(&self) -> u64 {
        self.0.get() / 1_000_000
    }
}

impl DelayNs for FakeDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.0.set(self.0.get() + ns as u64);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.0.set(self.0.get() + ms as u64 * 1_000_000);
    }
}
