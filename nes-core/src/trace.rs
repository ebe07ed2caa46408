use std::collections::VecDeque;
use std::fmt;

use crate::opcodes::Mode;

/// Everything a debugger could want to know about a single `step()`: the
/// instruction decoded, its raw bytes, and the register file immediately
/// after it ran. Produced by `Cpu6502::tick`, fully external to execution.
#[derive(Debug, Clone)]
pub struct TraceEvent {
    pub pc: u16,
    pub opcode: u8,
    pub operands: Vec<u8>,
    pub mnemonic: &'static str,
    pub mode: Mode,
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub s: u8,
    pub p: u8,
    pub pc_after: u16,
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = std::iter::once(self.opcode)
            .chain(self.operands.iter().copied())
            .map(|byte| format!("{:02X}", byte))
            .collect::<Vec<_>>()
            .join(" ");
        write!(
            f,
            "{:04X}  {:<8} {:<4}  A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X}",
            self.pc, bytes, self.mnemonic, self.a, self.x, self.y, self.p, self.s
        )
    }
}

/// A consumer of trace events. The core never calls into a sink itself;
/// `NesCore::step` feeds each event to whatever sink the caller installed.
pub trait TraceSink {
    fn record(&mut self, event: &TraceEvent);
}

/// A sink that discards every event. The default for callers that don't
/// need tracing, so `step` never has to special-case "no sink".
pub struct NullSink;

impl TraceSink for NullSink {
    fn record(&mut self, _event: &TraceEvent) {}
}

/// An in-memory sink retaining the most recent `capacity` events, used by
/// the trace-viewer binary to render a scrolling instruction history
/// without re-reading a log file.
pub struct RingBufferSink {
    events: VecDeque<TraceEvent>,
    capacity: usize,
}

impl RingBufferSink {
    pub fn new(capacity: usize) -> RingBufferSink {
        RingBufferSink {
            events: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn events(&self) -> impl Iterator<Item = &TraceEvent> {
        self.events.iter()
    }
}

impl TraceSink for RingBufferSink {
    fn record(&mut self, event: &TraceEvent) {
        if self.events.len() == self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(event.clone());
    }
}
