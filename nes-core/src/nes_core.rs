use std::path::Path;
use std::rc::Rc;

use crate::bus::{Bus, SharedBus};
use crate::constants::{
    DEFAULT_PPU_POLL_INTERVAL, DIAGNOSTIC_MAGIC, DIAGNOSTIC_MESSAGE_ADDRESS,
    DIAGNOSTIC_STATUS_ADDRESS, DIAGNOSTIC_STATUS_PASS, DIAGNOSTIC_STATUS_RUNNING,
};
use crate::cpu_6502::Cpu6502;
use crate::mappers::{Mapper, Nrom};
use crate::ppu::Ppu;
use crate::rom::{Rom, RomError};
use crate::trace::{NullSink, TraceEvent, TraceSink};

/// Outcome of polling the 0x6000 diagnostic-ROM status protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticStatus {
    /// The ROM has not written the magic sequence at 0x6001-0x6003 yet, so
    /// whatever is at 0x6000 cannot be trusted as a status code.
    NotStarted,
    Running,
    Pass,
    Fail(String),
}

/// The core logic for the NES. It requires a front-end to actually produce
/// video, sound, and take gamepad input; this crate only drives the CPU,
/// a stub PPU, and cartridge space.
pub struct NesCore {
    pub bus: SharedBus,
    pub cpu: Cpu6502,
    pub ppu: Ppu,
    trace_sink: Box<dyn TraceSink>,
}

impl NesCore {
    pub fn new(cartridge: Box<dyn Mapper>) -> NesCore {
        NesCore::with_ppu_poll_interval(cartridge, DEFAULT_PPU_POLL_INTERVAL)
    }

    /// Build a core whose stub PPU toggles vblank every `poll_interval`
    /// steps instead of the default, for ROMs that spin-wait on PPUSTATUS
    /// at a different cadence than `DEFAULT_PPU_POLL_INTERVAL` assumes.
    pub fn with_ppu_poll_interval(cartridge: Box<dyn Mapper>, poll_interval: u32) -> NesCore {
        let bus = Bus::new_shared_bus(cartridge);
        NesCore {
            cpu: Cpu6502::new(Rc::clone(&bus)),
            ppu: Ppu::with_poll_interval(Rc::clone(&bus), poll_interval),
            bus,
            trace_sink: Box::new(NullSink),
        }
    }

    /// Load an iNES file from disk and install it as an NROM cartridge.
    pub fn load_rom(path: &Path) -> Result<NesCore, RomError> {
        NesCore::load_rom_with_ppu_poll_interval(path, DEFAULT_PPU_POLL_INTERVAL)
    }

    /// Load an iNES file from disk, installing it as an NROM cartridge with
    /// a caller-chosen PPU poll interval.
    pub fn load_rom_with_ppu_poll_interval(
        path: &Path,
        poll_interval: u32,
    ) -> Result<NesCore, RomError> {
        let rom = Rom::load_ines_file(path)?;
        Ok(NesCore::with_ppu_poll_interval(
            Box::new(Nrom::from_prg_rom(&rom.program_rom)),
            poll_interval,
        ))
    }

    pub fn set_trace_sink(&mut self, sink: Box<dyn TraceSink>) {
        self.trace_sink = sink;
    }

    /// Re-initializes architectural state from the loaded ROM's reset
    /// vector. The stub PPU and bus memory are left untouched, matching a
    /// real console's reset line (as opposed to a full power cycle).
    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    /// Execute one instruction and step the stub PPU.
    pub fn step(&mut self) -> TraceEvent {
        let event = self.cpu.tick();
        self.trace_sink.record(&event);
        self.ppu.tick();
        event
    }

    pub fn read(&self, addr: u16) -> u8 {
        self.bus.borrow_mut().read_u8(addr)
    }

    pub fn write(&self, addr: u16, value: u8) {
        self.bus.borrow_mut().set_u8(addr, value);
    }

    /// Poll the `blargg`-style diagnostic protocol without advancing the
    /// CPU: byte 0x6000 holds a status code once the magic sequence at
    /// 0x6001-0x6003 has been observed.
    pub fn diagnostic_status(&self) -> DiagnosticStatus {
        let mut bus = self.bus.borrow_mut();
        let magic = [
            bus.read_u8(DIAGNOSTIC_STATUS_ADDRESS + 1),
            bus.read_u8(DIAGNOSTIC_STATUS_ADDRESS + 2),
            bus.read_u8(DIAGNOSTIC_STATUS_ADDRESS + 3),
        ];
        if magic != DIAGNOSTIC_MAGIC {
            return DiagnosticStatus::NotStarted;
        }

        match bus.read_u8(DIAGNOSTIC_STATUS_ADDRESS) {
            DIAGNOSTIC_STATUS_RUNNING => DiagnosticStatus::Running,
            DIAGNOSTIC_STATUS_PASS => DiagnosticStatus::Pass,
            _ => {
                let mut message = String::new();
                let mut address = DIAGNOSTIC_MESSAGE_ADDRESS;
                loop {
                    let byte = bus.read_u8(address);
                    if byte == 0 {
                        break;
                    }
                    message.push(byte as char);
                    address = address.wrapping_add(1);
                }
                DiagnosticStatus::Fail(message)
            }
        }
    }

    /// Run the diagnostic protocol to completion, or until `max_steps`
    /// instructions have executed without the ROM reporting a result.
    pub fn run_diagnostic(&mut self, max_steps: u64) -> DiagnosticStatus {
        for _ in 0..max_steps {
            match self.diagnostic_status() {
                DiagnosticStatus::Pass => return DiagnosticStatus::Pass,
                DiagnosticStatus::Fail(message) => return DiagnosticStatus::Fail(message),
                DiagnosticStatus::Running | DiagnosticStatus::NotStarted => {
                    self.step();
                }
            }
        }
        self.diagnostic_status()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::mappers::Nrom;

    #[test]
    fn step_executes_one_instruction_and_advances_pc() {
        let mut nes = NesCore::new(Box::new(Nrom::from_test_program(&[0xa9, 0x42]))); // LDA #$42
        let event = nes.step();
        assert_eq!(event.mnemonic, "LDA");
        assert_eq!(nes.cpu.a, 0x42);
    }

    #[test]
    fn run_diagnostic_reports_pass_once_the_status_protocol_completes() {
        // LDA #$DE; STA $6001; LDA #$B0; STA $6002; LDA #$61; STA $6003;
        // LDA #$00; STA $6000; then spin on the JMP's own address.
        let mut program = vec![
            0xa9, 0xde, 0x8d, 0x01, 0x60, // LDA #$DE / STA $6001
            0xa9, 0xb0, 0x8d, 0x02, 0x60, // LDA #$B0 / STA $6002
            0xa9, 0x61, 0x8d, 0x03, 0x60, // LDA #$61 / STA $6003
            0xa9, 0x00, 0x8d, 0x00, 0x60, // LDA #$00 / STA $6000
        ];
        let jmp_offset = program.len() as u16;
        program.push(0x4c);
        program.push((0x8000u16 + jmp_offset) as u8);
        program.push(0x80);

        let mut nes = NesCore::new(Box::new(Nrom::from_test_program(&program)));
        let status = nes.run_diagnostic(1000);
        assert_eq!(status, DiagnosticStatus::Pass);
    }

    #[test]
    fn run_diagnostic_reports_the_failure_message() {
        let mut program = vec![
            0xa9, 0xde, 0x8d, 0x01, 0x60, // LDA #$DE / STA $6001
            0xa9, 0xb0, 0x8d, 0x02, 0x60, // LDA #$B0 / STA $6002
            0xa9, 0x61, 0x8d, 0x03, 0x60, // LDA #$61 / STA $6003
            0xa9, 0x01, 0x8d, 0x00, 0x60, // LDA #$01 / STA $6000 (fail code)
        ];
        let message_offset = program.len() as u16;
        program.push(0x4c);
        program.push((0x8000u16 + message_offset) as u8);
        program.push(0x80); // JMP to self, spin forever
        for byte in b"nope\0" {
            program.push(*byte);
        }

        let mut nes = NesCore::new(Box::new(Nrom::from_test_program(&program)));
        // The message lives in work RAM at $6004+, not in the program
        // bytes above; write it there directly the way a real failing
        // test ROM's data section would have assembled it.
        for (i, byte) in b"nope\0".iter().enumerate() {
            nes.write(0x6004 + i as u16, *byte);
        }

        let status = nes.run_diagnostic(1000);
        assert_eq!(status, DiagnosticStatus::Fail("nope".to_string()));
    }
}
