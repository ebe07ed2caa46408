pub(crate) mod opcodes_jump;
pub(crate) mod opcodes_logical;
pub(crate) mod opcodes_move;
#[cfg(test)]
mod test;
#[cfg(test)]
mod test_helpers;

use crate::bus::SharedBus;
use crate::constants::{memory_range, InterruptVectors};
use crate::opcodes::{decode, mode_operand_len, Mode};
use crate::trace::TraceEvent;

const RESET_STATUS_FLAG: u8 = 0b0010_0000;

#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatusFlag {
  Carry            = 0b0000_0001,
  Zero             = 0b0000_0010,
  InterruptDisable = 0b0000_0100,
  Decimal          = 0b0000_1000,
  Break            = 0b0001_0000,
  Push             = 0b0010_0000,
  Overflow         = 0b0100_0000,
  Negative         = 0b1000_0000,
}

/// A MOS 6502 / Ricoh 2A03 interpreter. Holds the architectural register
/// file and a handle to the shared bus; all execution happens through
/// `tick`, which decodes and dispatches exactly one instruction.
pub struct Cpu6502 {
    pub bus: SharedBus,
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub pc: u16,
    pub s: u8,
    pub p: u8,
    /// Total number of instructions executed. Not a cycle count: this core
    /// does not model per-instruction timing (see Design Notes).
    pub tick_count: u64,
    /// If set, `run` stops once this many instructions have executed, in
    /// addition to its natural termination condition. Used by tests and the
    /// trace viewer to bound a run.
    pub max_ticks: Option<u64>,
    /// Set by the addressing-mode resolver whenever the most recent operand
    /// address crossed a page boundary. Unused for correctness today; this
    /// is the seam a cycle-accurate extension would read.
    pub last_page_crossed: bool,
}

impl Cpu6502 {
    pub fn new(bus: SharedBus) -> Cpu6502 {
        let pc = bus.borrow_mut().read_u16(InterruptVectors::ResetVector as u16);
        Cpu6502 {
            bus,
            a: 0,
            x: 0,
            y: 0,
            pc,
            s: 0xff,
            p: RESET_STATUS_FLAG,
            tick_count: 0,
            max_ticks: None,
            last_page_crossed: false,
        }
    }

    /// Re-initialize architectural state from the reset vector, as if the
    /// console had just powered on with the current cartridge inserted.
    pub fn reset(&mut self) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.s = 0xff;
        self.p = RESET_STATUS_FLAG;
        self.tick_count = 0;
        self.pc = self.bus.borrow_mut().read_u16(InterruptVectors::ResetVector as u16);
    }

    fn peek_u8(&mut self) -> u8 {
        self.bus.borrow_mut().read_u8(self.pc)
    }

    fn next_u8(&mut self) -> u8 {
        let value = self.bus.borrow_mut().read_u8(self.pc);
        self.pc = self.pc.wrapping_add(1);
        value
    }

    fn next_u16(&mut self) -> u16 {
        let value = self.bus.borrow_mut().read_u16(self.pc);
        self.pc = self.pc.wrapping_add(2);
        value
    }

    /// Execute exactly one instruction, returning a record of what happened
    /// for a trace sink to consume. This is the only entry point that
    /// mutates CPU state outside of `reset`.
    pub fn tick(&mut self) -> TraceEvent {
        let pc_before = self.pc;
        let opcode = self.next_u8();
        let info = decode(opcode);

        let mut operands = Vec::with_capacity(2);
        for i in 0..mode_operand_len(info.mode) {
            operands.push(
                self.bus
                    .borrow_mut()
                    .read_u8(pc_before.wrapping_add(1).wrapping_add(i as u16)),
            );
        }

        (info.execute)(self, info.mode);
        self.tick_count += 1;

        TraceEvent {
            pc: pc_before,
            opcode,
            operands,
            mnemonic: info.mnemonic,
            mode: info.mode,
            a: self.a,
            x: self.x,
            y: self.y,
            s: self.s,
            p: self.p,
            pc_after: self.pc,
        }
    }

    /// Run until `predicate` returns true, or `max_ticks` is reached.
    pub fn run_until<F>(&mut self, predicate: F)
    where
        F: Fn(&Cpu6502) -> bool,
    {
        while !predicate(self) {
            if let Some(max_ticks) = self.max_ticks {
                if self.tick_count >= max_ticks {
                    break;
                }
            }
            self.tick();
        }
    }

    /// Run until `max_ticks` is reached. Intended for tests and the
    /// diagnostic driver, which otherwise decides termination by polling
    /// the 0x6000 status protocol (see `nes_core::NesCore`).
    pub fn run(&mut self) {
        let max_ticks = self.max_ticks.unwrap_or(u64::MAX);
        while self.tick_count < max_ticks {
            self.tick();
        }
    }

    /// Resolve an addressing mode's operand. Returns the effective address
    /// (or, for immediate/relative/accumulator, a placeholder) and the
    /// byte found there.
    pub fn get_operand(&mut self, mode: Mode) -> (u16, u8) {
        let address = self.get_operand_address(mode);
        match mode {
            Mode::RegisterA => (address, self.a),
            _ => {
                let value = self.bus.borrow_mut().read_u8(address);
                (address, value)
            }
        }
    }

    fn get_operand_address(&mut self, mode: Mode) -> u16 {
        self.last_page_crossed = false;
        match mode {
            Mode::Absolute => self.next_u16(),
            Mode::AbsoluteIndexedX => {
                let base = self.next_u16();
                let ea = base.wrapping_add(self.x as u16);
                self.mark_page_crossed(base, ea);
                ea
            }
            Mode::AbsoluteIndexedY => {
                let base = self.next_u16();
                let ea = base.wrapping_add(self.y as u16);
                self.mark_page_crossed(base, ea);
                ea
            }
            Mode::Immediate => {
                let address = self.pc;
                self.pc = self.pc.wrapping_add(1);
                address
            }
            Mode::Implied => 0,
            Mode::RegisterA => 0,
            // The indirect JMP bug: when the pointer's low byte is 0xFF, the
            // high byte of the target is fetched from the same page instead
            // of wrapping into the next one.
            Mode::Indirect => {
                let pointer = self.next_u16();
                let low = self.bus.borrow_mut().read_u8(pointer);
                let high_address = (pointer & 0xff00) | (pointer.wrapping_add(1) & 0x00ff);
                let high = self.bus.borrow_mut().read_u8(high_address);
                u16::from_le_bytes([low, high])
            }
            Mode::IndirectX => {
                let pointer = self.next_u8().wrapping_add(self.x);
                let low = self.bus.borrow_mut().read_u8(pointer as u16);
                let high = self.bus.borrow_mut().read_u8(pointer.wrapping_add(1) as u16);
                u16::from_le_bytes([low, high])
            }
            Mode::IndirectY => {
                let pointer = self.next_u8();
                let low = self.bus.borrow_mut().read_u8(pointer as u16);
                let high = self.bus.borrow_mut().read_u8(pointer.wrapping_add(1) as u16);
                let base = u16::from_le_bytes([low, high]);
                let ea = base.wrapping_add(self.y as u16);
                self.mark_page_crossed(base, ea);
                ea
            }
            Mode::Relative => {
                let offset = self.next_u8() as i8;
                let base = self.pc;
                let ea = self.pc.wrapping_add(offset as u16);
                self.mark_page_crossed(base, ea);
                ea
            }
            Mode::ZeroPage => self.next_u8() as u16,
            Mode::ZeroPageX => self.next_u8().wrapping_add(self.x) as u16,
            Mode::ZeroPageY => self.next_u8().wrapping_add(self.y) as u16,
            Mode::None => panic!("Mode::None should never be dispatched."),
        }
    }

    fn mark_page_crossed(&mut self, base_address: u16, offset_address: u16) {
        let [_, base_page] = base_address.to_le_bytes();
        let [_, offset_page] = offset_address.to_le_bytes();
        self.last_page_crossed = base_page != offset_page;
    }

    pub fn update_zero_and_negative_flag(&mut self, value: u8) {
        self.set_status_flag(StatusFlag::Zero, value == 0);
        self.set_status_flag(StatusFlag::Negative, value & 0b1000_0000 != 0);
    }

    /// ADC/SBC operate on 9 bits; the 9th bit is the carry flag. Store it
    /// back onto the status register.
    pub fn update_carry_flag(&mut self, result: u16) {
        self.set_status_flag(StatusFlag::Carry, result & 0b1_0000_0000 != 0);
    }

    /// Signed overflow occurs when the accumulator and the operand share a
    /// sign that differs from the sign of the result.
    pub fn update_overflow_flag(&mut self, operand: u8, result: u8) {
        let bit7 = 0b1000_0000;
        let overflowed = bit7 & !(self.a ^ operand) & (self.a ^ result) == bit7;
        self.set_status_flag(StatusFlag::Overflow, overflowed);
    }

    pub fn set_status_flag(&mut self, flag: StatusFlag, value: bool) {
        if value {
            self.p |= flag as u8;
        } else {
            self.p &= !(flag as u8);
        }
    }

    pub fn is_status_flag_set(&self, flag: StatusFlag) -> bool {
        let mask = flag as u8;
        self.p & mask == mask
    }

    pub fn get_carry(&self) -> u8 {
        self.p & (StatusFlag::Carry as u8)
    }

    pub fn push_stack_u8(&mut self, value: u8) {
        let address = u16::from_le_bytes([self.s, memory_range::STACK_PAGE]);
        self.bus.borrow_mut().set_u8(address, value);
        self.s = self.s.wrapping_sub(1);
    }

    pub fn pull_stack_u8(&mut self) -> u8 {
        self.s = self.s.wrapping_add(1);
        let address = u16::from_le_bytes([self.s, memory_range::STACK_PAGE]);
        self.bus.borrow_mut().read_u8(address)
    }
}
