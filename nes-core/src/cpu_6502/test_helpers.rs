#![cfg(test)]

use super::{Cpu6502, StatusFlag};
use crate::bus::Bus;
use crate::mappers::Nrom;

pub const P: u8 = 0b0010_0000;
pub const C: u8 = StatusFlag::Carry as u8;
pub const Z: u8 = StatusFlag::Zero as u8;
pub const I: u8 = StatusFlag::InterruptDisable as u8;
pub const D: u8 = StatusFlag::Decimal as u8;
pub const B: u8 = StatusFlag::Break as u8;
pub const T: u8 = StatusFlag::Push as u8;
pub const V: u8 = StatusFlag::Overflow as u8;
pub const N: u8 = StatusFlag::Negative as u8;

/// Load `program` as a test cartridge and execute exactly `steps`
/// instructions, returning the resulting CPU state.
pub fn run_program(program: &[u8], steps: u64) -> Cpu6502 {
    let bus = Bus::new_shared_bus(Box::new(Nrom::from_test_program(program)));
    let mut cpu = Cpu6502::new(bus);
    cpu.max_ticks = Some(steps);
    cpu.run();
    cpu
}

pub fn assert_register_a(program: &[u8], steps: u64, value: u8, status: u8) {
    let cpu = run_program(program, steps);
    assert_eq!(
        cpu.a, value,
        "expected register A to be {:#04x} but it was {:#04x}",
        value, cpu.a
    );
    assert_status(&cpu, status);
}

pub fn assert_register_x(program: &[u8], steps: u64, value: u8, status: u8) {
    let cpu = run_program(program, steps);
    assert_eq!(
        cpu.x, value,
        "expected register X to be {:#04x} but it was {:#04x}",
        value, cpu.x
    );
    assert_status(&cpu, status);
}

pub fn assert_register_y(program: &[u8], steps: u64, value: u8, status: u8) {
    let cpu = run_program(program, steps);
    assert_eq!(
        cpu.y, value,
        "expected register Y to be {:#04x} but it was {:#04x}",
        value, cpu.y
    );
    assert_status(&cpu, status);
}

pub fn assert_status(cpu: &Cpu6502, value: u8) {
    assert_eq!(
        cpu.p, value,
        "expected cpu status {:#010b} to match {:#010b}",
        value, cpu.p
    );
}
