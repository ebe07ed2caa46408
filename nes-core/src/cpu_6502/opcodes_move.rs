use super::{Cpu6502, StatusFlag};
use crate::opcodes::Mode;

/// Load the value into register A.
/// Flags: N Z
pub fn lda(cpu: &mut Cpu6502, mode: Mode) {
    let (_address, operand) = cpu.get_operand(mode);
    cpu.a = operand;
    cpu.update_zero_and_negative_flag(cpu.a);
}

/// Store register A at address.
pub fn sta(cpu: &mut Cpu6502, mode: Mode) {
    let (address, _operand) = cpu.get_operand(mode);
    cpu.bus.borrow_mut().set_u8(address, cpu.a);
}

/// Load register X with the value.
/// Flags: N Z
pub fn ldx(cpu: &mut Cpu6502, mode: Mode) {
    let (_address, operand) = cpu.get_operand(mode);
    cpu.x = operand;
    cpu.update_zero_and_negative_flag(cpu.x);
}

/// Store register X at address.
pub fn stx(cpu: &mut Cpu6502, mode: Mode) {
    let (address, _operand) = cpu.get_operand(mode);
    cpu.bus.borrow_mut().set_u8(address, cpu.x);
}

/// Load register Y with the value.
/// Flags: N Z
pub fn ldy(cpu: &mut Cpu6502, mode: Mode) {
    let (_address, operand) = cpu.get_operand(mode);
    cpu.y = operand;
    cpu.update_zero_and_negative_flag(cpu.y);
}

/// Store register Y at address.
pub fn sty(cpu: &mut Cpu6502, mode: Mode) {
    let (address, _operand) = cpu.get_operand(mode);
    cpu.bus.borrow_mut().set_u8(address, cpu.y);
}

/// Transfer A to X.
/// Flags: N Z
pub fn tax(cpu: &mut Cpu6502, _mode: Mode) {
    cpu.x = cpu.a;
    cpu.update_zero_and_negative_flag(cpu.x);
}

/// Transfer X to A.
/// Flags: N Z
pub fn txa(cpu: &mut Cpu6502, _mode: Mode) {
    cpu.a = cpu.x;
    cpu.update_zero_and_negative_flag(cpu.a);
}

/// Transfer A to Y.
/// Flags: N Z
pub fn tay(cpu: &mut Cpu6502, _mode: Mode) {
    cpu.y = cpu.a;
    cpu.update_zero_and_negative_flag(cpu.y);
}

/// Transfer Y to A.
/// Flags: N Z
pub fn tya(cpu: &mut Cpu6502, _mode: Mode) {
    cpu.a = cpu.y;
    cpu.update_zero_and_negative_flag(cpu.a);
}

/// Transfer S to X.
/// Flags: N Z
pub fn tsx(cpu: &mut Cpu6502, _mode: Mode) {
    cpu.x = cpu.s;
    cpu.update_zero_and_negative_flag(cpu.x);
}

/// Transfer X to S. Unlike every other transfer, TXS does not touch N/Z:
/// the stack pointer has no sign or zero-ness a caller should observe.
pub fn txs(cpu: &mut Cpu6502, _mode: Mode) {
    cpu.s = cpu.x;
}

/// Pull A.
/// Flags: N Z
pub fn pla(cpu: &mut Cpu6502, _mode: Mode) {
    cpu.a = cpu.pull_stack_u8();
    cpu.update_zero_and_negative_flag(cpu.a);
}

/// Push A to the stack.
pub fn pha(cpu: &mut Cpu6502, _mode: Mode) {
    cpu.push_stack_u8(cpu.a);
}

/// Pull the status register from the stack. Bits 4 and 5 of the pulled byte
/// are ignored; this core's own representation of bit 5 stays forced-1 and
/// bit 4 (break) is never persisted outside of a push.
pub fn plp(cpu: &mut Cpu6502, _mode: Mode) {
    let pulled = cpu.pull_stack_u8();
    let preserved_bits = (StatusFlag::Break as u8) | (StatusFlag::Push as u8);
    cpu.p = (pulled & !preserved_bits) | (StatusFlag::Push as u8);
}

/// Push the status register to the stack, forcing bits 4 and 5 to 1.
pub fn php(cpu: &mut Cpu6502, _mode: Mode) {
    let pushed = cpu.p | (StatusFlag::Break as u8) | (StatusFlag::Push as u8);
    cpu.push_stack_u8(pushed);
}
