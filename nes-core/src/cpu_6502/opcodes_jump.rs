use super::{Cpu6502, StatusFlag};
use crate::constants::InterruptVectors;
use crate::opcodes::Mode;

fn branch(cpu: &mut Cpu6502, mode: Mode, do_branch: bool) {
    let (address, _) = cpu.get_operand(mode);
    if do_branch {
        cpu.pc = address;
    }
}

/// Branch if plus (N=0).
pub fn bpl(cpu: &mut Cpu6502, mode: Mode) {
    branch(cpu, mode, !cpu.is_status_flag_set(StatusFlag::Negative));
}

/// Branch if minus (N=1).
pub fn bmi(cpu: &mut Cpu6502, mode: Mode) {
    branch(cpu, mode, cpu.is_status_flag_set(StatusFlag::Negative));
}

/// Branch on overflow clear (V=0).
pub fn bvc(cpu: &mut Cpu6502, mode: Mode) {
    branch(cpu, mode, !cpu.is_status_flag_set(StatusFlag::Overflow));
}

/// Branch on overflow set (V=1).
pub fn bvs(cpu: &mut Cpu6502, mode: Mode) {
    branch(cpu, mode, cpu.is_status_flag_set(StatusFlag::Overflow));
}

/// Branch on carry clear (C=0).
pub fn bcc(cpu: &mut Cpu6502, mode: Mode) {
    branch(cpu, mode, !cpu.is_status_flag_set(StatusFlag::Carry));
}

/// Branch on carry set (C=1).
pub fn bcs(cpu: &mut Cpu6502, mode: Mode) {
    branch(cpu, mode, cpu.is_status_flag_set(StatusFlag::Carry));
}

/// Branch on not equal (Z=0).
pub fn bne(cpu: &mut Cpu6502, mode: Mode) {
    branch(cpu, mode, !cpu.is_status_flag_set(StatusFlag::Zero));
}

/// Branch on equal (Z=1).
pub fn beq(cpu: &mut Cpu6502, mode: Mode) {
    branch(cpu, mode, cpu.is_status_flag_set(StatusFlag::Zero));
}

/// Force break: pushes PC high, then PC low, then status with bits 4 and 5
/// forced to 1, sets the interrupt-disable flag, then jumps to the IRQ/BRK
/// vector at 0xFFFE.
pub fn brk(cpu: &mut Cpu6502, _mode: Mode) {
    let [low, high] = cpu.pc.to_le_bytes();
    cpu.push_stack_u8(high);
    cpu.push_stack_u8(low);
    let status = cpu.p | (StatusFlag::Break as u8) | (StatusFlag::Push as u8);
    cpu.push_stack_u8(status);
    cpu.set_status_flag(StatusFlag::InterruptDisable, true);
    cpu.pc = cpu
        .bus
        .borrow_mut()
        .read_u16(InterruptVectors::IrqBrkVector as u16);
}

/// Return from interrupt: pulls status (ignoring bits 4 and 5), then pulls
/// PC low, then high.
pub fn rti(cpu: &mut Cpu6502, _mode: Mode) {
    let pulled = cpu.pull_stack_u8();
    let preserved_bits = (StatusFlag::Break as u8) | (StatusFlag::Push as u8);
    cpu.p = (pulled & !preserved_bits) | (StatusFlag::Push as u8);
    let low = cpu.pull_stack_u8();
    let high = cpu.pull_stack_u8();
    cpu.pc = u16::from_le_bytes([low, high]);
}

/// Jump to subroutine: pushes (PC - 1) high then low, then jumps.
pub fn jsr(cpu: &mut Cpu6502, mode: Mode) {
    let (address, _operand) = cpu.get_operand(mode);
    let return_address = cpu.pc.wrapping_sub(1);
    let [low, high] = return_address.to_le_bytes();
    cpu.push_stack_u8(high);
    cpu.push_stack_u8(low);
    cpu.pc = address;
}

/// Return from subroutine: pulls low then high, and resumes one byte past
/// the pushed return address.
pub fn rts(cpu: &mut Cpu6502, _mode: Mode) {
    let low = cpu.pull_stack_u8();
    let high = cpu.pull_stack_u8();
    cpu.pc = u16::from_le_bytes([low, high]).wrapping_add(1);
}

/// Jump.
pub fn jmp(cpu: &mut Cpu6502, mode: Mode) {
    let (address, _operand) = cpu.get_operand(mode);
    cpu.pc = address;
}

/// Bit test: ANDs A with the operand to set Z, but takes N and V directly
/// from the operand's bits 7 and 6. A is left unchanged.
/// Flags: N V Z
pub fn bit(cpu: &mut Cpu6502, mode: Mode) {
    let (_, operand) = cpu.get_operand(mode);
    let result = cpu.a & operand;
    cpu.set_status_flag(StatusFlag::Negative, operand & 0b1000_0000 != 0);
    cpu.set_status_flag(StatusFlag::Overflow, operand & 0b0100_0000 != 0);
    cpu.set_status_flag(StatusFlag::Zero, result == 0);
}

/// Clear carry.
pub fn clc(cpu: &mut Cpu6502, _mode: Mode) {
    cpu.set_status_flag(StatusFlag::Carry, false);
}

/// Set carry.
pub fn sec(cpu: &mut Cpu6502, _mode: Mode) {
    cpu.set_status_flag(StatusFlag::Carry, true);
}

/// Clear decimal.
pub fn cld(cpu: &mut Cpu6502, _mode: Mode) {
    cpu.set_status_flag(StatusFlag::Decimal, false);
}

/// Set decimal. Settable for compatibility, but never consulted by ADC/SBC
/// on this core (see Design Notes).
pub fn sed(cpu: &mut Cpu6502, _mode: Mode) {
    cpu.set_status_flag(StatusFlag::Decimal, true);
}

/// Clear interrupt-disable.
pub fn cli(cpu: &mut Cpu6502, _mode: Mode) {
    cpu.set_status_flag(StatusFlag::InterruptDisable, false);
}

/// Set interrupt-disable.
pub fn sei(cpu: &mut Cpu6502, _mode: Mode) {
    cpu.set_status_flag(StatusFlag::InterruptDisable, true);
}

/// Clear overflow.
pub fn clv(cpu: &mut Cpu6502, _mode: Mode) {
    cpu.set_status_flag(StatusFlag::Overflow, false);
}

/// No operation.
pub fn nop(cpu: &mut Cpu6502, mode: Mode) {
    // Still consume any operand bytes the addressing mode implies.
    cpu.get_operand(mode);
}

/// Dispatched for any byte outside the official 151-entry table. Consumes
/// only its own opcode byte.
pub fn unofficial(_cpu: &mut Cpu6502, _mode: Mode) {}
