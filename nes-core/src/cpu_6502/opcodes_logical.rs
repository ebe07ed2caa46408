use super::{Cpu6502, StatusFlag};
use crate::opcodes::Mode;

/// Apply the logical "or" operator on the accumulator.
/// Flags: N Z
pub fn ora(cpu: &mut Cpu6502, mode: Mode) {
    let (_, operand) = cpu.get_operand(mode);
    cpu.a |= operand;
    cpu.update_zero_and_negative_flag(cpu.a);
}

/// Apply the logical "and" operator on the accumulator.
/// Flags: N Z
pub fn and(cpu: &mut Cpu6502, mode: Mode) {
    let (_, operand) = cpu.get_operand(mode);
    cpu.a &= operand;
    cpu.update_zero_and_negative_flag(cpu.a);
}

/// Logical exclusive or.
/// Flags: N Z
pub fn eor(cpu: &mut Cpu6502, mode: Mode) {
    let (_, operand) = cpu.get_operand(mode);
    cpu.a ^= operand;
    cpu.update_zero_and_negative_flag(cpu.a);
}

fn add_impl(cpu: &mut Cpu6502, operand: u8) {
    // Widen to u16 so the carry out of bit 7 is observable without a
    // separate wrapping check.
    let result_u16 = cpu.get_carry() as u16 + cpu.a as u16 + operand as u16;
    let result_u8 = result_u16 as u8;

    cpu.update_overflow_flag(operand, result_u8);
    cpu.update_carry_flag(result_u16);
    cpu.a = result_u8;
    cpu.update_zero_and_negative_flag(cpu.a);
}

/// Add with carry. The 2A03 never consults the decimal flag, so this is
/// always binary addition regardless of the D flag's state.
/// Flags: N V Z C
pub fn adc(cpu: &mut Cpu6502, mode: Mode) {
    let (_, operand) = cpu.get_operand(mode);
    add_impl(cpu, operand);
}

/// Subtract with carry, implemented as addition of the bitwise complement
/// so the flag formulas are shared with `adc`. Callers are expected to
/// `SEC` first so the complement's +1 falls out of the carry-in.
/// Flags: N V Z C
pub fn sbc(cpu: &mut Cpu6502, mode: Mode) {
    let (_, operand) = cpu.get_operand(mode);
    add_impl(cpu, !operand);
}

/// Compare A with source.
/// Flags: N Z C
pub fn cmp(cpu: &mut Cpu6502, mode: Mode) {
    let (_, operand) = cpu.get_operand(mode);
    cpu.update_zero_and_negative_flag(cpu.a.wrapping_sub(operand));
    cpu.set_status_flag(StatusFlag::Carry, cpu.a >= operand);
}

/// Compare X with source.
/// Flags: N Z C
pub fn cpx(cpu: &mut Cpu6502, mode: Mode) {
    let (_, operand) = cpu.get_operand(mode);
    cpu.update_zero_and_negative_flag(cpu.x.wrapping_sub(operand));
    cpu.set_status_flag(StatusFlag::Carry, cpu.x >= operand);
}

/// Compare Y with source.
/// Flags: N Z C
pub fn cpy(cpu: &mut Cpu6502, mode: Mode) {
    let (_, operand) = cpu.get_operand(mode);
    cpu.update_zero_and_negative_flag(cpu.y.wrapping_sub(operand));
    cpu.set_status_flag(StatusFlag::Carry, cpu.y >= operand);
}

/// Decrement the value at an address.
/// Flags: N Z
pub fn dec(cpu: &mut Cpu6502, mode: Mode) {
    let (address, operand) = cpu.get_operand(mode);
    let result = operand.wrapping_sub(1);
    cpu.update_zero_and_negative_flag(result);
    cpu.bus.borrow_mut().set_u8(address, result);
}

/// Decrement X.
/// Flags: N Z
pub fn dex(cpu: &mut Cpu6502, _mode: Mode) {
    cpu.x = cpu.x.wrapping_sub(1);
    cpu.update_zero_and_negative_flag(cpu.x);
}

/// Decrement Y.
/// Flags: N Z
pub fn dey(cpu: &mut Cpu6502, _mode: Mode) {
    cpu.y = cpu.y.wrapping_sub(1);
    cpu.update_zero_and_negative_flag(cpu.y);
}

/// Increment the value at an address.
/// Flags: N Z
pub fn inc(cpu: &mut Cpu6502, mode: Mode) {
    let (address, operand) = cpu.get_operand(mode);
    let result = operand.wrapping_add(1);
    cpu.update_zero_and_negative_flag(result);
    cpu.bus.borrow_mut().set_u8(address, result);
}

/// Increment X.
/// Flags: N Z
pub fn inx(cpu: &mut Cpu6502, _mode: Mode) {
    cpu.x = cpu.x.wrapping_add(1);
    cpu.update_zero_and_negative_flag(cpu.x);
}

/// Increment Y.
/// Flags: N Z
pub fn iny(cpu: &mut Cpu6502, _mode: Mode) {
    cpu.y = cpu.y.wrapping_add(1);
    cpu.update_zero_and_negative_flag(cpu.y);
}

/// Arithmetic shift left, on either the accumulator or a memory operand.
/// Flags: N Z C
pub fn asl(cpu: &mut Cpu6502, mode: Mode) {
    let (address, operand) = cpu.get_operand(mode);
    let result = operand << 1;
    cpu.set_status_flag(StatusFlag::Carry, operand & 0b1000_0000 != 0);
    cpu.update_zero_and_negative_flag(result);
    write_back(cpu, mode, address, result);
}

/// Rotate left through carry.
/// Flags: N Z C
pub fn rol(cpu: &mut Cpu6502, mode: Mode) {
    let (address, operand) = cpu.get_operand(mode);
    let result = (operand << 1) | cpu.get_carry();
    cpu.set_status_flag(StatusFlag::Carry, operand & 0b1000_0000 != 0);
    cpu.update_zero_and_negative_flag(result);
    write_back(cpu, mode, address, result);
}

/// Logical shift right.
/// Flags: N Z C
pub fn lsr(cpu: &mut Cpu6502, mode: Mode) {
    let (address, operand) = cpu.get_operand(mode);
    let result = operand >> 1;
    cpu.set_status_flag(StatusFlag::Carry, operand & 0b0000_0001 != 0);
    cpu.update_zero_and_negative_flag(result);
    write_back(cpu, mode, address, result);
}

/// Rotate right through carry.
/// Flags: N Z C
pub fn ror(cpu: &mut Cpu6502, mode: Mode) {
    let (address, operand) = cpu.get_operand(mode);
    let result = (operand >> 1) | (cpu.get_carry() << 7);
    cpu.set_status_flag(StatusFlag::Carry, operand & 0b0000_0001 != 0);
    cpu.update_zero_and_negative_flag(result);
    write_back(cpu, mode, address, result);
}

/// The four shift/rotate instructions share a destination: the accumulator
/// when encoded with accumulator addressing, or memory otherwise.
fn write_back(cpu: &mut Cpu6502, mode: Mode, address: u16, result: u8) {
    if mode == Mode::RegisterA {
        cpu.a = result;
    } else {
        cpu.bus.borrow_mut().set_u8(address, result);
    }
}
