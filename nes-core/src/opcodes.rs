use crate::cpu_6502::opcodes_jump::*;
use crate::cpu_6502::opcodes_logical::*;
use crate::cpu_6502::opcodes_move::*;
use crate::cpu_6502::Cpu6502;

/// The 13 addressing modes, plus `None` for the one opcode byte the table
/// below never produces (it exists so `Mode` can derive `Default`-adjacent
/// code elsewhere without an `Option`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Absolute,
    AbsoluteIndexedX,
    AbsoluteIndexedY,
    Immediate,
    Implied,
    Indirect,
    IndirectX,
    IndirectY,
    Relative,
    RegisterA,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    None,
}

/// How many bytes, beyond the opcode itself, each mode consumes from the
/// instruction stream. Shared by the executor and anything that wants to
/// disassemble without executing.
pub fn mode_operand_len(mode: Mode) -> u8 {
    match mode {
        Mode::Implied | Mode::RegisterA | Mode::None => 0,
        Mode::Immediate
        | Mode::Relative
        | Mode::ZeroPage
        | Mode::ZeroPageX
        | Mode::ZeroPageY
        | Mode::IndirectX
        | Mode::IndirectY => 1,
        Mode::Absolute | Mode::AbsoluteIndexedX | Mode::AbsoluteIndexedY | Mode::Indirect => 2,
    }
}

type Execute = fn(&mut Cpu6502, Mode);

/// A single decoded opcode byte: its mnemonic, addressing mode, base cycle
/// cost, and the function that carries out its semantics. Decoupled from
/// dispatch so a disassembler and the executor can share it.
#[derive(Clone, Copy)]
pub struct OpcodeInfo {
    pub mnemonic: &'static str,
    pub mode: Mode,
    pub cycles: u8,
    pub execute: Execute,
}

macro_rules! op {
    ($mnemonic:expr, $mode:expr, $cycles:expr, $execute:expr) => {
        OpcodeInfo {
            mnemonic: $mnemonic,
            mode: $mode,
            cycles: $cycles,
            execute: $execute,
        }
    };
}

/// Decode a single opcode byte into its table entry. Any byte outside the
/// official 151-entry table decodes to a traced no-op (see Design Notes).
pub fn decode(opcode: u8) -> OpcodeInfo {
    use Mode::*;
    match opcode {
        0x00 => op!("BRK", Implied, 7, brk),
        0x01 => op!("ORA", IndirectX, 6, ora),
        0x05 => op!("ORA", ZeroPage, 3, ora),
        0x06 => op!("ASL", ZeroPage, 5, asl),
        0x08 => op!("PHP", Implied, 3, php),
        0x09 => op!("ORA", Immediate, 2, ora),
        0x0a => op!("ASL", RegisterA, 2, asl),
        0x0d => op!("ORA", Absolute, 4, ora),
        0x0e => op!("ASL", Absolute, 6, asl),
        0x10 => op!("BPL", Relative, 2, bpl),
        0x11 => op!("ORA", IndirectY, 5, ora),
        0x15 => op!("ORA", ZeroPageX, 4, ora),
        0x16 => op!("ASL", ZeroPageX, 6, asl),
        0x18 => op!("CLC", Implied, 2, clc),
        0x19 => op!("ORA", AbsoluteIndexedY, 4, ora),
        0x1d => op!("ORA", AbsoluteIndexedX, 4, ora),
        0x1e => op!("ASL", AbsoluteIndexedX, 7, asl),
        0x20 => op!("JSR", Absolute, 6, jsr),
        0x21 => op!("AND", IndirectX, 6, and),
        0x24 => op!("BIT", ZeroPage, 3, bit),
        0x25 => op!("AND", ZeroPage, 3, and),
        0x26 => op!("ROL", ZeroPage, 5, rol),
        0x28 => op!("PLP", Implied, 4, plp),
        0x29 => op!("AND", Immediate, 2, and),
        0x2a => op!("ROL", RegisterA, 2, rol),
        0x2c => op!("BIT", Absolute, 4, bit),
        0x2d => op!("AND", Absolute, 4, and),
        0x2e => op!("ROL", Absolute, 6, rol),
        0x30 => op!("BMI", Relative, 2, bmi),
        0x31 => op!("AND", IndirectY, 5, and),
        0x35 => op!("AND", ZeroPageX, 4, and),
        0x36 => op!("ROL", ZeroPageX, 6, rol),
        0x38 => op!("SEC", Implied, 2, sec),
        0x39 => op!("AND", AbsoluteIndexedY, 4, and),
        0x3d => op!("AND", AbsoluteIndexedX, 4, and),
        0x3e => op!("ROL", AbsoluteIndexedX, 7, rol),
        0x40 => op!("RTI", Implied, 6, rti),
        0x41 => op!("EOR", IndirectX, 6, eor),
        0x45 => op!("EOR", ZeroPage, 3, eor),
        0x46 => op!("LSR", ZeroPage, 5, lsr),
        0x48 => op!("PHA", Implied, 3, pha),
        0x49 => op!("EOR", Immediate, 2, eor),
        0x4a => op!("LSR", RegisterA, 2, lsr),
        0x4c => op!("JMP", Absolute, 3, jmp),
        0x4d => op!("EOR", Absolute, 4, eor),
        0x4e => op!("LSR", Absolute, 6, lsr),
        0x50 => op!("BVC", Relative, 2, bvc),
        0x51 => op!("EOR", IndirectY, 5, eor),
        0x55 => op!("EOR", ZeroPageX, 4, eor),
        0x56 => op!("LSR", ZeroPageX, 6, lsr),
        0x58 => op!("CLI", Implied, 2, cli),
        0x59 => op!("EOR", AbsoluteIndexedY, 4, eor),
        0x5d => op!("EOR", AbsoluteIndexedX, 4, eor),
        0x5e => op!("LSR", AbsoluteIndexedX, 7, lsr),
        0x60 => op!("RTS", Implied, 6, rts),
        0x61 => op!("ADC", IndirectX, 6, adc),
        0x65 => op!("ADC", ZeroPage, 3, adc),
        0x66 => op!("ROR", ZeroPage, 5, ror),
        0x68 => op!("PLA", Implied, 4, pla),
        0x69 => op!("ADC", Immediate, 2, adc),
        0x6a => op!("ROR", RegisterA, 2, ror),
        0x6c => op!("JMP", Indirect, 5, jmp),
        0x6d => op!("ADC", Absolute, 4, adc),
        0x6e => op!("ROR", Absolute, 6, ror),
        0x70 => op!("BVS", Relative, 2, bvs),
        0x71 => op!("ADC", IndirectY, 5, adc),
        0x75 => op!("ADC", ZeroPageX, 4, adc),
        0x76 => op!("ROR", ZeroPageX, 6, ror),
        0x78 => op!("SEI", Implied, 2, sei),
        0x79 => op!("ADC", AbsoluteIndexedY, 4, adc),
        0x7d => op!("ADC", AbsoluteIndexedX, 4, adc),
        0x7e => op!("ROR", AbsoluteIndexedX, 7, ror),
        0x81 => op!("STA", IndirectX, 6, sta),
        0x84 => op!("STY", ZeroPage, 3, sty),
        0x85 => op!("STA", ZeroPage, 3, sta),
        0x86 => op!("STX", ZeroPage, 3, stx),
        0x88 => op!("DEY", Implied, 2, dey),
        0x8a => op!("TXA", Implied, 2, txa),
        0x8c => op!("STY", Absolute, 4, sty),
        0x8d => op!("STA", Absolute, 4, sta),
        0x8e => op!("STX", Absolute, 4, stx),
        0x90 => op!("BCC", Relative, 2, bcc),
        0x91 => op!("STA", IndirectY, 6, sta),
        0x94 => op!("STY", ZeroPageX, 4, sty),
        0x95 => op!("STA", ZeroPageX, 4, sta),
        0x96 => op!("STX", ZeroPageY, 4, stx),
        0x98 => op!("TYA", Implied, 2, tya),
        0x99 => op!("STA", AbsoluteIndexedY, 5, sta),
        0x9a => op!("TXS", Implied, 2, txs),
        0x9d => op!("STA", AbsoluteIndexedX, 5, sta),
        0xa0 => op!("LDY", Immediate, 2, ldy),
        0xa1 => op!("LDA", IndirectX, 6, lda),
        0xa2 => op!("LDX", Immediate, 2, ldx),
        0xa4 => op!("LDY", ZeroPage, 3, ldy),
        0xa5 => op!("LDA", ZeroPage, 3, lda),
        0xa6 => op!("LDX", ZeroPage, 3, ldx),
        0xa8 => op!("TAY", Implied, 2, tay),
        0xa9 => op!("LDA", Immediate, 2, lda),
        0xaa => op!("TAX", Implied, 2, tax),
        0xac => op!("LDY", Absolute, 4, ldy),
        0xad => op!("LDA", Absolute, 4, lda),
        0xae => op!("LDX", Absolute, 4, ldx),
        0xb0 => op!("BCS", Relative, 2, bcs),
        0xb1 => op!("LDA", IndirectY, 5, lda),
        0xb4 => op!("LDY", ZeroPageX, 4, ldy),
        0xb5 => op!("LDA", ZeroPageX, 4, lda),
        0xb6 => op!("LDX", ZeroPageY, 4, ldx),
        0xb8 => op!("CLV", Implied, 2, clv),
        0xb9 => op!("LDA", AbsoluteIndexedY, 4, lda),
        0xba => op!("TSX", Implied, 2, tsx),
        0xbc => op!("LDY", AbsoluteIndexedX, 4, ldy),
        0xbd => op!("LDA", AbsoluteIndexedX, 4, lda),
        0xbe => op!("LDX", AbsoluteIndexedY, 4, ldx),
        0xc0 => op!("CPY", Immediate, 2, cpy),
        0xc1 => op!("CMP", IndirectX, 6, cmp),
        0xc4 => op!("CPY", ZeroPage, 3, cpy),
        0xc5 => op!("CMP", ZeroPage, 3, cmp),
        0xc6 => op!("DEC", ZeroPage, 5, dec),
        0xc8 => op!("INY", Implied, 2, iny),
        0xc9 => op!("CMP", Immediate, 2, cmp),
        0xca => op!("DEX", Implied, 2, dex),
        0xcc => op!("CPY", Absolute, 4, cpy),
        0xcd => op!("CMP", Absolute, 4, cmp),
        0xce => op!("DEC", Absolute, 6, dec),
        0xd0 => op!("BNE", Relative, 2, bne),
        0xd1 => op!("CMP", IndirectY, 5, cmp),
        0xd5 => op!("CMP", ZeroPageX, 4, cmp),
        0xd6 => op!("DEC", ZeroPageX, 6, dec),
        0xd8 => op!("CLD", Implied, 2, cld),
        0xd9 => op!("CMP", AbsoluteIndexedY, 4, cmp),
        0xdd => op!("CMP", AbsoluteIndexedX, 4, cmp),
        0xde => op!("DEC", AbsoluteIndexedX, 7, dec),
        0xe0 => op!("CPX", Immediate, 2, cpx),
        0xe1 => op!("SBC", IndirectX, 6, sbc),
        0xe4 => op!("CPX", ZeroPage, 3, cpx),
        0xe5 => op!("SBC", ZeroPage, 3, sbc),
        0xe6 => op!("INC", ZeroPage, 5, inc),
        0xe8 => op!("INX", Implied, 2, inx),
        0xe9 => op!("SBC", Immediate, 2, sbc),
        0xea => op!("NOP", Implied, 2, nop),
        0xec => op!("CPX", Absolute, 4, cpx),
        0xed => op!("SBC", Absolute, 4, sbc),
        0xee => op!("INC", Absolute, 6, inc),
        0xf0 => op!("BEQ", Relative, 2, beq),
        0xf1 => op!("SBC", IndirectY, 5, sbc),
        0xf5 => op!("SBC", ZeroPageX, 4, sbc),
        0xf6 => op!("INC", ZeroPageX, 6, inc),
        0xf8 => op!("SED", Implied, 2, sed),
        0xf9 => op!("SBC", AbsoluteIndexedY, 4, sbc),
        0xfd => op!("SBC", AbsoluteIndexedX, 4, sbc),
        0xfe => op!("INC", AbsoluteIndexedX, 7, inc),
        _ => op!("???", Implied, 2, unofficial),
    }
}
