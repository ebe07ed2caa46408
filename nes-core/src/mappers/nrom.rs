use super::Mapper;
use crate::constants::InterruptVectors;

const BANK_SIZE: usize = 0x4000;
const PRG_WINDOW: usize = 0x8000;

/// Mapper 0 (NROM). A single 16KB or 32KB PRG ROM bank mapped directly into
/// 0x8000-0xFFFF; a 16KB image is mirrored into both halves of that window.
pub struct Nrom {
    prg_rom: [u8; PRG_WINDOW],
}

impl Nrom {
    /// Build an NROM cartridge from a raw PRG ROM image as read from an iNES
    /// file, mirroring a 16KB bank into both halves of the window.
    pub fn from_prg_rom(prg_rom: &[u8]) -> Nrom {
        let mut window = [0u8; PRG_WINDOW];
        if prg_rom.len() == BANK_SIZE {
            window[..BANK_SIZE].copy_from_slice(prg_rom);
            window[BANK_SIZE..].copy_from_slice(prg_rom);
        } else if prg_rom.len() == PRG_WINDOW {
            window.copy_from_slice(prg_rom);
        } else {
            let len = prg_rom.len().min(PRG_WINDOW);
            window[..len].copy_from_slice(&prg_rom[..len]);
        }
        Nrom { prg_rom: window }
    }

    /// Build a cartridge directly from a raw program, for tests: the bytes
    /// are placed at the start of cartridge space and the reset vector is
    /// pointed at them.
    pub fn from_test_program(program: &[u8]) -> Nrom {
        let mut window = [0u8; PRG_WINDOW];
        assert!(
            program.len() <= PRG_WINDOW,
            "test program does not fit in cartridge space"
        );
        window[..program.len()].copy_from_slice(program);

        let reset_low = 0x00;
        let reset_high = 0x80;
        let vector_offset = (InterruptVectors::ResetVector as u16 & 0x7fff) as usize;
        window[vector_offset] = reset_low;
        window[vector_offset + 1] = reset_high;

        Nrom { prg_rom: window }
    }
}

impl Mapper for Nrom {
    fn read_prg(&self, addr: u16) -> u8 {
        self.prg_rom[(addr & 0x7fff) as usize]
    }

    fn write_prg(&mut self, _addr: u16, _value: u8) {
        // Real NROM cartridges have no bank-switch registers; writes into
        // ROM space are dropped.
    }
}
