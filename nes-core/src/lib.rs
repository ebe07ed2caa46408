#![allow(clippy::new_without_default)]

pub mod bus;
pub mod constants;
pub mod cpu_6502;
pub mod log;
pub mod mappers;
pub mod nes_core;
pub mod opcodes;
pub mod ppu;
pub mod rom;
pub mod trace;
