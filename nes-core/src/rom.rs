use std::fmt;
use std::fs::File;
use std::io;
use std::io::prelude::*;
use std::path::Path;

#[derive(Debug)]
pub enum Mirroring {
    Horizontal,
    Vertical,
}

#[derive(Debug)]
pub enum TvSystem {
    Ntsc,
    Pal,
    DualCompatible,
}

#[derive(Debug)]
pub struct Header {
    pub prg_rom_bytes: u32,
    pub prg_rom_banks: u8,
    pub character_rom_bytes: u32,
    pub character_rom_banks: u8,
    pub mirroring: Mirroring,
    pub persistent_memory: bool,
    pub has_trainer: bool,
    pub four_screen_vram: bool,
    pub mapper_number: u8,
    pub vs_unisystem: bool,
    pub playchoice_10: bool,
    pub nes_2_0: bool,
    pub prg_ram_size: u32,
    pub tv_system: TvSystem,
}

#[derive(Debug)]
pub enum RomError {
    Io(io::Error),
    Message(&'static str),
}

impl fmt::Display for RomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RomError::Io(err) => write!(f, "failed to read ROM file: {}", err),
            RomError::Message(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for RomError {}

impl From<io::Error> for RomError {
    fn from(error: io::Error) -> Self {
        RomError::Io(error)
    }
}

impl From<&'static str> for RomError {
    fn from(message: &'static str) -> Self {
        RomError::Message(message)
    }
}

struct Byte {
    value: u8,
}

impl Byte {
    /// Get the bit where 0 is the least significant bit, and 7 is the most.
    fn bit(&self, n: u8) -> bool {
        (0b0000_0001 << n) & self.value != 0
    }
}

pub struct Rom {
    pub header: Header,
    pub program_rom: Vec<u8>,
    pub character_rom: Vec<u8>,
    pub trainer: Option<Vec<u8>>,
    pub title: Option<String>,
}

impl Rom {
    /// https://wiki.nesdev.com/w/index.php/INES
    pub fn load_ines_file(path: &Path) -> Result<Rom, RomError> {
        let mut file = File::open(path)?;
        Rom::load_ines(&mut file)
    }

    pub fn load_ines_bytes(bytes: &[u8]) -> Result<Rom, RomError> {
        let mut cursor = io::Cursor::new(bytes);
        Rom::load_ines(&mut cursor)
    }

    fn load_ines<R: Read>(reader: &mut R) -> Result<Rom, RomError> {
        let header_bytes = read_bytes(reader, 16)?;
        let header = process_header(&header_bytes[..])?;

        let trainer = if header.has_trainer {
            Some(read_bytes(reader, 512)?)
        } else {
            None
        };

        let program_rom = read_bytes(reader, header.prg_rom_bytes as usize)?;
        let character_rom = read_bytes(reader, header.character_rom_bytes as usize)?;

        if header.playchoice_10 {
            // PlayChoice-10 hint-screen data is not used by this core; skip it.
            let _ = read_bytes(reader, 8192 + 32);
        }

        let mut title_bytes = Vec::new();
        reader.read_to_end(&mut title_bytes)?;
        let title = if title_bytes.is_empty() {
            None
        } else {
            let mut title = String::new();
            for ch in &title_bytes {
                if *ch == 0 {
                    break;
                }
                title.push(*ch as char);
            }
            Some(String::from(title.trim()))
        };

        if header.mapper_number != 0 {
            return Err(RomError::Message(
                "only mapper 0 (NROM) is supported by this core",
            ));
        }

        Ok(Rom {
            program_rom,
            character_rom,
            header,
            trainer,
            title,
        })
    }
}

fn process_header(header: &[u8]) -> Result<Header, RomError> {
    // 0-3: Constant $4E $45 $53 $1A ("NES" followed by MS-DOS end-of-file)
    if header.len() < 16 || header[0..4] != [0x4e, 0x45, 0x53, 0x1a] {
        return Err(RomError::Message(
            "this does not appear to be an iNES file",
        ));
    }

    // 4: Size of PRG ROM in 16 KB units.
    let prg_rom_banks = header[4];
    if prg_rom_banks == 0 {
        return Err(RomError::Message("ROM declares zero PRG ROM banks"));
    }
    let prg_rom_bytes: u32 = prg_rom_banks as u32 * 16 * 1024;

    // 5: Size of CHR ROM in 8 KB units (0 means the board uses CHR RAM).
    let character_rom_banks: u8 = header[5];
    let character_rom_bytes: u32 = character_rom_banks as u32 * 8 * 1024;

    let flag6 = Byte { value: header[6] };
    let flag7 = Byte { value: header[7] };
    let flag8 = Byte { value: header[8] };
    let flag9 = Byte { value: header[9] };

    let mirroring = if flag6.bit(0) {
        Mirroring::Vertical
    } else {
        Mirroring::Horizontal
    };
    let persistent_memory = flag6.bit(1);
    let has_trainer = flag6.bit(2);
    let four_screen_vram = flag6.bit(3);
    let mapper_number_lower = flag6.value >> 4;

    let vs_unisystem = flag7.bit(0);
    let playchoice_10 = flag7.bit(1);
    let nes_2_0 = flag7.bit(3) && !flag7.bit(2);
    let mapper_number_upper = flag7.value & 0b1111_0000;
    let mapper_number = mapper_number_upper | mapper_number_lower;

    if nes_2_0 {
        return Err(RomError::Message(
            "NES 2.0 headers are not currently supported",
        ));
    }

    // 8: PRG-RAM size (rarely used extension).
    let prg_ram_size = flag8.value.max(1) as u32 * 8 * 1024;

    // 9: TV system (rarely used extension).
    let tv_system = if flag9.bit(0) {
        TvSystem::Pal
    } else {
        TvSystem::Ntsc
    };

    Ok(Header {
        prg_rom_banks,
        prg_rom_bytes,
        character_rom_banks,
        character_rom_bytes,
        mirroring,
        persistent_memory,
        has_trainer,
        four_screen_vram,
        mapper_number,
        vs_unisystem,
        playchoice_10,
        nes_2_0,
        prg_ram_size,
        tv_system,
    })
}

fn read_bytes<R: Read>(reader: &mut R, size: usize) -> Result<Vec<u8>, io::Error> {
    let mut vec = vec![0u8; size];
    reader.read_exact(&mut vec)?;
    Ok(vec)
}
