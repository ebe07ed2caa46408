use clap::Parser;
use colored::*;
use nes_core::nes_core::{DiagnosticStatus, NesCore};
use std::path::PathBuf;
use std::process::exit;

/// Load an iNES ROM and drive its CPU through the `blargg`-style
/// diagnostic protocol, printing the result once it settles.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to an iNES (.nes) ROM file
    rom: PathBuf,

    /// Maximum number of instructions to execute before giving up
    #[arg(long, default_value_t = 50_000_000)]
    max_steps: u64,

    /// Number of CPU steps between stub PPU vblank toggles
    #[arg(long, default_value_t = nes_core::constants::DEFAULT_PPU_POLL_INTERVAL)]
    ppu_poll_interval: u32,
}

fn main() {
    let cli = Cli::parse();

    let mut nes = match NesCore::load_rom_with_ppu_poll_interval(&cli.rom, cli.ppu_poll_interval) {
        Ok(nes) => nes,
        Err(err) => {
            eprintln!("{} {}", "failed to load ROM:".red(), err);
            exit(1);
        }
    };

    match nes.run_diagnostic(cli.max_steps) {
        DiagnosticStatus::Pass => {
            println!("{}", "PASS".green().bold());
        }
        DiagnosticStatus::Fail(message) => {
            println!("{}", "FAIL".red().bold());
            println!("{}", message);
            exit(1);
        }
        DiagnosticStatus::Running | DiagnosticStatus::NotStarted => {
            println!(
                "{}",
                format!(
                    "TIMEOUT: no result after {} steps",
                    cli.max_steps.to_string().yellow()
                )
                .yellow()
            );
            exit(2);
        }
    }
}
