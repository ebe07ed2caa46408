/// A stub picture unit. Real PPU rendering, sprite evaluation, and VRAM are
/// out of scope for this core; test ROMs that poll PPUSTATUS for vblank only
/// need *something* to eventually set that bit so they make progress.
use crate::bus::SharedBus;
use crate::constants::DEFAULT_PPU_POLL_INTERVAL;

/// This register reflects the state of various functions inside the PPU. It
/// is often used for determining timing.
///
/// 7  bit  0
/// ---- ----
/// VSO. ....
/// |||| ||||
/// |+-------- Sprite 0 Hit (unused by this stub).
/// +--------- Vertical blank has started (0: not in vblank; 1: in vblank).
const PPU_STATUS: u16 = 0x2002;
const VBLANK_FLAG: u8 = 0b1000_0000;

pub struct Ppu {
    bus: SharedBus,
    poll_interval: u32,
    steps_since_vblank: u32,
}

impl Ppu {
    pub fn new(bus: SharedBus) -> Ppu {
        Ppu::with_poll_interval(bus, DEFAULT_PPU_POLL_INTERVAL)
    }

    pub fn with_poll_interval(bus: SharedBus, poll_interval: u32) -> Ppu {
        Ppu {
            bus,
            poll_interval,
            steps_since_vblank: 0,
        }
    }

    /// Called once per CPU step by the driver. Every `poll_interval` steps,
    /// sets the vblank bit so that a diagnostic ROM spin-waiting on PPUSTATUS
    /// makes progress; the bus clears the bit again the next time it is read.
    pub fn tick(&mut self) {
        self.steps_since_vblank += 1;
        if self.steps_since_vblank >= self.poll_interval {
            self.steps_since_vblank = 0;
            self.bus.borrow_mut().set_ppu_vblank(true);
        }
    }

    pub fn status_register_address() -> u16 {
        PPU_STATUS
    }

    pub fn vblank_flag() -> u8 {
        VBLANK_FLAG
    }
}
