//! DMG address map.
//!
//! | Range       | Target                                       |
//! |-------------|----------------------------------------------|
//! | 0000–00FF   | boot ROM while enabled, else cartridge       |
//! | 0100–7FFF   | cartridge ROM / bank controller registers    |
//! | 8000–9FFF   | VRAM                                         |
//! | A000–BFFF   | cartridge RAM / RTC                          |
//! | C000–DFFF   | work RAM                                     |
//! | E000–FDFF   | echo of C000–DDFF                            |
//! | FE00–FE9F   | OAM                                          |
//! | FEA0–FEFF   | unusable: reads 0xFF, writes dropped         |
//! | FF00–FF7F   | I/O registers                                |
//! | FF80–FFFE   | high RAM                                     |
//! | FFFF        | IE                                           |

mod dma;
mod init;
mod joypad;
mod mmio;

pub use joypad::{Button, JoypadHandle};

use super::cartridge::Cartridge;
use super::interrupts::InterruptController;
use super::memory::{Ram, Rom};
use super::ppu::Ppu;
use super::serial::Serial;
use super::timer::Timer;
use crate::cpu::Bus;
use joypad::Joypad;

pub const WRAM_SIZE: usize = 0x2000;
pub const HRAM_SIZE: usize = 0x7F;
pub const BOOT_ROM_SIZE: usize = 0x100;
const IO_SIZE: usize = 0x80;

pub struct GameBoyBus {
    /// Overlaid on 0000–00FF until FF50 is written.
    boot_rom: Option<Rom>,
    cartridge: Cartridge,
    wram: Ram,
    hram: Ram,
    /// Backing store for I/O addresses without a peripheral (audio and
    /// CGB registers): writes are kept and read back.
    io: Ram,
    dma_source: u8,
    joypad: Joypad,
    pub(crate) ppu: Ppu,
    pub(crate) timer: Timer,
    pub(crate) interrupts: InterruptController,
    pub(crate) serial: Serial,
}

impl GameBoyBus {
    /// Bus as the boot ROM leaves it: overlay disabled and I/O registers at
    /// their post-boot values.
    pub fn post_boot(cartridge: Cartridge, serial: Serial, ppu_start_offset: u32) -> Self {
        let mut bus = Self::with_parts(
            cartridge,
            None,
            serial,
            Ppu::with_post_boot_state(ppu_start_offset),
            Timer::with_post_boot_state(),
        );
        bus.apply_post_boot_io_state();
        bus
    }

    /// Power-on bus with `boot_rom` mapped at 0000–00FF.
    pub fn with_boot_rom(
        cartridge: Cartridge,
        boot_rom: Vec<u8>,
        serial: Serial,
        ppu_start_offset: u32,
    ) -> Self {
        let mut bus = Self::with_parts(
            cartridge,
            Some(Rom::new(boot_rom)),
            serial,
            Ppu::new(ppu_start_offset),
            Timer::new(),
        );
        bus.randomize_internal_ram();
        bus
    }

    fn with_parts(
        cartridge: Cartridge,
        boot_rom: Option<Rom>,
        serial: Serial,
        ppu: Ppu,
        timer: Timer,
    ) -> Self {
        Self {
            boot_rom,
            cartridge,
            wram: Ram::new(WRAM_SIZE),
            hram: Ram::new(HRAM_SIZE),
            io: Ram::filled(IO_SIZE, 0xFF),
            dma_source: 0xFF,
            joypad: Joypad::new(),
            ppu,
            timer,
            interrupts: InterruptController::new(),
            serial,
        }
    }

    pub fn boot_rom_enabled(&self) -> bool {
        self.boot_rom.is_some()
    }

    pub fn cartridge(&self) -> &Cartridge {
        &self.cartridge
    }

    pub fn ppu(&self) -> &Ppu {
        &self.ppu
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub fn interrupts(&self) -> &InterruptController {
        &self.interrupts
    }

    pub fn serial(&self) -> &Serial {
        &self.serial
    }

    pub fn serial_mut(&mut self) -> &mut Serial {
        &mut self.serial
    }

    pub fn joypad_handle(&self) -> JoypadHandle {
        self.joypad.handle()
    }

    /// Sample the host button mask and raise the joypad interrupt on a
    /// selected line going low.
    pub(crate) fn poll_joypad(&mut self) {
        self.joypad.poll(&mut self.interrupts);
    }
}

impl Bus for GameBoyBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.read8_mmio(addr)
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.write8_mmio(addr, value)
    }
}

#[cfg(test)]
mod tests;
