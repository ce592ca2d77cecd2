mod header;
mod mbc1;
mod mbc3;
mod rom_only;
mod rtc;

use anyhow::Result;

pub use header::{CartridgeHeader, MapperKind};
pub use mbc1::Mbc1Cartridge;
pub use mbc3::Mbc3Cartridge;
pub use rom_only::RomOnlyCartridge;
pub use rtc::{Rtc, RtcRegisters};

pub(crate) const ROM_BANK_SIZE: usize = 0x4000;
pub(crate) const RAM_BANK_SIZE: usize = 0x2000;

/// Byte index of `addr` within a banked window of `bank_size` bytes.
#[inline]
pub(crate) fn banked_index(bank: usize, addr: u16, bank_size: usize) -> usize {
    bank * bank_size + (addr as usize & (bank_size - 1))
}

/// Loaded cartridge, dispatching to its bank controller.
pub enum Cartridge {
    RomOnly(RomOnlyCartridge),
    Mbc1(Mbc1Cartridge),
    Mbc3(Mbc3Cartridge),
}

impl Cartridge {
    /// Parse the header and build the matching controller. Unsupported
    /// type or size codes and images shorter than the header are errors.
    pub fn from_rom(rom: Vec<u8>) -> Result<Self> {
        let header = CartridgeHeader::parse(&rom)?;
        let mapper = header.mapper()?;
        log::info!(
            "cartridge \"{}\": type {:#04X} ({:?}), {} ROM banks, {} bytes RAM{}",
            header.title,
            header.cartridge_type,
            mapper,
            header.rom_banks().unwrap_or(0),
            header.ram_size(),
            if header.has_rtc() { ", RTC" } else { "" },
        );

        Ok(match mapper {
            MapperKind::RomOnly => Cartridge::RomOnly(RomOnlyCartridge::new(rom, header)),
            MapperKind::Mbc1 => Cartridge::Mbc1(Mbc1Cartridge::new(rom, header)),
            MapperKind::Mbc3 => Cartridge::Mbc3(Mbc3Cartridge::new(rom, header)),
        })
    }

    pub fn header(&self) -> &CartridgeHeader {
        match self {
            Cartridge::RomOnly(c) => c.header(),
            Cartridge::Mbc1(c) => c.header(),
            Cartridge::Mbc3(c) => c.header(),
        }
    }

    /// Read from 0000–7FFF or A000–BFFF.
    pub fn read(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x7FFF => self.rom_read(addr),
            0xA000..=0xBFFF => self.ram_read(addr),
            _ => 0xFF,
        }
    }

    /// Write to 0000–7FFF (controller registers) or A000–BFFF.
    pub fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x7FFF => self.rom_write(addr, value),
            0xA000..=0xBFFF => self.ram_write(addr, value),
            _ => {}
        }
    }

    pub fn rom_read(&self, addr: u16) -> u8 {
        match self {
            Cartridge::RomOnly(c) => c.rom_read(addr),
            Cartridge::Mbc1(c) => c.rom_read(addr),
            Cartridge::Mbc3(c) => c.rom_read(addr),
        }
    }

    pub fn rom_write(&mut self, addr: u16, value: u8) {
        match self {
            // No controller registers: writes are dropped.
            Cartridge::RomOnly(_) => {}
            Cartridge::Mbc1(c) => c.rom_write(addr, value),
            Cartridge::Mbc3(c) => c.rom_write(addr, value),
        }
    }

    pub fn ram_read(&self, addr: u16) -> u8 {
        match self {
            Cartridge::RomOnly(c) => c.ram_read(addr),
            Cartridge::Mbc1(c) => c.ram_read(addr),
            Cartridge::Mbc3(c) => c.ram_read(addr),
        }
    }

    pub fn ram_write(&mut self, addr: u16, value: u8) {
        match self {
            Cartridge::RomOnly(c) => c.ram_write(addr, value),
            Cartridge::Mbc1(c) => c.ram_write(addr, value),
            Cartridge::Mbc3(c) => c.ram_write(addr, value),
        }
    }
}
