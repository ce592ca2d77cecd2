use super::{CartridgeHeader, RAM_BANK_SIZE};

/// 32 KiB ROM with no controller. Types 0x08/0x09 add up to 8 KiB of RAM.
pub struct RomOnlyCartridge {
    rom: Vec<u8>,
    ram: Vec<u8>,
    header: CartridgeHeader,
}

impl RomOnlyCartridge {
    pub(super) fn new(rom: Vec<u8>, header: CartridgeHeader) -> Self {
        let ram = vec![0xFF; header.ram_size().min(RAM_BANK_SIZE)];
        Self { rom, ram, header }
    }

    pub(super) fn header(&self) -> &CartridgeHeader {
        &self.header
    }

    pub(super) fn rom_read(&self, addr: u16) -> u8 {
        self.rom.get(addr as usize).copied().unwrap_or(0xFF)
    }

    pub(super) fn ram_read(&self, addr: u16) -> u8 {
        if self.ram.is_empty() {
            return 0xFF;
        }
        let offset = (addr as usize - 0xA000) % self.ram.len();
        self.ram[offset]
    }

    pub(super) fn ram_write(&mut self, addr: u16, value: u8) {
        if self.ram.is_empty() {
            return;
        }
        let offset = (addr as usize - 0xA000) % self.ram.len();
        self.ram[offset] = value;
    }
}
