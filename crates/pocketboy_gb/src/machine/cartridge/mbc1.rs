use super::{banked_index, CartridgeHeader, RAM_BANK_SIZE, ROM_BANK_SIZE};

/// MBC1 controller.
///
/// Two banking modes share a 2-bit upper register. In mode 0 it supplies
/// bits 5–6 of the switchable ROM bank only. In mode 1 it also selects the
/// bank mapped at 0000–3FFF and the external RAM bank.
pub struct Mbc1Cartridge {
    rom: Vec<u8>,
    ram: Vec<u8>,
    header: CartridgeHeader,
    num_rom_banks: usize,
    rom_bank_low5: u8,
    rom_bank_high2: u8,
    ram_enable: bool,
    banking_mode: u8,
}

impl Mbc1Cartridge {
    pub(super) fn new(rom: Vec<u8>, header: CartridgeHeader) -> Self {
        let num_rom_banks = header.rom_banks().unwrap_or(2).max(2);
        let ram = vec![0xFF; header.ram_size()];
        Self {
            rom,
            ram,
            header,
            num_rom_banks,
            rom_bank_low5: 1,
            rom_bank_high2: 0,
            ram_enable: false,
            banking_mode: 0,
        }
    }

    pub(super) fn header(&self) -> &CartridgeHeader {
        &self.header
    }

    /// Bank mapped at 0000–3FFF or 4000–7FFF, reduced modulo the bank count.
    fn effective_rom_bank(&self, addr: u16) -> usize {
        let high = (self.rom_bank_high2 as usize) << 5;
        let bank = if addr < 0x4000 {
            if self.banking_mode == 1 {
                high
            } else {
                0
            }
        } else {
            high | self.rom_bank_low5 as usize
        };
        bank % self.num_rom_banks
    }

    fn effective_ram_bank(&self) -> usize {
        if self.banking_mode == 1 {
            self.rom_bank_high2 as usize
        } else {
            0
        }
    }

    pub(super) fn rom_read(&self, addr: u16) -> u8 {
        let index = banked_index(self.effective_rom_bank(addr), addr, ROM_BANK_SIZE);
        self.rom.get(index).copied().unwrap_or(0xFF)
    }

    pub(super) fn rom_write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram_enable = value & 0x0F == 0x0A,
            0x2000..=0x3FFF => {
                // Zero in the low five bits selects bank 1.
                self.rom_bank_low5 = (value & 0x1F).max(1);
                log::debug!("MBC1 ROM bank low bits = {:#04X}", self.rom_bank_low5);
            }
            0x4000..=0x5FFF => self.rom_bank_high2 = value & 0x03,
            0x6000..=0x7FFF => self.banking_mode = value & 0x01,
            _ => {}
        }
    }

    fn ram_index(&self, addr: u16) -> Option<usize> {
        if !self.ram_enable || self.ram.is_empty() {
            return None;
        }
        let index = banked_index(self.effective_ram_bank(), addr, RAM_BANK_SIZE);
        Some(index % self.ram.len())
    }

    pub(super) fn ram_read(&self, addr: u16) -> u8 {
        self.ram_index(addr).map_or(0xFF, |i| self.ram[i])
    }

    pub(super) fn ram_write(&mut self, addr: u16, value: u8) {
        if let Some(i) = self.ram_index(addr) {
            self.ram[i] = value;
        }
    }
}
