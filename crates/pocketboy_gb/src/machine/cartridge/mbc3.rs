use std::time::Instant;

use super::rtc::{Rtc, RTC_DAY_HIGH, RTC_SECONDS};
use super::{banked_index, CartridgeHeader, RAM_BANK_SIZE, ROM_BANK_SIZE};

/// MBC3 controller: 7-bit ROM bank, four RAM banks and, on types
/// 0x0F/0x10, a real-time clock selected through the RAM bank register.
pub struct Mbc3Cartridge {
    rom: Vec<u8>,
    ram: Vec<u8>,
    header: CartridgeHeader,
    num_rom_banks: usize,
    rom_bank: u8,
    /// 0x00–0x03 selects a RAM bank, 0x08–0x0C an RTC register.
    ram_rtc_select: u8,
    ram_enable: bool,
    rtc: Option<Rtc>,
}

impl Mbc3Cartridge {
    pub(super) fn new(rom: Vec<u8>, header: CartridgeHeader) -> Self {
        let num_rom_banks = header.rom_banks().unwrap_or(2).max(2);
        let ram = vec![0xFF; header.ram_size()];
        let rtc = header.has_rtc().then(|| Rtc::new(Instant::now()));
        Self {
            rom,
            ram,
            header,
            num_rom_banks,
            rom_bank: 1,
            ram_rtc_select: 0,
            ram_enable: false,
            rtc,
        }
    }

    pub(super) fn header(&self) -> &CartridgeHeader {
        &self.header
    }

    pub fn rtc(&self) -> Option<&Rtc> {
        self.rtc.as_ref()
    }

    pub(super) fn rom_read(&self, addr: u16) -> u8 {
        let bank = if addr < 0x4000 {
            0
        } else {
            self.rom_bank as usize % self.num_rom_banks
        };
        let index = banked_index(bank, addr, ROM_BANK_SIZE);
        self.rom.get(index).copied().unwrap_or(0xFF)
    }

    pub(super) fn rom_write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram_enable = value & 0x0F == 0x0A,
            0x2000..=0x3FFF => {
                self.rom_bank = (value & 0x7F).max(1);
                log::debug!("MBC3 ROM bank = {:#04X}", self.rom_bank);
            }
            0x4000..=0x5FFF => self.ram_rtc_select = value,
            0x6000..=0x7FFF => {
                if let Some(rtc) = self.rtc.as_mut() {
                    rtc.write_latch(value, Instant::now());
                }
            }
            _ => {}
        }
    }

    fn ram_index(&self, addr: u16) -> Option<usize> {
        if self.ram.is_empty() {
            return None;
        }
        let bank = self.ram_rtc_select as usize & 0x03;
        Some(banked_index(bank, addr, RAM_BANK_SIZE) % self.ram.len())
    }

    fn selects_rtc(&self) -> bool {
        (RTC_SECONDS..=RTC_DAY_HIGH).contains(&self.ram_rtc_select)
    }

    pub(super) fn ram_read(&self, addr: u16) -> u8 {
        if !self.ram_enable {
            return 0xFF;
        }
        match self.ram_rtc_select {
            0x00..=0x03 => self.ram_index(addr).map_or(0xFF, |i| self.ram[i]),
            _ if self.selects_rtc() => self
                .rtc
                .as_ref()
                .map_or(0xFF, |rtc| rtc.read(self.ram_rtc_select)),
            _ => 0xFF,
        }
    }

    pub(super) fn ram_write(&mut self, addr: u16, value: u8) {
        if !self.ram_enable {
            return;
        }
        match self.ram_rtc_select {
            0x00..=0x03 => {
                if let Some(i) = self.ram_index(addr) {
                    self.ram[i] = value;
                }
            }
            select if self.selects_rtc() => {
                if let Some(rtc) = self.rtc.as_mut() {
                    rtc.write(select, value, Instant::now());
                }
            }
            _ => {}
        }
    }
}
