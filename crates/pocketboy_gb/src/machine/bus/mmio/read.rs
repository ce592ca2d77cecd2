use super::super::GameBoyBus;

impl GameBoyBus {
    pub(in crate::machine::bus) fn read8_mmio(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x00FF if self.boot_rom.is_some() => self
                .boot_rom
                .as_ref()
                .map_or(0xFF, |rom| rom.read(addr as usize)),
            0x0000..=0x7FFF => self.cartridge.read(addr),
            0x8000..=0x9FFF => self.ppu.read_vram(addr),
            0xA000..=0xBFFF => self.cartridge.read(addr),
            0xC000..=0xDFFF => self.wram.read((addr - 0xC000) as usize),
            // Echo RAM mirrors C000–DDFF.
            0xE000..=0xFDFF => self.wram.read((addr - 0xE000) as usize),
            0xFE00..=0xFE9F => self.ppu.read_oam(addr),
            0xFEA0..=0xFEFF => 0xFF,

            0xFF00 => self.joypad.read(),
            0xFF01 | 0xFF02 => self.serial.read(addr),
            0xFF04..=0xFF07 => self.timer.read(addr),
            0xFF0F => self.interrupts.read_if() | 0xE0,
            0xFF46 => self.dma_source,
            0xFF40..=0xFF4B => self.ppu.read_register(addr),
            0xFF50 => 0xFF,
            0xFF00..=0xFF7F => self.io.read(Self::io_offset(addr)),

            0xFF80..=0xFFFE => self.hram.read((addr - 0xFF80) as usize),
            0xFFFF => self.interrupts.read_ie(),
        }
    }
}
