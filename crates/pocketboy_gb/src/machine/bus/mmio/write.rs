use super::super::GameBoyBus;

impl GameBoyBus {
    pub(in crate::machine::bus) fn write8_mmio(&mut self, addr: u16, value: u8) {
        match addr {
            // Bank controller registers; the boot ROM overlay is read-only
            // and does not intercept them.
            0x0000..=0x7FFF => self.cartridge.write(addr, value),
            0x8000..=0x9FFF => self.ppu.write_vram(addr, value),
            0xA000..=0xBFFF => self.cartridge.write(addr, value),
            0xC000..=0xDFFF => self.wram.write((addr - 0xC000) as usize, value),
            0xE000..=0xFDFF => self.wram.write((addr - 0xE000) as usize, value),
            0xFE00..=0xFE9F => self.ppu.write_oam(addr, value),
            0xFEA0..=0xFEFF => {}

            0xFF00 => self.joypad.write(value),
            0xFF01 | 0xFF02 => self.serial.write(addr, value, &mut self.interrupts),
            0xFF04..=0xFF07 => self.timer.write(addr, value),
            0xFF0F => self.interrupts.write(addr, value),
            0xFF46 => self.oam_dma(value),
            0xFF40..=0xFF4B => self.ppu.write_register(addr, value, &mut self.interrupts),
            0xFF50 => {
                if value != 0 && self.boot_rom.take().is_some() {
                    log::debug!("boot ROM disabled");
                }
            }
            0xFF00..=0xFF7F => self.io.write(Self::io_offset(addr), value),

            0xFF80..=0xFFFE => self.hram.write((addr - 0xFF80) as usize, value),
            0xFFFF => self.interrupts.write(addr, value),
        }
    }
}
