use super::regs::{Lcdc, Mode, Stat, STAT_COINCIDENCE};
use super::Ppu;
use crate::machine::interrupts::InterruptController;

impl Ppu {
    pub fn read_register(&self, addr: u16) -> u8 {
        match addr {
            0xFF40 => self.lcdc.bits(),
            0xFF41 => self.read_stat(),
            0xFF42 => self.scy,
            0xFF43 => self.scx,
            0xFF44 => self.ly,
            0xFF45 => self.lyc,
            0xFF47 => self.bgp,
            0xFF48 => self.obp0,
            0xFF49 => self.obp1,
            0xFF4A => self.wy,
            0xFF4B => self.wx,
            _ => 0xFF,
        }
    }

    pub fn write_register(&mut self, addr: u16, value: u8, interrupts: &mut InterruptController) {
        match addr {
            0xFF40 => self.write_lcdc(value, interrupts),
            0xFF41 => self.stat = Stat::from_bits_truncate(value),
            0xFF42 => self.scy = value,
            0xFF43 => self.scx = value,
            // LY is read-only.
            0xFF44 => {}
            0xFF45 => {
                self.lyc = value;
                if self.lcd_enabled() {
                    self.compare_lyc(interrupts);
                }
            }
            0xFF47 => self.bgp = value,
            0xFF48 => self.obp0 = value,
            0xFF49 => self.obp1 = value,
            0xFF4A => self.wy = value,
            0xFF4B => self.wx = value,
            _ => log::warn!("PPU: write to unmapped register {addr:#06X} = {value:#04X}"),
        }
    }

    /// `0x80 | selects | coincidence | mode`. Mode reads 0 while the LCD is off.
    fn read_stat(&self) -> u8 {
        let mode = if self.lcd_enabled() {
            self.mode
        } else {
            Mode::HBlank
        };
        let coincidence = if self.ly == self.lyc {
            STAT_COINCIDENCE
        } else {
            0
        };
        0x80 | self.stat.bits() | coincidence | mode as u8
    }

    fn write_lcdc(&mut self, value: u8, interrupts: &mut InterruptController) {
        let was_enabled = self.lcd_enabled();
        self.lcdc = Lcdc::from_bits_retain(value);
        match (was_enabled, self.lcd_enabled()) {
            (true, false) => self.lcd_off(),
            (false, true) => self.lcd_on(interrupts),
            _ => {}
        }
    }

    #[inline]
    pub fn read_vram(&self, addr: u16) -> u8 {
        self.vram.read((addr & 0x1FFF) as usize)
    }

    #[inline]
    pub fn write_vram(&mut self, addr: u16, value: u8) {
        self.vram.write((addr & 0x1FFF) as usize, value);
    }

    /// FE00–FE9F; anything past the table reads 0xFF.
    #[inline]
    pub fn read_oam(&self, addr: u16) -> u8 {
        self.oam.read(addr.wrapping_sub(0xFE00) as usize)
    }

    #[inline]
    pub fn write_oam(&mut self, addr: u16, value: u8) {
        self.oam.write(addr.wrapping_sub(0xFE00) as usize, value);
    }
}
