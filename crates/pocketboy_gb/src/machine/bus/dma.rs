use super::GameBoyBus;
use crate::machine::ppu::OAM_SIZE;

impl GameBoyBus {
    /// OAM DMA: copy 160 bytes from `value << 8` to FE00–FE9F through the
    /// normal read path. The transfer completes immediately.
    pub(super) fn oam_dma(&mut self, value: u8) {
        let base = (value as u16) << 8;
        for i in 0..OAM_SIZE as u16 {
            let byte = self.read8_mmio(base.wrapping_add(i));
            self.ppu.write_oam(0xFE00 + i, byte);
        }
        self.dma_source = value;
        log::trace!("OAM DMA from {base:#06X}");
    }
}
