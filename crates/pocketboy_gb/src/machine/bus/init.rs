use super::GameBoyBus;

/// Audio register values left by the boot ROM. Audio is not emulated,
/// but software can read them back.
const POST_BOOT_AUDIO: [(u16, u8); 21] = [
    (0xFF10, 0x80),
    (0xFF11, 0xBF),
    (0xFF12, 0xF3),
    (0xFF13, 0xFF),
    (0xFF14, 0xBF),
    (0xFF16, 0x3F),
    (0xFF17, 0x00),
    (0xFF18, 0xFF),
    (0xFF19, 0xBF),
    (0xFF1A, 0x7F),
    (0xFF1B, 0xFF),
    (0xFF1C, 0x9F),
    (0xFF1D, 0xFF),
    (0xFF1E, 0xBF),
    (0xFF20, 0xFF),
    (0xFF21, 0x00),
    (0xFF22, 0x00),
    (0xFF23, 0xBF),
    (0xFF24, 0x77),
    (0xFF25, 0xF3),
    (0xFF26, 0xF1),
];

impl GameBoyBus {
    /// I/O state matching what the DMG boot ROM leaves behind. Timer and
    /// PPU carry their own post-boot constructors.
    pub(super) fn apply_post_boot_io_state(&mut self) {
        self.randomize_internal_ram();
        for (addr, value) in POST_BOOT_AUDIO {
            self.io.write(Self::io_offset(addr), value);
        }
        // VBlank is left pending by the boot ROM's final frame.
        self.interrupts.write(0xFF0F, 0x01);
        self.interrupts.write(0xFFFF, 0x00);
    }

    /// WRAM and HRAM power up with noise. A fixed-seed xorshift keeps runs
    /// reproducible while software still cannot rely on zeroed memory.
    pub(super) fn randomize_internal_ram(&mut self) {
        let mut x: u32 = 0xC0DE_1234;
        let mut next_byte = || {
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            x as u8
        };
        for byte in self.wram.as_mut_slice() {
            *byte = next_byte();
        }
        for byte in self.hram.as_mut_slice() {
            *byte = next_byte();
        }
    }
}
