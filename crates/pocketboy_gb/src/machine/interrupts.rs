use bitflags::bitflags;

bitflags! {
    /// Interrupt sources as laid out in IF (FF0F) and IE (FFFF). Lower bits
    /// have higher dispatch priority.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Interrupt: u8 {
        const VBLANK = 1 << 0;
        const LCD_STAT = 1 << 1;
        const TIMER = 1 << 2;
        const SERIAL = 1 << 3;
        const JOYPAD = 1 << 4;
    }
}

/// IF/IE pair. Priority lives in the CPU, not here.
#[derive(Clone, Debug, Default)]
pub struct InterruptController {
    flags: Interrupt,
    enable: u8,
}

impl InterruptController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self, source: Interrupt) {
        self.flags |= source;
    }

    pub fn clear(&mut self, source: Interrupt) {
        self.flags.remove(source);
    }

    pub fn is_requested(&self, source: Interrupt) -> bool {
        self.flags.contains(source)
    }

    /// IF with the five source bits only; the bus ORs in the unused bits.
    pub fn read_if(&self) -> u8 {
        self.flags.bits()
    }

    /// IE keeps all eight bits; only the low five gate dispatch.
    pub fn read_ie(&self) -> u8 {
        self.enable
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0xFF0F => self.flags = Interrupt::from_bits_truncate(value),
            0xFFFF => self.enable = value,
            _ => log::warn!("interrupt controller: write to unmapped {addr:#06X}"),
        }
    }

    /// Enabled and requested sources.
    pub fn pending(&self) -> Interrupt {
        self.flags & Interrupt::from_bits_truncate(self.enable)
    }
}
