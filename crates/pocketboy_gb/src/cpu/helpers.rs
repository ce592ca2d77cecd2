use super::{Bus, Cpu, Flag};

impl Cpu {
    #[inline]
    pub(crate) fn fetch8(&mut self, bus: &mut dyn Bus) -> u8 {
        let value = bus.read8(self.regs.pc);
        if self.halt_bug {
            // The byte after HALT is read twice: PC stays put exactly once.
            self.halt_bug = false;
        } else {
            self.regs.pc = self.regs.pc.wrapping_add(1);
        }
        value
    }

    #[inline]
    pub(crate) fn fetch16(&mut self, bus: &mut dyn Bus) -> u16 {
        let lo = self.fetch8(bus);
        let hi = self.fetch8(bus);
        u16::from_le_bytes([lo, hi])
    }

    /// Push high byte first so that memory[SP] = low, memory[SP+1] = high.
    #[inline]
    pub(crate) fn push_u16(&mut self, bus: &mut dyn Bus, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, hi);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, lo);
    }

    #[inline]
    pub(crate) fn pop_u16(&mut self, bus: &mut dyn Bus) -> u16 {
        let lo = bus.read8(self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(1);
        let hi = bus.read8(self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(1);
        u16::from_le_bytes([lo, hi])
    }

    /// Evaluate a 2-bit condition field: NZ, Z, NC, C.
    #[inline]
    pub(crate) fn condition(&self, cc: u8) -> bool {
        match cc & 0x03 {
            0 => !self.get_flag(Flag::Z),
            1 => self.get_flag(Flag::Z),
            2 => !self.get_flag(Flag::C),
            _ => self.get_flag(Flag::C),
        }
    }

    /// Relative jump. The displacement is relative to the byte after the
    /// operand and is always fetched, taken or not.
    pub(crate) fn jr(&mut self, bus: &mut dyn Bus, taken: bool) -> bool {
        let offset = self.fetch8(bus) as i8;
        if taken {
            self.regs.pc = self.regs.pc.wrapping_add(offset as u16);
        }
        taken
    }

    pub(crate) fn jp(&mut self, bus: &mut dyn Bus, taken: bool) -> bool {
        let addr = self.fetch16(bus);
        if taken {
            self.regs.pc = addr;
        }
        taken
    }

    pub(crate) fn call(&mut self, bus: &mut dyn Bus, taken: bool) -> bool {
        let addr = self.fetch16(bus);
        if taken {
            let ret = self.regs.pc;
            self.push_u16(bus, ret);
            self.regs.pc = addr;
        }
        taken
    }

    pub(crate) fn ret(&mut self, bus: &mut dyn Bus, taken: bool) -> bool {
        if taken {
            self.regs.pc = self.pop_u16(bus);
        }
        taken
    }

    /// IE & IF restricted to the five implemented sources.
    #[inline]
    pub(crate) fn pending_interrupts(&self, bus: &mut dyn Bus) -> u8 {
        bus.read8(0xFFFF) & bus.read8(0xFF0F) & 0x1F
    }
}
