use crate::cpu::{Bus, Cpu, Reg16};

impl Cpu {
    /// Address of the `(BC)`, `(DE)`, `(HL+)`, `(HL-)` forms, applying the
    /// post-increment/decrement to HL.
    fn indirect_pair(&mut self, opcode: u8) -> u16 {
        match (opcode >> 4) & 0x03 {
            0 => self.regs.bc(),
            1 => self.regs.de(),
            2 => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_add(1));
                hl
            }
            _ => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_sub(1));
                hl
            }
        }
    }

    pub(crate) fn ld_rr_d16(&mut self, bus: &mut dyn Bus, opcode: u8) -> bool {
        let value = self.fetch16(bus);
        self.regs.set16(Reg16::from_rp(opcode >> 4), value);
        false
    }

    pub(crate) fn ld_indirect_a(&mut self, bus: &mut dyn Bus, opcode: u8) -> bool {
        let addr = self.indirect_pair(opcode);
        bus.write8(addr, self.regs.a);
        false
    }

    pub(crate) fn ld_a_indirect(&mut self, bus: &mut dyn Bus, opcode: u8) -> bool {
        let addr = self.indirect_pair(opcode);
        self.regs.a = bus.read8(addr);
        false
    }

    pub(crate) fn ld_r_d8(&mut self, bus: &mut dyn Bus, opcode: u8) -> bool {
        let dst = self.operand(opcode >> 3);
        let value = self.fetch8(bus);
        self.write_operand(bus, dst, value);
        false
    }

    /// LD r,r' over 0x40–0x7F (0x76 is HALT and never lands here).
    pub(crate) fn ld_r_r(&mut self, bus: &mut dyn Bus, opcode: u8) -> bool {
        let src = self.operand(opcode);
        let dst = self.operand(opcode >> 3);
        let value = self.read_operand(bus, src);
        self.write_operand(bus, dst, value);
        false
    }

    pub(crate) fn ld_a16_sp(&mut self, bus: &mut dyn Bus, _opcode: u8) -> bool {
        let addr = self.fetch16(bus);
        bus.write16(addr, self.regs.sp);
        false
    }

    /// LDH (a8),A (0xE0) and LDH A,(a8) (0xF0).
    pub(crate) fn ldh_a8(&mut self, bus: &mut dyn Bus, opcode: u8) -> bool {
        let addr = 0xFF00 | self.fetch8(bus) as u16;
        if opcode == 0xE0 {
            bus.write8(addr, self.regs.a);
        } else {
            self.regs.a = bus.read8(addr);
        }
        false
    }

    /// LD (C),A (0xE2) and LD A,(C) (0xF2).
    pub(crate) fn ldh_c(&mut self, bus: &mut dyn Bus, opcode: u8) -> bool {
        let addr = 0xFF00 | self.regs.c as u16;
        if opcode == 0xE2 {
            bus.write8(addr, self.regs.a);
        } else {
            self.regs.a = bus.read8(addr);
        }
        false
    }

    /// LD (a16),A (0xEA) and LD A,(a16) (0xFA).
    pub(crate) fn ld_a16_a(&mut self, bus: &mut dyn Bus, opcode: u8) -> bool {
        let addr = self.fetch16(bus);
        if opcode == 0xEA {
            bus.write8(addr, self.regs.a);
        } else {
            self.regs.a = bus.read8(addr);
        }
        false
    }

    pub(crate) fn ld_sp_hl(&mut self, _bus: &mut dyn Bus, _opcode: u8) -> bool {
        self.regs.sp = self.regs.hl();
        false
    }

    pub(crate) fn ld_hl_sp_e(&mut self, bus: &mut dyn Bus, _opcode: u8) -> bool {
        let e = self.fetch8(bus);
        let value = self.add16_signed(self.regs.sp, e);
        self.regs.set_hl(value);
        false
    }
}
