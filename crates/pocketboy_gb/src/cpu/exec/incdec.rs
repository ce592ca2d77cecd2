use crate::cpu::{Bus, Cpu, Reg16};

impl Cpu {
    pub(crate) fn inc_r(&mut self, bus: &mut dyn Bus, opcode: u8) -> bool {
        let target = self.operand(opcode >> 3);
        let value = self.read_operand(bus, target);
        let result = self.inc8(value);
        self.write_operand(bus, target, result);
        false
    }

    pub(crate) fn dec_r(&mut self, bus: &mut dyn Bus, opcode: u8) -> bool {
        let target = self.operand(opcode >> 3);
        let value = self.read_operand(bus, target);
        let result = self.dec8(value);
        self.write_operand(bus, target, result);
        false
    }

    /// INC rr. No flags.
    pub(crate) fn inc_rr(&mut self, _bus: &mut dyn Bus, opcode: u8) -> bool {
        let reg = Reg16::from_rp(opcode >> 4);
        let value = self.regs.get16(reg).wrapping_add(1);
        self.regs.set16(reg, value);
        false
    }

    /// DEC rr. No flags.
    pub(crate) fn dec_rr(&mut self, _bus: &mut dyn Bus, opcode: u8) -> bool {
        let reg = Reg16::from_rp(opcode >> 4);
        let value = self.regs.get16(reg).wrapping_sub(1);
        self.regs.set16(reg, value);
        false
    }
}
