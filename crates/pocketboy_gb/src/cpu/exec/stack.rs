use crate::cpu::{Bus, Cpu, Reg16};

impl Cpu {
    pub(crate) fn push_rr(&mut self, bus: &mut dyn Bus, opcode: u8) -> bool {
        let value = self.regs.get16(Reg16::from_rp2(opcode >> 4));
        self.push_u16(bus, value);
        false
    }

    /// POP AF drops the low nibble of F through `set_af`.
    pub(crate) fn pop_rr(&mut self, bus: &mut dyn Bus, opcode: u8) -> bool {
        let value = self.pop_u16(bus);
        self.regs.set16(Reg16::from_rp2(opcode >> 4), value);
        false
    }
}
