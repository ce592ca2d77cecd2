use super::{Bus, Cpu, Flag};

/// CB-prefixed handlers. The opcode layout is `xx yyy zzz`: `x` picks the
/// group, `y` the operation or bit index and `z` the operand.
impl Cpu {
    /// RLC/RRC/RL/RR/SLA/SRA/SWAP/SRL r (0x00–0x3F).
    pub(crate) fn cb_rotate(&mut self, bus: &mut dyn Bus, opcode: u8) -> bool {
        let target = self.operand(opcode);
        let value = self.read_operand(bus, target);
        let result = self.rotate_shift(opcode >> 3, value);
        self.write_operand(bus, target, result);
        false
    }

    /// BIT b,r (0x40–0x7F). C is preserved.
    pub(crate) fn cb_bit(&mut self, bus: &mut dyn Bus, opcode: u8) -> bool {
        let bit = (opcode >> 3) & 0x07;
        let target = self.operand(opcode);
        let value = self.read_operand(bus, target);
        self.set_flag(Flag::Z, value & (1 << bit) == 0);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, true);
        false
    }

    /// RES b,r (0x80–0xBF).
    pub(crate) fn cb_res(&mut self, bus: &mut dyn Bus, opcode: u8) -> bool {
        let bit = (opcode >> 3) & 0x07;
        let target = self.operand(opcode);
        let value = self.read_operand(bus, target);
        self.write_operand(bus, target, value & !(1 << bit));
        false
    }

    /// SET b,r (0xC0–0xFF).
    pub(crate) fn cb_set(&mut self, bus: &mut dyn Bus, opcode: u8) -> bool {
        let bit = (opcode >> 3) & 0x07;
        let target = self.operand(opcode);
        let value = self.read_operand(bus, target);
        self.write_operand(bus, target, value | (1 << bit));
        false
    }
}
