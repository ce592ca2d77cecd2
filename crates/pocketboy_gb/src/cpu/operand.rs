use super::{Bus, Cpu, Reg8};

/// Source or destination of an 8-bit operation.
///
/// `(HL)` is resolved to a concrete address once, when the operand is
/// decoded, so read-modify-write instructions touch the same cell twice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand8 {
    Reg(Reg8),
    Indirect(u16),
}

impl Operand8 {
    /// Register names in opcode encoding order; slot 6 is `(HL)`.
    pub(crate) const NAMES: [&'static str; 8] = ["B", "C", "D", "E", "H", "L", "(HL)", "A"];

    pub(crate) fn is_indirect_index(index: u8) -> bool {
        index & 0x07 == 6
    }
}

impl Cpu {
    /// Decode a 3-bit register field:
    /// 0=B, 1=C, 2=D, 3=E, 4=H, 5=L, 6=(HL), 7=A.
    #[inline]
    pub(crate) fn operand(&self, index: u8) -> Operand8 {
        match index & 0x07 {
            0 => Operand8::Reg(Reg8::B),
            1 => Operand8::Reg(Reg8::C),
            2 => Operand8::Reg(Reg8::D),
            3 => Operand8::Reg(Reg8::E),
            4 => Operand8::Reg(Reg8::H),
            5 => Operand8::Reg(Reg8::L),
            6 => Operand8::Indirect(self.regs.hl()),
            _ => Operand8::Reg(Reg8::A),
        }
    }

    #[inline]
    pub(crate) fn read_operand(&mut self, bus: &mut dyn Bus, operand: Operand8) -> u8 {
        match operand {
            Operand8::Reg(reg) => self.regs.get8(reg),
            Operand8::Indirect(addr) => bus.read8(addr),
        }
    }

    #[inline]
    pub(crate) fn write_operand(&mut self, bus: &mut dyn Bus, operand: Operand8, value: u8) {
        match operand {
            Operand8::Reg(reg) => self.regs.set8(reg, value),
            Operand8::Indirect(addr) => bus.write8(addr, value),
        }
    }
}
