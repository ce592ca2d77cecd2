use crate::cpu::alu::AluOp;
use crate::cpu::{Bus, Cpu, Flag, Reg16};

impl Cpu {
    /// ADD/ADC/SUB/SBC/AND/XOR/OR/CP A,r over 0x80–0xBF.
    pub(crate) fn alu_r(&mut self, bus: &mut dyn Bus, opcode: u8) -> bool {
        let src = self.operand(opcode);
        let value = self.read_operand(bus, src);
        self.alu(AluOp::from_index(opcode >> 3), value);
        false
    }

    /// Immediate forms 0xC6, 0xCE, ... 0xFE.
    pub(crate) fn alu_d8(&mut self, bus: &mut dyn Bus, opcode: u8) -> bool {
        let value = self.fetch8(bus);
        self.alu(AluOp::from_index(opcode >> 3), value);
        false
    }

    /// RLCA/RRCA/RLA/RRA: the CB rotate on A, but Z is always cleared.
    pub(crate) fn rotate_a(&mut self, _bus: &mut dyn Bus, opcode: u8) -> bool {
        self.regs.a = self.rotate_shift(opcode >> 3, self.regs.a);
        self.set_flag(Flag::Z, false);
        false
    }

    pub(crate) fn add_hl_rr(&mut self, _bus: &mut dyn Bus, opcode: u8) -> bool {
        let value = self.regs.get16(Reg16::from_rp(opcode >> 4));
        self.add16_hl(value);
        false
    }

    pub(crate) fn add_sp_e(&mut self, bus: &mut dyn Bus, _opcode: u8) -> bool {
        let e = self.fetch8(bus);
        self.regs.sp = self.add16_signed(self.regs.sp, e);
        false
    }

    pub(crate) fn daa_a(&mut self, _bus: &mut dyn Bus, _opcode: u8) -> bool {
        self.daa();
        false
    }

    pub(crate) fn cpl(&mut self, _bus: &mut dyn Bus, _opcode: u8) -> bool {
        self.regs.a = !self.regs.a;
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, true);
        false
    }

    pub(crate) fn scf(&mut self, _bus: &mut dyn Bus, _opcode: u8) -> bool {
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, true);
        false
    }

    pub(crate) fn ccf(&mut self, _bus: &mut dyn Bus, _opcode: u8) -> bool {
        let carry = self.get_flag(Flag::C);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, !carry);
        false
    }
}
