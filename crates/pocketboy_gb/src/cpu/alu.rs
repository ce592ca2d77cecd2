use super::{Cpu, Flag};

/// Eight-way ALU selector shared by the `ALU A,r` and `ALU A,d8` groups.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum AluOp {
    Add,
    Adc,
    Sub,
    Sbc,
    And,
    Xor,
    Or,
    Cp,
}

impl AluOp {
    pub(crate) fn from_index(index: u8) -> Self {
        match index & 0x07 {
            0 => AluOp::Add,
            1 => AluOp::Adc,
            2 => AluOp::Sub,
            3 => AluOp::Sbc,
            4 => AluOp::And,
            5 => AluOp::Xor,
            6 => AluOp::Or,
            _ => AluOp::Cp,
        }
    }

    pub(crate) fn mnemonic(self) -> &'static str {
        match self {
            AluOp::Add => "ADD A,",
            AluOp::Adc => "ADC A,",
            AluOp::Sub => "SUB ",
            AluOp::Sbc => "SBC A,",
            AluOp::And => "AND ",
            AluOp::Xor => "XOR ",
            AluOp::Or => "OR ",
            AluOp::Cp => "CP ",
        }
    }
}

impl Cpu {
    #[inline]
    fn set_znhc(&mut self, z: bool, n: bool, h: bool, c: bool) {
        self.clear_flags();
        self.set_flag(Flag::Z, z);
        self.set_flag(Flag::N, n);
        self.set_flag(Flag::H, h);
        self.set_flag(Flag::C, c);
    }

    pub(crate) fn alu(&mut self, op: AluOp, value: u8) {
        match op {
            AluOp::Add => self.regs.a = self.add8(value, false),
            AluOp::Adc => self.regs.a = self.add8(value, true),
            AluOp::Sub => self.regs.a = self.sub8(value, false),
            AluOp::Sbc => self.regs.a = self.sub8(value, true),
            AluOp::And => {
                let result = self.regs.a & value;
                self.set_znhc(result == 0, false, true, false);
                self.regs.a = result;
            }
            AluOp::Xor => {
                let result = self.regs.a ^ value;
                self.set_znhc(result == 0, false, false, false);
                self.regs.a = result;
            }
            AluOp::Or => {
                let result = self.regs.a | value;
                self.set_znhc(result == 0, false, false, false);
                self.regs.a = result;
            }
            // Flags of a subtraction, A unchanged.
            AluOp::Cp => {
                self.sub8(value, false);
            }
        }
    }

    /// `A + value (+ C)`; sets all four flags and returns the sum.
    fn add8(&mut self, value: u8, with_carry: bool) -> u8 {
        let a = self.regs.a;
        let carry = u8::from(with_carry && self.get_flag(Flag::C));
        let half = (a & 0x0F) + (value & 0x0F) + carry;
        let full = a as u16 + value as u16 + carry as u16;
        let result = full as u8;
        self.set_znhc(result == 0, false, half > 0x0F, full > 0xFF);
        result
    }

    /// `A - value (- C)`; sets all four flags and returns the difference.
    fn sub8(&mut self, value: u8, with_carry: bool) -> u8 {
        let a = self.regs.a;
        let carry = i16::from(with_carry && self.get_flag(Flag::C));
        let half = (a & 0x0F) as i16 - (value & 0x0F) as i16 - carry;
        let full = a as i16 - value as i16 - carry;
        let result = full as u8;
        self.set_znhc(result == 0, true, half < 0, full < 0);
        result
    }

    /// INC r: Z, N, H updated; C untouched.
    pub(crate) fn inc8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, value & 0x0F == 0x0F);
        result
    }

    /// DEC r: Z, N, H updated; C untouched.
    pub(crate) fn dec8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, value & 0x0F == 0);
        result
    }

    /// ADD HL,rr. Half carry out of bit 11, carry out of bit 15, Z kept.
    pub(crate) fn add16_hl(&mut self, value: u16) {
        let hl = self.regs.hl();
        let (result, carry) = hl.overflowing_add(value);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, (hl & 0x0FFF) + (value & 0x0FFF) > 0x0FFF);
        self.set_flag(Flag::C, carry);
        self.regs.set_hl(result);
    }

    /// `base + signed(e)` for ADD SP,e and LD HL,SP+e. Flags come from the
    /// unsigned low-byte addition; Z and N are cleared.
    pub(crate) fn add16_signed(&mut self, base: u16, e: u8) -> u16 {
        let low = base as u8;
        let h = (low & 0x0F) + (e & 0x0F) > 0x0F;
        let c = low as u16 + e as u16 > 0xFF;
        self.set_znhc(false, false, h, c);
        base.wrapping_add(e as i8 as u16)
    }

    /// BCD correction of A after an add or subtract; N is preserved.
    pub(crate) fn daa(&mut self) {
        let subtract = self.get_flag(Flag::N);
        let mut a = self.regs.a;
        let mut correction = 0u8;
        let mut carry = self.get_flag(Flag::C);

        if self.get_flag(Flag::H) || (!subtract && a & 0x0F > 0x09) {
            correction |= 0x06;
        }
        if carry || (!subtract && a > 0x99) {
            correction |= 0x60;
            carry = true;
        }

        a = if subtract {
            a.wrapping_sub(correction)
        } else {
            a.wrapping_add(correction)
        };

        self.regs.a = a;
        self.set_flag(Flag::Z, a == 0);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, carry);
    }

    /// Shared body of the CB rotate/shift group (and the flag logic of the
    /// unprefixed RLCA/RRCA/RLA/RRA, which then force Z to 0).
    pub(crate) fn rotate_shift(&mut self, kind: u8, value: u8) -> u8 {
        let carry_in = self.get_flag(Flag::C);
        let (result, carry_out) = match kind & 0x07 {
            // RLC
            0 => (value.rotate_left(1), value & 0x80 != 0),
            // RRC
            1 => (value.rotate_right(1), value & 0x01 != 0),
            // RL
            2 => ((value << 1) | u8::from(carry_in), value & 0x80 != 0),
            // RR
            3 => ((value >> 1) | (u8::from(carry_in) << 7), value & 0x01 != 0),
            // SLA
            4 => (value << 1, value & 0x80 != 0),
            // SRA
            5 => ((value >> 1) | (value & 0x80), value & 0x01 != 0),
            // SWAP
            6 => (value.rotate_left(4), false),
            // SRL
            _ => (value >> 1, value & 0x01 != 0),
        };
        self.set_znhc(result == 0, false, false, carry_out);
        result
    }
}
