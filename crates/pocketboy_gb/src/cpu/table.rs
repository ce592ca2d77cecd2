use std::fmt;

use lazy_static::lazy_static;

use super::alu::AluOp;
use super::{Bus, Cpu, Operand8, Reg16};

/// Executes one decoded instruction. Returns `true` when a conditional
/// branch was taken (selects [`Instruction::cycles`]`.1`).
pub type Handler = fn(&mut Cpu, &mut dyn Bus, u8) -> bool;

/// Static description of one opcode.
#[derive(Clone)]
pub struct Instruction {
    pub opcode: u8,
    /// Diagnostic only.
    pub mnemonic: String,
    /// Encoded length in bytes, including the 0xCB prefix for CB opcodes.
    pub length: u8,
    /// (not taken / unconditional, taken) in T-cycles.
    pub cycles: (u32, u32),
    pub handler: Handler,
    pub valid: bool,
}

impl Instruction {
    fn new(
        opcode: u8,
        mnemonic: impl Into<String>,
        length: u8,
        cycles: u32,
        handler: Handler,
    ) -> Self {
        Self {
            opcode,
            mnemonic: mnemonic.into(),
            length,
            cycles: (cycles, cycles),
            handler,
            valid: true,
        }
    }

    fn branch(
        opcode: u8,
        mnemonic: impl Into<String>,
        length: u8,
        not_taken: u32,
        taken: u32,
        handler: Handler,
    ) -> Self {
        Self {
            cycles: (not_taken, taken),
            ..Self::new(opcode, mnemonic, length, not_taken, handler)
        }
    }

    fn invalid(opcode: u8) -> Self {
        Self {
            valid: false,
            ..Self::new(opcode, format!("INVALID {opcode:#04X}"), 1, 0, Cpu::invalid)
        }
    }

    #[inline]
    pub fn cycles_for(&self, taken: bool) -> u32 {
        if taken {
            self.cycles.1
        } else {
            self.cycles.0
        }
    }
}

impl fmt::Debug for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instruction")
            .field("opcode", &format_args!("{:#04X}", self.opcode))
            .field("mnemonic", &self.mnemonic)
            .field("length", &self.length)
            .field("cycles", &self.cycles)
            .field("valid", &self.valid)
            .finish()
    }
}

lazy_static! {
    /// Unprefixed opcodes, indexed by opcode byte.
    pub static ref INSTRUCTIONS: [Instruction; 256] =
        std::array::from_fn(|i| decode_unprefixed(i as u8));
    /// 0xCB-prefixed opcodes, indexed by the byte after the prefix.
    pub static ref CB_INSTRUCTIONS: [Instruction; 256] =
        std::array::from_fn(|i| decode_cb(i as u8));
}

const R: [&str; 8] = Operand8::NAMES;
const CC: [&str; 4] = ["NZ", "Z", "NC", "C"];

fn rp(opcode: u8) -> &'static str {
    Reg16::from_rp(opcode >> 4).name()
}

fn rp2(opcode: u8) -> &'static str {
    Reg16::from_rp2(opcode >> 4).name()
}

/// 4 for a register operand, `indirect` when the 3-bit field selects (HL).
fn reg_cycles(index: u8, indirect: u32) -> u32 {
    if Operand8::is_indirect_index(index) {
        indirect
    } else {
        4
    }
}

fn decode_unprefixed(opcode: u8) -> Instruction {
    use Instruction as I;

    let y = ((opcode >> 3) & 0x07) as usize;
    let z = (opcode & 0x07) as usize;
    let cc = CC[y & 0x03];

    match opcode {
        0x00 => I::new(opcode, "NOP", 1, 4, Cpu::nop),
        0x10 => I::new(opcode, "STOP", 2, 4, Cpu::stop),
        0x76 => I::new(opcode, "HALT", 1, 4, Cpu::halt),
        // Marker only: `Cpu::decode` resolves the prefix before indexing.
        0xCB => I::new(opcode, "PREFIX CB", 1, 4, Cpu::nop),
        0xF3 => I::new(opcode, "DI", 1, 4, Cpu::di),
        0xFB => I::new(opcode, "EI", 1, 4, Cpu::ei),

        0xD3 | 0xDB | 0xDD | 0xE3 | 0xE4 | 0xEB | 0xEC | 0xED | 0xF4 | 0xFC | 0xFD => {
            I::invalid(opcode)
        }

        // 16-bit loads and arithmetic.
        0x01 | 0x11 | 0x21 | 0x31 => {
            let name = format!("LD {},d16", rp(opcode));
            I::new(opcode, name, 3, 12, Cpu::ld_rr_d16)
        }
        0x03 | 0x13 | 0x23 | 0x33 => {
            I::new(opcode, format!("INC {}", rp(opcode)), 1, 8, Cpu::inc_rr)
        }
        0x0B | 0x1B | 0x2B | 0x3B => {
            I::new(opcode, format!("DEC {}", rp(opcode)), 1, 8, Cpu::dec_rr)
        }
        0x09 | 0x19 | 0x29 | 0x39 => {
            let name = format!("ADD HL,{}", rp(opcode));
            I::new(opcode, name, 1, 8, Cpu::add_hl_rr)
        }
        0x08 => I::new(opcode, "LD (a16),SP", 3, 20, Cpu::ld_a16_sp),
        0xE8 => I::new(opcode, "ADD SP,e8", 2, 16, Cpu::add_sp_e),
        0xF8 => I::new(opcode, "LD HL,SP+e8", 2, 12, Cpu::ld_hl_sp_e),
        0xF9 => I::new(opcode, "LD SP,HL", 1, 8, Cpu::ld_sp_hl),

        // Indirect A loads through BC/DE/HL+/HL-.
        0x02 | 0x12 | 0x22 | 0x32 => {
            let target = ["(BC)", "(DE)", "(HL+)", "(HL-)"][(opcode >> 4) as usize];
            I::new(opcode, format!("LD {target},A"), 1, 8, Cpu::ld_indirect_a)
        }
        0x0A | 0x1A | 0x2A | 0x3A => {
            let source = ["(BC)", "(DE)", "(HL+)", "(HL-)"][(opcode >> 4) as usize];
            I::new(opcode, format!("LD A,{source}"), 1, 8, Cpu::ld_a_indirect)
        }

        // 8-bit INC/DEC/LD d8 on the y field.
        0x04 | 0x0C | 0x14 | 0x1C | 0x24 | 0x2C | 0x34 | 0x3C => {
            let cycles = reg_cycles(y as u8, 12);
            I::new(opcode, format!("INC {}", R[y]), 1, cycles, Cpu::inc_r)
        }
        0x05 | 0x0D | 0x15 | 0x1D | 0x25 | 0x2D | 0x35 | 0x3D => {
            let cycles = reg_cycles(y as u8, 12);
            I::new(opcode, format!("DEC {}", R[y]), 1, cycles, Cpu::dec_r)
        }
        0x06 | 0x0E | 0x16 | 0x1E | 0x26 | 0x2E | 0x36 | 0x3E => {
            let cycles = if y == 6 { 12 } else { 8 };
            I::new(opcode, format!("LD {},d8", R[y]), 2, cycles, Cpu::ld_r_d8)
        }

        0x07 | 0x0F | 0x17 | 0x1F => {
            let name = ["RLCA", "RRCA", "RLA", "RRA"][y & 0x03];
            I::new(opcode, name, 1, 4, Cpu::rotate_a)
        }
        0x27 => I::new(opcode, "DAA", 1, 4, Cpu::daa_a),
        0x2F => I::new(opcode, "CPL", 1, 4, Cpu::cpl),
        0x37 => I::new(opcode, "SCF", 1, 4, Cpu::scf),
        0x3F => I::new(opcode, "CCF", 1, 4, Cpu::ccf),

        // Relative jumps.
        0x18 => I::new(opcode, "JR e8", 2, 12, Cpu::jr_e),
        0x20 | 0x28 | 0x30 | 0x38 => I::branch(opcode, format!("JR {cc},e8"), 2, 8, 12, Cpu::jr_cc),

        // LD r,r' (HALT is 0x76, matched above).
        0x40..=0x7F => {
            let cycles = if y == 6 || z == 6 { 8 } else { 4 };
            let name = format!("LD {},{}", R[y], R[z]);
            I::new(opcode, name, 1, cycles, Cpu::ld_r_r)
        }

        0x80..=0xBF => {
            let op = AluOp::from_index(y as u8);
            let name = format!("{}{}", op.mnemonic(), R[z]);
            I::new(opcode, name, 1, reg_cycles(z as u8, 8), Cpu::alu_r)
        }
        0xC6 | 0xCE | 0xD6 | 0xDE | 0xE6 | 0xEE | 0xF6 | 0xFE => {
            let op = AluOp::from_index(y as u8);
            I::new(opcode, format!("{}d8", op.mnemonic()), 2, 8, Cpu::alu_d8)
        }

        // Control flow.
        0xC0 | 0xC8 | 0xD0 | 0xD8 => I::branch(opcode, format!("RET {cc}"), 1, 8, 20, Cpu::ret_cc),
        0xC2 | 0xCA | 0xD2 | 0xDA => {
            I::branch(opcode, format!("JP {cc},a16"), 3, 12, 16, Cpu::jp_cc)
        }
        0xC4 | 0xCC | 0xD4 | 0xDC => {
            I::branch(opcode, format!("CALL {cc},a16"), 3, 12, 24, Cpu::call_cc)
        }
        0xC3 => I::new(opcode, "JP a16", 3, 16, Cpu::jp_a16),
        0xC9 => I::new(opcode, "RET", 1, 16, Cpu::ret_uncond),
        0xCD => I::new(opcode, "CALL a16", 3, 24, Cpu::call_a16),
        0xD9 => I::branch(opcode, "RETI", 1, 16, 16, Cpu::reti),
        0xE9 => I::new(opcode, "JP HL", 1, 4, Cpu::jp_hl),
        0xC7 | 0xCF | 0xD7 | 0xDF | 0xE7 | 0xEF | 0xF7 | 0xFF => {
            let name = format!("RST {:02X}H", opcode & 0x38);
            I::new(opcode, name, 1, 16, Cpu::rst)
        }

        // Stack.
        0xC1 | 0xD1 | 0xE1 | 0xF1 => {
            I::new(opcode, format!("POP {}", rp2(opcode)), 1, 12, Cpu::pop_rr)
        }
        0xC5 | 0xD5 | 0xE5 | 0xF5 => {
            I::new(opcode, format!("PUSH {}", rp2(opcode)), 1, 16, Cpu::push_rr)
        }

        // High page and absolute A loads.
        0xE0 => I::new(opcode, "LDH (a8),A", 2, 12, Cpu::ldh_a8),
        0xF0 => I::new(opcode, "LDH A,(a8)", 2, 12, Cpu::ldh_a8),
        0xE2 => I::new(opcode, "LD (C),A", 1, 8, Cpu::ldh_c),
        0xF2 => I::new(opcode, "LD A,(C)", 1, 8, Cpu::ldh_c),
        0xEA => I::new(opcode, "LD (a16),A", 3, 16, Cpu::ld_a16_a),
        0xFA => I::new(opcode, "LD A,(a16)", 3, 16, Cpu::ld_a16_a),
    }
}

fn decode_cb(opcode: u8) -> Instruction {
    const SHIFTS: [&str; 8] = ["RLC", "RRC", "RL", "RR", "SLA", "SRA", "SWAP", "SRL"];

    let y = ((opcode >> 3) & 0x07) as usize;
    let z = opcode & 0x07;
    let target = R[z as usize];
    let indirect = Operand8::is_indirect_index(z);
    let rmw_cycles = if indirect { 16 } else { 8 };

    match opcode >> 6 {
        0 => {
            let name = format!("{} {target}", SHIFTS[y]);
            Instruction::new(opcode, name, 2, rmw_cycles, Cpu::cb_rotate)
        }
        1 => {
            let cycles = if indirect { 12 } else { 8 };
            Instruction::new(opcode, format!("BIT {y},{target}"), 2, cycles, Cpu::cb_bit)
        }
        2 => {
            let name = format!("RES {y},{target}");
            Instruction::new(opcode, name, 2, rmw_cycles, Cpu::cb_res)
        }
        _ => {
            let name = format!("SET {y},{target}");
            Instruction::new(opcode, name, 2, rmw_cycles, Cpu::cb_set)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_index_matches_opcode() {
        for i in 0..=255u8 {
            assert_eq!(INSTRUCTIONS[i as usize].opcode, i);
            assert_eq!(CB_INSTRUCTIONS[i as usize].opcode, i);
        }
    }

    #[test]
    fn exactly_eleven_unprefixed_holes() {
        let invalid: Vec<u8> = INSTRUCTIONS
            .iter()
            .filter(|instr| !instr.valid)
            .map(|instr| instr.opcode)
            .collect();
        assert_eq!(
            invalid,
            vec![0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD]
        );
        assert!(CB_INSTRUCTIONS.iter().all(|instr| instr.valid));
    }

    #[test]
    fn descriptors_carry_canonical_costs() {
        assert_eq!(INSTRUCTIONS[0x00].cycles, (4, 4));
        assert_eq!(INSTRUCTIONS[0x01].mnemonic, "LD BC,d16");
        assert_eq!(INSTRUCTIONS[0x01].length, 3);
        assert_eq!(INSTRUCTIONS[0x20].cycles, (8, 12));
        assert_eq!(INSTRUCTIONS[0xC4].cycles, (12, 24));
        assert_eq!(INSTRUCTIONS[0x86].mnemonic, "ADD A,(HL)");
        assert_eq!(INSTRUCTIONS[0x86].cycles, (8, 8));
        assert_eq!(INSTRUCTIONS[0x36].cycles, (12, 12));
        assert_eq!(CB_INSTRUCTIONS[0x46].mnemonic, "BIT 0,(HL)");
        assert_eq!(CB_INSTRUCTIONS[0x46].cycles, (12, 12));
        assert_eq!(CB_INSTRUCTIONS[0x06].cycles, (16, 16));
        assert_eq!(CB_INSTRUCTIONS[0x37].mnemonic, "SWAP A");
    }
}
