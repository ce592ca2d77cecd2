//! Sharp LR35902 interpreter.
//!
//! `Cpu` holds only processor state. Memory and peripherals are reached
//! through a [`Bus`] borrowed for the duration of each [`Cpu::step`].

mod alu;
mod bus;
mod cb;
mod exec;
mod helpers;
mod init;
mod interrupts;
mod operand;
mod regs;
mod step;
mod table;

pub use bus::Bus;
pub use operand::Operand8;
pub use regs::{Flag, Reg16, Reg8, Registers};
pub use table::{Handler, Instruction, CB_INSTRUCTIONS, INSTRUCTIONS};

/// Cost of dispatching an interrupt (5 M-cycles).
pub const INTERRUPT_CYCLES: u32 = 20;
/// Cost of one idle step while halted or stopped.
pub const HALTED_CYCLES: u32 = 4;

#[derive(Clone, Debug)]
pub struct Cpu {
    pub regs: Registers,
    /// Interrupt master enable.
    pub ime: bool,
    pub halted: bool,
    pub stopped: bool,
    /// Set by HALT when IME=0 and an interrupt is already pending: the next
    /// opcode fetch does not advance PC.
    pub(crate) halt_bug: bool,
    /// Steps left until a pending `EI` sets IME. Zero means nothing pending.
    pub(crate) ime_delay: u8,
    /// Set after an invalid opcode; the CPU never executes again.
    pub(crate) locked: bool,
}

impl Cpu {
    #[inline]
    pub fn get_flag(&self, flag: Flag) -> bool {
        (self.regs.f & (1 << flag as u8)) != 0
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        let mask = 1 << flag as u8;
        if value {
            self.regs.f |= mask;
        } else {
            self.regs.f &= !mask;
        }
    }

    #[inline]
    pub(crate) fn clear_flags(&mut self) {
        self.regs.f = 0;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }
}
