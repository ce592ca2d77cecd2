use crate::cpu::{Bus, Cpu};

impl Cpu {
    pub(crate) fn nop(&mut self, _bus: &mut dyn Bus, _opcode: u8) -> bool {
        false
    }

    pub(crate) fn halt(&mut self, bus: &mut dyn Bus, _opcode: u8) -> bool {
        if !self.ime && self.pending_interrupts(bus) != 0 {
            // HALT bug: the CPU does not halt and fails to advance PC on
            // the next fetch.
            self.halt_bug = true;
        } else {
            self.halted = true;
        }
        false
    }

    /// STOP is two bytes long; the padding byte is fetched and discarded.
    pub(crate) fn stop(&mut self, bus: &mut dyn Bus, _opcode: u8) -> bool {
        let _padding = self.fetch8(bus);
        self.stopped = true;
        self.halted = false;
        log::debug!("CPU entered STOP at PC={:#06X}", self.regs.pc);
        false
    }

    pub(crate) fn di(&mut self, _bus: &mut dyn Bus, _opcode: u8) -> bool {
        self.ime = false;
        self.ime_delay = 0;
        false
    }

    /// IME is set once the instruction after EI has completed.
    pub(crate) fn ei(&mut self, _bus: &mut dyn Bus, _opcode: u8) -> bool {
        if !self.ime && self.ime_delay == 0 {
            self.ime_delay = 2;
        }
        false
    }

    /// Opcode holes (D3, DB, DD, E3, E4, EB, EC, ED, F4, FC, FD) hard-lock
    /// the CPU until power-off.
    pub(crate) fn invalid(&mut self, _bus: &mut dyn Bus, opcode: u8) -> bool {
        if !self.locked {
            log::error!(
                "CPU locked: invalid opcode {opcode:#04X} at PC={:#06X}, {:?}",
                self.regs.pc.wrapping_sub(1),
                self.regs,
            );
        }
        self.locked = true;
        false
    }
}
