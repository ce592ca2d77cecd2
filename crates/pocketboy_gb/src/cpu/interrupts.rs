use super::{Bus, Cpu, INTERRUPT_CYCLES};

impl Cpu {
    /// Count down a pending `EI`; IME is set when the delay reaches zero.
    #[inline]
    pub(crate) fn tick_ime_delay(&mut self) {
        if self.ime_delay > 0 {
            self.ime_delay -= 1;
            if self.ime_delay == 0 {
                self.ime = true;
            }
        }
    }

    /// Wake from HALT/STOP on any pending interrupt and, with IME set,
    /// dispatch the lowest-numbered one. Returns the cycles consumed by a
    /// dispatch.
    pub(crate) fn service_interrupts(&mut self, bus: &mut dyn Bus) -> Option<u32> {
        let pending = self.pending_interrupts(bus);
        if pending == 0 {
            return None;
        }

        // Waking does not need IME; only dispatch does.
        self.halted = false;
        self.stopped = false;

        if !self.ime {
            return None;
        }

        let index = pending.trailing_zeros() as u16;
        let iflags = bus.read8(0xFF0F);
        bus.write8(0xFF0F, iflags & !(1 << index));
        self.ime = false;
        self.ime_delay = 0;

        // EI; HALT with a request already pending: the handler returns to
        // the HALT and the skipped increment is not carried into the vector.
        let pc = if self.halt_bug {
            self.halt_bug = false;
            self.regs.pc.wrapping_sub(1)
        } else {
            self.regs.pc
        };
        self.push_u16(bus, pc);
        self.regs.pc = 0x0040 + index * 8;

        log::debug!(
            "CPU: dispatch interrupt {} from PC={:#06X} to {:#06X}",
            index,
            pc,
            self.regs.pc
        );
        Some(INTERRUPT_CYCLES)
    }
}
