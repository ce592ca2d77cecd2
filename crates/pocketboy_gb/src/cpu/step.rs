use super::{Bus, Cpu, Instruction, CB_INSTRUCTIONS, HALTED_CYCLES, INSTRUCTIONS};

impl Cpu {
    /// Execute one instruction (or one interrupt dispatch, or one idle
    /// HALT/STOP slot) and return the number of T-cycles it took.
    ///
    /// A locked CPU returns 0 forever.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> u32 {
        self.step_dyn(bus)
    }

    fn step_dyn(&mut self, bus: &mut dyn Bus) -> u32 {
        if self.locked {
            return 0;
        }

        self.tick_ime_delay();

        if let Some(cycles) = self.service_interrupts(bus) {
            return cycles;
        }

        if self.stopped {
            // STOP also ends when any joypad line is pulled low.
            if bus.read8(0xFF00) & 0x0F != 0x0F {
                self.stopped = false;
            }
            return HALTED_CYCLES;
        }

        if self.halted {
            return HALTED_CYCLES;
        }

        let (instruction, opcode) = self.decode(bus);
        let taken = (instruction.handler)(self, bus, opcode);
        instruction.cycles_for(taken)
    }

    /// Fetch the next opcode, resolving the 0xCB prefix.
    fn decode(&mut self, bus: &mut dyn Bus) -> (&'static Instruction, u8) {
        let opcode = self.fetch8(bus);
        if opcode == 0xCB {
            let cb = self.fetch8(bus);
            (&CB_INSTRUCTIONS[cb as usize], cb)
        } else {
            (&INSTRUCTIONS[opcode as usize], opcode)
        }
    }

    /// Descriptor of the instruction at PC, without executing it.
    pub fn peek_instruction(&self, bus: &mut dyn Bus) -> &'static Instruction {
        let opcode = bus.read8(self.regs.pc);
        if opcode == 0xCB {
            &CB_INSTRUCTIONS[bus.read8(self.regs.pc.wrapping_add(1)) as usize]
        } else {
            &INSTRUCTIONS[opcode as usize]
        }
    }
}
