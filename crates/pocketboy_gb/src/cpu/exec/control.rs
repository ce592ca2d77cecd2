use crate::cpu::{Bus, Cpu};

impl Cpu {
    pub(crate) fn jr_e(&mut self, bus: &mut dyn Bus, _opcode: u8) -> bool {
        self.jr(bus, true)
    }

    pub(crate) fn jr_cc(&mut self, bus: &mut dyn Bus, opcode: u8) -> bool {
        let taken = self.condition(opcode >> 3);
        self.jr(bus, taken)
    }

    pub(crate) fn jp_a16(&mut self, bus: &mut dyn Bus, _opcode: u8) -> bool {
        self.jp(bus, true)
    }

    pub(crate) fn jp_cc(&mut self, bus: &mut dyn Bus, opcode: u8) -> bool {
        let taken = self.condition(opcode >> 3);
        self.jp(bus, taken)
    }

    pub(crate) fn jp_hl(&mut self, _bus: &mut dyn Bus, _opcode: u8) -> bool {
        self.regs.pc = self.regs.hl();
        false
    }

    pub(crate) fn call_a16(&mut self, bus: &mut dyn Bus, _opcode: u8) -> bool {
        self.call(bus, true)
    }

    pub(crate) fn call_cc(&mut self, bus: &mut dyn Bus, opcode: u8) -> bool {
        let taken = self.condition(opcode >> 3);
        self.call(bus, taken)
    }

    pub(crate) fn ret_uncond(&mut self, bus: &mut dyn Bus, _opcode: u8) -> bool {
        self.ret(bus, true)
    }

    pub(crate) fn ret_cc(&mut self, bus: &mut dyn Bus, opcode: u8) -> bool {
        let taken = self.condition(opcode >> 3);
        self.ret(bus, taken)
    }

    /// RETI re-enables interrupts with no delay, unlike EI.
    pub(crate) fn reti(&mut self, bus: &mut dyn Bus, _opcode: u8) -> bool {
        self.ret(bus, true);
        self.ime = true;
        self.ime_delay = 0;
        true
    }

    pub(crate) fn rst(&mut self, bus: &mut dyn Bus, opcode: u8) -> bool {
        let ret = self.regs.pc;
        self.push_u16(bus, ret);
        self.regs.pc = (opcode & 0x38) as u16;
        false
    }
}
