use super::Timer;

impl Timer {
    pub fn read(&self, addr: u16) -> u8 {
        match addr {
            0xFF04 => (self.counter >> 8) as u8,
            0xFF05 => self.tima,
            0xFF06 => self.tma,
            0xFF07 => self.tac | 0xF8,
            _ => 0xFF,
        }
    }

    /// Register writes. None of them advance time.
    pub fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0xFF04 => self.write_div(),
            0xFF05 => self.write_tima(value),
            0xFF06 => self.write_tma(value),
            0xFF07 => self.write_tac(value),
            _ => log::warn!("timer: write to unmapped {addr:#06X}"),
        }
    }

    /// Any write clears the whole system counter. If the selected bit was
    /// high, the reset is a falling edge.
    fn write_div(&mut self) {
        let before = self.input();
        self.counter = 0;
        if before {
            self.increment_tima();
        }
    }

    /// Writing TIMA while a reload is pending cancels the reload and the
    /// interrupt.
    fn write_tima(&mut self, value: u8) {
        self.tima = value;
        self.reload_delay = 0;
    }

    /// Writing TMA while a reload is pending also lands in TIMA.
    fn write_tma(&mut self, value: u8) {
        self.tma = value;
        if self.reload_delay > 0 {
            self.tima = value;
        }
    }

    /// Disabling the timer or switching away from a high input bit is a
    /// falling edge.
    fn write_tac(&mut self, value: u8) {
        let before = self.input();
        self.tac = value & 0x07;
        if before && !self.input() {
            self.increment_tima();
        }
    }
}
