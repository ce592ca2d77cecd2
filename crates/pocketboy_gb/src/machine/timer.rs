//! DIV/TIMA/TMA/TAC.
//!
//! DIV is the upper byte of a free-running 16-bit system counter. TIMA
//! counts falling edges of one counter bit picked by TAC, which is why
//! writes to DIV and TAC can produce extra increments. An overflow leaves
//! TIMA at 0 for one M-cycle before TMA is reloaded and the interrupt is
//! raised.

mod io;

use super::interrupts::{Interrupt, InterruptController};

/// T-cycles between TIMA overflowing and the TMA reload.
const RELOAD_DELAY: u8 = 4;

#[derive(Clone, Debug, Default)]
pub struct Timer {
    /// System counter; DIV exposes bits 15..8.
    pub(crate) counter: u16,
    pub(crate) tima: u8,
    pub(crate) tma: u8,
    /// Lower 3 bits of TAC.
    pub(crate) tac: u8,
    /// Cycles until a pending overflow reloads TIMA. Zero when idle.
    pub(crate) reload_delay: u8,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// DIV=0xAB as observed when the boot ROM hands over to the cartridge.
    pub(crate) fn with_post_boot_state() -> Self {
        Self {
            counter: 0xABCC,
            ..Self::default()
        }
    }

    #[inline]
    pub(crate) fn enabled(&self) -> bool {
        self.tac & 0x04 != 0
    }

    /// Counter bit sampled for the current clock select:
    /// 00 → bit 9 (4096 Hz), 01 → bit 3 (262144 Hz),
    /// 10 → bit 5 (65536 Hz), 11 → bit 7 (16384 Hz).
    #[inline]
    pub(crate) fn selected_bit(&self) -> u16 {
        const BITS: [u16; 4] = [9, 3, 5, 7];
        1 << BITS[(self.tac & 0x03) as usize]
    }

    /// The AND of the enable bit and the selected counter bit. TIMA
    /// increments whenever this signal falls.
    #[inline]
    pub(crate) fn input(&self) -> bool {
        self.enabled() && self.counter & self.selected_bit() != 0
    }

    pub(crate) fn increment_tima(&mut self) {
        match self.tima.checked_add(1) {
            Some(next) => self.tima = next,
            None => {
                self.tima = 0;
                self.reload_delay = RELOAD_DELAY;
            }
        }
    }

    /// Advance by `cycles` T-cycles, one cycle at a time so that every
    /// falling edge and reload lands on its own cycle.
    pub fn tick(&mut self, cycles: u32, interrupts: &mut InterruptController) {
        for _ in 0..cycles {
            self.tick_cycle(interrupts);
        }
    }

    fn tick_cycle(&mut self, interrupts: &mut InterruptController) {
        let before = self.input();
        self.counter = self.counter.wrapping_add(1);

        if self.reload_delay > 0 {
            self.reload_delay -= 1;
            if self.reload_delay == 0 {
                self.tima = self.tma;
                interrupts.request(Interrupt::TIMER);
            }
        }

        if before && !self.input() {
            self.increment_tima();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timer_with_tac(tac: u8) -> (Timer, InterruptController) {
        let mut timer = Timer::new();
        timer.tac = tac;
        (timer, InterruptController::new())
    }

    #[test]
    fn bit9_select_increments_once_per_1024_cycles() {
        let (mut timer, mut ic) = timer_with_tac(0x04);
        timer.tick(1023, &mut ic);
        assert_eq!(timer.tima, 0);
        timer.tick(1, &mut ic);
        assert_eq!(timer.tima, 1);
        timer.tick(1024 * 10, &mut ic);
        assert_eq!(timer.tima, 11);
    }

    #[test]
    fn each_falling_edge_counts_exactly_once() {
        let (mut timer, mut ic) = timer_with_tac(0x04);
        // Bit 9 is high between 512 and 1023; the edge is at 1024.
        timer.counter = 0x03FF;
        timer.tick(1, &mut ic);
        assert_eq!(timer.tima, 1);
        // Rising edge at 0x0600 does nothing.
        timer.counter = 0x05FF;
        timer.tick(1, &mut ic);
        assert_eq!(timer.tima, 1);
    }

    #[test]
    fn clock_selects_map_to_documented_rates() {
        for (tac, period) in [(0x04, 1024), (0x05, 16), (0x06, 64), (0x07, 256)] {
            let (mut timer, mut ic) = timer_with_tac(tac);
            timer.tick(period * 4, &mut ic);
            assert_eq!(timer.tima, 4, "TAC={tac:#04X}");
        }
    }

    #[test]
    fn disabled_timer_only_runs_the_divider() {
        let (mut timer, mut ic) = timer_with_tac(0x01);
        timer.tick(4096, &mut ic);
        assert_eq!(timer.tima, 0);
        assert_eq!(timer.counter, 4096);
    }

    #[test]
    fn overflow_reloads_after_one_m_cycle() {
        let (mut timer, mut ic) = timer_with_tac(0x05);
        timer.tima = 0xFF;
        timer.tma = 0x42;
        timer.counter = 0x000F;

        timer.tick(1, &mut ic);
        assert_eq!(timer.tima, 0x00);
        assert!(!ic.is_requested(Interrupt::TIMER));

        timer.tick(3, &mut ic);
        assert_eq!(timer.tima, 0x00);
        assert!(!ic.is_requested(Interrupt::TIMER));

        timer.tick(1, &mut ic);
        assert_eq!(timer.tima, 0x42);
        assert!(ic.is_requested(Interrupt::TIMER));
    }
}
