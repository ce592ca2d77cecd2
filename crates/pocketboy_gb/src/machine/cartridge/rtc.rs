//! MBC3 real-time clock.
//!
//! The clock is stored as register values at a baseline instant. Live time
//! is the stored value plus the whole seconds elapsed since the baseline,
//! unless the clock is halted. All entry points take `now` so tests can
//! drive time explicitly.

use std::time::{Duration, Instant};

const SECONDS_PER_DAY: u64 = 86_400;
/// The day counter is 9 bits wide.
const DAY_LIMIT: u64 = 512;

/// Register selector values written to 4000–5FFF.
pub(crate) const RTC_SECONDS: u8 = 0x08;
pub(crate) const RTC_DAY_HIGH: u8 = 0x0C;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RtcRegisters {
    pub seconds: u8,
    pub minutes: u8,
    pub hours: u8,
    pub days: u16,
    pub halted: bool,
    pub day_carry: bool,
}

impl RtcRegisters {
    fn total_seconds(&self) -> u64 {
        self.seconds as u64
            + self.minutes as u64 * 60
            + self.hours as u64 * 3600
            + self.days as u64 * SECONDS_PER_DAY
    }

    /// Advance by `elapsed` seconds. Overflowing the day counter wraps it
    /// and sets the sticky carry bit.
    fn advanced(self, elapsed: u64) -> Self {
        if elapsed == 0 {
            return self;
        }
        let total = self.total_seconds() + elapsed;
        let days = total / SECONDS_PER_DAY;
        Self {
            seconds: (total % 60) as u8,
            minutes: (total / 60 % 60) as u8,
            hours: (total / 3600 % 24) as u8,
            days: (days % DAY_LIMIT) as u16,
            halted: self.halted,
            day_carry: self.day_carry || days >= DAY_LIMIT,
        }
    }

    /// Day-high layout: bit 0 = day bit 8, bit 6 = halt, bit 7 = carry.
    pub fn day_high(&self) -> u8 {
        let day_bit8 = (self.days >> 8) as u8 & 0x01;
        day_bit8 | (u8::from(self.halted) << 6) | (u8::from(self.day_carry) << 7)
    }

    pub fn read(&self, select: u8) -> u8 {
        match select {
            0x08 => self.seconds & 0x3F,
            0x09 => self.minutes & 0x3F,
            0x0A => self.hours & 0x1F,
            0x0B => self.days as u8,
            0x0C => self.day_high(),
            _ => 0xFF,
        }
    }

    pub fn write(&mut self, select: u8, value: u8) {
        match select {
            0x08 => self.seconds = value & 0x3F,
            0x09 => self.minutes = value & 0x3F,
            0x0A => self.hours = value & 0x1F,
            0x0B => self.days = (self.days & 0x100) | value as u16,
            0x0C => {
                self.days = (self.days & 0xFF) | (((value & 0x01) as u16) << 8);
                self.halted = value & 0x40 != 0;
                self.day_carry = value & 0x80 != 0;
            }
            _ => {}
        }
    }
}

#[derive(Clone, Debug)]
pub struct Rtc {
    /// Register values at `base`.
    stored: RtcRegisters,
    base: Instant,
    /// What the CPU reads through A000–BFFF.
    latched: RtcRegisters,
    /// Last write to the latch window was 0x00.
    latch_armed: bool,
}

impl Rtc {
    pub fn new(now: Instant) -> Self {
        Self {
            stored: RtcRegisters::default(),
            base: now,
            latched: RtcRegisters::default(),
            latch_armed: false,
        }
    }

    /// Current clock value. A halted clock reports its stored registers.
    pub fn live(&self, now: Instant) -> RtcRegisters {
        if self.stored.halted {
            self.stored
        } else {
            let elapsed = now.saturating_duration_since(self.base).as_secs();
            self.stored.advanced(elapsed)
        }
    }

    pub fn latched(&self) -> RtcRegisters {
        self.latched
    }

    /// 6000–7FFF: a 0x00 write followed by 0x01 copies live time into the
    /// latched registers.
    pub fn write_latch(&mut self, value: u8, now: Instant) {
        if self.latch_armed && value == 0x01 {
            self.latched = self.live(now);
            log::trace!("RTC latched {:?}", self.latched);
        }
        self.latch_armed = value == 0x00;
    }

    pub fn read(&self, select: u8) -> u8 {
        self.latched.read(select)
    }

    /// Register write. Live time is folded into the stored registers
    /// first. A running clock keeps its sub-second phase; a halted one
    /// restarts from `now`.
    pub fn write(&mut self, select: u8, value: u8, now: Instant) {
        let was_halted = self.stored.halted;
        let mut regs = self.stored;
        if was_halted {
            self.base = now;
        } else {
            let elapsed = now.saturating_duration_since(self.base).as_secs();
            regs = regs.advanced(elapsed);
            self.base += Duration::from_secs(elapsed);
        }
        regs.write(select, value);
        self.stored = regs;
        self.latched.write(select, value);

        if was_halted != regs.halted {
            log::debug!("RTC {}", if regs.halted { "halted" } else { "started" });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latch_snapshots_elapsed_time() {
        let t0 = Instant::now();
        let mut rtc = Rtc::new(t0);
        rtc.write_latch(0x00, t0);
        rtc.write_latch(0x01, t0 + Duration::from_secs(3_723));

        assert_eq!(rtc.read(0x08), 3);
        assert_eq!(rtc.read(0x09), 2);
        assert_eq!(rtc.read(0x0A), 1);
        assert_eq!(rtc.read(0x0B), 0);
    }

    #[test]
    fn latch_requires_zero_then_one() {
        let t0 = Instant::now();
        let mut rtc = Rtc::new(t0);
        rtc.write_latch(0x01, t0 + Duration::from_secs(10));
        assert_eq!(rtc.read(0x08), 0);

        rtc.write_latch(0x00, t0 + Duration::from_secs(10));
        rtc.write_latch(0x05, t0 + Duration::from_secs(10));
        rtc.write_latch(0x01, t0 + Duration::from_secs(10));
        assert_eq!(rtc.read(0x08), 0);
    }

    #[test]
    fn halted_clock_latches_stored_registers() {
        let t0 = Instant::now();
        let mut rtc = Rtc::new(t0);
        rtc.write(0x0C, 0x40, t0 + Duration::from_secs(5));
        rtc.write(0x08, 42, t0 + Duration::from_secs(6));

        let later = t0 + Duration::from_secs(1_000);
        rtc.write_latch(0x00, later);
        rtc.write_latch(0x01, later);
        assert_eq!(rtc.read(0x08), 42);
        assert_eq!(rtc.read(0x0C) & 0x40, 0x40);
    }

    #[test]
    fn restarting_resets_the_baseline() {
        let t0 = Instant::now();
        let mut rtc = Rtc::new(t0);
        rtc.write(0x0C, 0x40, t0);
        // Ten minutes pass while halted; none of it is counted.
        let start = t0 + Duration::from_secs(600);
        rtc.write(0x0C, 0x00, start);

        let live = rtc.live(start + Duration::from_secs(30));
        assert_eq!(live.seconds, 30);
        assert_eq!(live.minutes, 0);
    }

    #[test]
    fn register_writes_keep_the_sub_second_phase() {
        let t0 = Instant::now();
        let mut rtc = Rtc::new(t0);
        // Ten writes, 1.5 s apart, none of them to the seconds register.
        for i in 1..=10u64 {
            rtc.write(0x09, 0, t0 + Duration::from_millis(1_500 * i));
        }

        let live = rtc.live(t0 + Duration::from_secs(15));
        assert_eq!(live.seconds, 15);
    }

    #[test]
    fn day_counter_overflow_sets_carry() {
        let t0 = Instant::now();
        let mut rtc = Rtc::new(t0);
        rtc.write(0x0B, 0xFF, t0);
        rtc.write(0x0C, 0x01, t0);

        let live = rtc.live(t0 + Duration::from_secs(SECONDS_PER_DAY));
        assert_eq!(live.days, 0);
        assert!(live.day_carry);
        assert_eq!(live.day_high() & 0x81, 0x80);
    }
}
