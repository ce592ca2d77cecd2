use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use crate::machine::interrupts::{Interrupt, InterruptController};

/// Bit positions in the host button mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    Right = 0,
    Left = 1,
    Up = 2,
    Down = 3,
    A = 4,
    B = 5,
    Select = 6,
    Start = 7,
}

impl Button {
    pub const ALL: [Button; 8] = [
        Button::Right,
        Button::Left,
        Button::Up,
        Button::Down,
        Button::A,
        Button::B,
        Button::Select,
        Button::Start,
    ];

    #[inline]
    fn mask(self) -> u8 {
        1 << self as u8
    }
}

/// Host-side button state shared with the emulation thread. Active-low:
/// a clear bit means the button is held. Low nibble is the d-pad, high
/// nibble the action buttons.
#[derive(Clone, Debug)]
pub struct JoypadHandle {
    state: Arc<AtomicU8>,
}

impl Default for JoypadHandle {
    fn default() -> Self {
        Self {
            state: Arc::new(AtomicU8::new(0xFF)),
        }
    }
}

impl JoypadHandle {
    pub fn set(&self, mask: u8) {
        self.state.store(mask, Ordering::Relaxed);
    }

    pub fn get(&self) -> u8 {
        self.state.load(Ordering::Relaxed)
    }

    pub fn press(&self, button: Button) {
        self.state.fetch_and(!button.mask(), Ordering::Relaxed);
    }

    pub fn release(&self, button: Button) {
        self.state.fetch_or(button.mask(), Ordering::Relaxed);
    }
}

/// P1/FF00. Bits 4 and 5 select the d-pad and action groups (0 selects).
#[derive(Debug)]
pub(super) struct Joypad {
    select: u8,
    handle: JoypadHandle,
    /// Low nibble seen at the last poll, for edge detection.
    lines: u8,
}

impl Joypad {
    pub(super) fn new() -> Self {
        Self {
            select: 0x30,
            handle: JoypadHandle::default(),
            lines: 0x0F,
        }
    }

    pub(super) fn handle(&self) -> JoypadHandle {
        self.handle.clone()
    }

    fn input_lines(&self) -> u8 {
        let mask = self.handle.get();
        let mut low = 0x0F;
        if self.select & 0x10 == 0 {
            low &= mask & 0x0F;
        }
        if self.select & 0x20 == 0 {
            low &= mask >> 4;
        }
        low
    }

    pub(super) fn read(&self) -> u8 {
        0xC0 | self.select | self.input_lines()
    }

    pub(super) fn write(&mut self, value: u8) {
        self.select = value & 0x30;
    }

    /// Request the joypad interrupt when any input line falls.
    pub(super) fn poll(&mut self, interrupts: &mut InterruptController) {
        let lines = self.input_lines();
        if self.lines & !lines != 0 {
            interrupts.request(Interrupt::JOYPAD);
        }
        self.lines = lines;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_selected_reads_high_nibble() {
        let joypad = Joypad::new();
        joypad.handle().press(Button::A);
        assert_eq!(joypad.read(), 0xFF);
    }

    #[test]
    fn groups_map_to_low_nibble() {
        let mut joypad = Joypad::new();
        let handle = joypad.handle();
        handle.press(Button::Down);
        handle.press(Button::Start);

        joypad.write(0x20);
        assert_eq!(joypad.read(), 0xC0 | 0x20 | 0x07);
        joypad.write(0x10);
        assert_eq!(joypad.read(), 0xC0 | 0x10 | 0x07);

        handle.release(Button::Down);
        joypad.write(0x00);
        assert_eq!(joypad.read(), 0xC0 | 0x07);
        joypad.write(0x20);
        assert_eq!(joypad.read(), 0xC0 | 0x20 | 0x0F);
    }

    #[test]
    fn press_edge_requests_interrupt_once() {
        let mut joypad = Joypad::new();
        let mut ic = InterruptController::new();
        joypad.write(0x10);
        joypad.poll(&mut ic);
        assert!(!ic.is_requested(Interrupt::JOYPAD));

        joypad.handle().press(Button::B);
        joypad.poll(&mut ic);
        assert!(ic.is_requested(Interrupt::JOYPAD));

        ic.clear(Interrupt::JOYPAD);
        joypad.poll(&mut ic);
        assert!(!ic.is_requested(Interrupt::JOYPAD));
    }

    #[test]
    fn unselected_press_is_silent() {
        let mut joypad = Joypad::new();
        let mut ic = InterruptController::new();
        joypad.write(0x20);
        joypad.handle().press(Button::A);
        joypad.poll(&mut ic);
        assert!(!ic.is_requested(Interrupt::JOYPAD));
    }
}
