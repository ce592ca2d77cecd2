//! Scanline PPU.
//!
//! Each visible line runs OAM scan (80), pixel transfer (172) and H-blank
//! (204); lines 144–153 are V-blank. The line is rendered in one go when
//! pixel transfer ends. Leftover cycles carry into the next mode, so a
//! frame is always 70224 cycles no matter how the CPU batches them.

mod mmio;
mod regs;
mod render;

pub use regs::{Lcdc, Mode, SpriteAttrs, Stat};

use super::frame::{FrameBuffer, FrameHandle};
use super::interrupts::{Interrupt, InterruptController};
use super::memory::Ram;
use crate::SCREEN_HEIGHT;

pub const VRAM_SIZE: usize = 0x2000;
pub const OAM_SIZE: usize = 0xA0;
pub const CYCLES_PER_LINE: u32 = 456;
pub const LINES_PER_FRAME: u32 = 154;
pub const CYCLES_PER_FRAME: u32 = CYCLES_PER_LINE * LINES_PER_FRAME;

const LAST_LINE: u8 = (LINES_PER_FRAME - 1) as u8;

pub struct Ppu {
    vram: Ram,
    oam: Ram,

    lcdc: Lcdc,
    stat: Stat,
    scy: u8,
    scx: u8,
    ly: u8,
    lyc: u8,
    wy: u8,
    wx: u8,
    bgp: u8,
    obp0: u8,
    obp1: u8,

    mode: Mode,
    mode_clock: u32,
    /// Window row to fetch next; advances only on lines that drew it.
    window_line: u8,
    /// Cycles already elapsed in OAM scan when the LCD is switched on.
    start_offset: u32,

    frame: FrameBuffer,
    front: FrameHandle,
    frame_count: u64,
}

impl Ppu {
    /// Power-on state: LCD off, registers cleared.
    pub fn new(start_offset: u32) -> Self {
        Self {
            vram: Ram::new(VRAM_SIZE),
            oam: Ram::new(OAM_SIZE),
            lcdc: Lcdc::empty(),
            stat: Stat::empty(),
            scy: 0,
            scx: 0,
            ly: 0,
            lyc: 0,
            wy: 0,
            wx: 0,
            bgp: 0,
            obp0: 0,
            obp1: 0,
            mode: Mode::HBlank,
            mode_clock: 0,
            window_line: 0,
            start_offset,
            frame: FrameBuffer::new(),
            front: FrameHandle::new(),
            frame_count: 0,
        }
    }

    /// Register state the boot ROM leaves behind: LCD and background on,
    /// BGP 0xFC, both object palettes 0xFF.
    pub fn with_post_boot_state(start_offset: u32) -> Self {
        let mut ppu = Self::new(start_offset);
        ppu.lcdc = Lcdc::from_bits_retain(0x91);
        ppu.bgp = 0xFC;
        ppu.obp0 = 0xFF;
        ppu.obp1 = 0xFF;
        ppu.mode = Mode::OamScan;
        ppu.mode_clock = start_offset;
        ppu
    }

    pub fn lcd_enabled(&self) -> bool {
        self.lcdc.contains(Lcdc::LCD_ENABLE)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn ly(&self) -> u8 {
        self.ly
    }

    /// Completed frames since power-on.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// The frame being drawn. Lines past the current LY hold the previous
    /// frame.
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn frame_handle(&self) -> FrameHandle {
        self.front.clone()
    }

    /// Advance by `cycles` T-cycles. Does nothing while the LCD is off.
    pub fn step(&mut self, cycles: u32, interrupts: &mut InterruptController) {
        if !self.lcd_enabled() {
            return;
        }
        self.mode_clock += cycles;
        while self.mode_clock >= self.mode.duration() {
            self.mode_clock -= self.mode.duration();
            self.advance_mode(interrupts);
        }
    }

    fn advance_mode(&mut self, interrupts: &mut InterruptController) {
        match self.mode {
            Mode::OamScan => self.enter_mode(Mode::Transfer, interrupts),
            Mode::Transfer => {
                self.render_scanline();
                self.enter_mode(Mode::HBlank, interrupts);
            }
            Mode::HBlank => {
                self.set_ly(self.ly + 1, interrupts);
                if self.ly as usize == SCREEN_HEIGHT {
                    interrupts.request(Interrupt::VBLANK);
                    self.enter_mode(Mode::VBlank, interrupts);
                } else {
                    self.enter_mode(Mode::OamScan, interrupts);
                }
            }
            Mode::VBlank => {
                if self.ly == LAST_LINE {
                    self.finish_frame();
                    self.set_ly(0, interrupts);
                    self.enter_mode(Mode::OamScan, interrupts);
                } else {
                    self.set_ly(self.ly + 1, interrupts);
                }
            }
        }
    }

    fn enter_mode(&mut self, mode: Mode, interrupts: &mut InterruptController) {
        self.mode = mode;
        let select = match mode {
            Mode::HBlank => Stat::HBLANK_SELECT,
            Mode::VBlank => Stat::VBLANK_SELECT,
            Mode::OamScan => Stat::OAM_SELECT,
            Mode::Transfer => Stat::empty(),
        };
        // DMG: the OAM select also fires at the start of V-blank.
        let oam_at_vblank = mode == Mode::VBlank && self.stat.contains(Stat::OAM_SELECT);
        if self.stat.intersects(select) || oam_at_vblank {
            interrupts.request(Interrupt::LCD_STAT);
        }
    }

    fn set_ly(&mut self, ly: u8, interrupts: &mut InterruptController) {
        self.ly = ly;
        self.compare_lyc(interrupts);
    }

    fn compare_lyc(&mut self, interrupts: &mut InterruptController) {
        if self.ly == self.lyc && self.stat.contains(Stat::LYC_SELECT) {
            interrupts.request(Interrupt::LCD_STAT);
        }
    }

    fn finish_frame(&mut self) {
        self.window_line = 0;
        self.front.publish(&self.frame);
        self.frame_count += 1;
        log::trace!("PPU: frame {} complete", self.frame_count);
    }

    fn lcd_off(&mut self) {
        self.ly = 0;
        self.mode = Mode::HBlank;
        self.mode_clock = 0;
        self.window_line = 0;
        self.frame.clear();
        self.front.publish(&self.frame);
        log::debug!("PPU: LCD off");
    }

    fn lcd_on(&mut self, interrupts: &mut InterruptController) {
        self.ly = 0;
        self.mode = Mode::OamScan;
        self.mode_clock = self.start_offset;
        self.window_line = 0;
        self.compare_lyc(interrupts);
        log::debug!("PPU: LCD on (phase offset {})", self.start_offset);
    }
}

#[cfg(test)]
mod tests;
