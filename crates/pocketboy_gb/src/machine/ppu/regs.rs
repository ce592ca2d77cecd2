use bitflags::bitflags;

bitflags! {
    /// FF40 LCD control.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Lcdc: u8 {
        const BG_WINDOW_ENABLE = 1 << 0;
        const OBJ_ENABLE = 1 << 1;
        const OBJ_TALL = 1 << 2;
        const BG_MAP_HIGH = 1 << 3;
        const TILE_DATA_UNSIGNED = 1 << 4;
        const WINDOW_ENABLE = 1 << 5;
        const WINDOW_MAP_HIGH = 1 << 6;
        const LCD_ENABLE = 1 << 7;
    }
}

bitflags! {
    /// Writable interrupt-select bits of FF41 STAT. Mode and coincidence
    /// bits are derived on read.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Stat: u8 {
        const HBLANK_SELECT = 1 << 3;
        const VBLANK_SELECT = 1 << 4;
        const OAM_SELECT = 1 << 5;
        const LYC_SELECT = 1 << 6;
    }
}

bitflags! {
    /// OAM byte 3.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct SpriteAttrs: u8 {
        const PALETTE_OBP1 = 1 << 4;
        const FLIP_X = 1 << 5;
        const FLIP_Y = 1 << 6;
        const BEHIND_BG = 1 << 7;
    }
}

/// STAT bit 2.
pub const STAT_COINCIDENCE: u8 = 1 << 2;

/// PPU mode as reported in STAT bits 0–1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    HBlank = 0,
    VBlank = 1,
    OamScan = 2,
    Transfer = 3,
}

impl Mode {
    /// Cycles spent in this mode per line.
    pub const fn duration(self) -> u32 {
        match self {
            Mode::OamScan => 80,
            Mode::Transfer => 172,
            Mode::HBlank => 204,
            Mode::VBlank => 456,
        }
    }
}
