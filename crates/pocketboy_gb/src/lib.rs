//! DMG (original Game Boy) emulation core.
//!
//! [`GameBoy`] owns the whole machine. Hosts feed it a ROM image, call
//! [`GameBoy::step_frame`] in a loop, read finished frames through a
//! [`FrameHandle`] and write buttons through a [`JoypadHandle`].

pub mod cpu;
pub mod machine;

pub use machine::{
    Button, FrameBuffer, FrameHandle, GameBoy, GameBoyOptions, JoypadHandle, TestVerdict,
};

/// Logical screen width in pixels for the Game Boy DMG.
pub const SCREEN_WIDTH: usize = 160;
/// Logical screen height in pixels.
pub const SCREEN_HEIGHT: usize = 144;
