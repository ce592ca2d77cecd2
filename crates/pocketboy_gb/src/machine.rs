mod bus;
mod cartridge;
mod frame;
mod gameboy;
mod interrupts;
mod memory;
mod options;
mod ppu;
mod serial;
mod timer;

pub use bus::{Button, GameBoyBus, JoypadHandle, BOOT_ROM_SIZE};
pub use cartridge::{
    Cartridge, CartridgeHeader, MapperKind, Mbc1Cartridge, Mbc3Cartridge, RomOnlyCartridge, Rtc,
    RtcRegisters,
};
pub use frame::{FrameBuffer, FrameHandle};
pub use gameboy::{GameBoy, TestVerdict};
pub use interrupts::{Interrupt, InterruptController};
pub use memory::{Ram, Rom};
pub use options::{GameBoyOptions, PPU_START_OFFSET_ENV};
pub use ppu::{Lcdc, Mode, Ppu, SpriteAttrs, Stat, CYCLES_PER_FRAME, CYCLES_PER_LINE};
pub use serial::{Serial, SerialSink};
pub use timer::Timer;
