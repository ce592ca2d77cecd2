use typed_builder::TypedBuilder;

/// Environment override for the PPU phase at LCD enable.
pub const PPU_START_OFFSET_ENV: &str = "POCKETBOY_PPU_START_OFFSET";

/// Machine configuration.
///
/// ```
/// use pocketboy_gb::GameBoyOptions;
///
/// let options = GameBoyOptions::builder().serial_echo(true).build();
/// assert!(options.boot_rom.is_none());
/// ```
#[derive(Clone, Debug, TypedBuilder)]
pub struct GameBoyOptions {
    /// 256-byte DMG boot ROM. Without one the machine starts in the state
    /// the boot ROM leaves behind.
    #[builder(default, setter(strip_option))]
    pub boot_rom: Option<Vec<u8>>,
    /// Start from the post-boot state even when a boot ROM is supplied.
    #[builder(default = false)]
    pub skip_boot: bool,
    /// Log each completed serial line at `info` on the `serial` target.
    #[builder(default = false)]
    pub serial_echo: bool,
    /// Cycles already elapsed in the first OAM scan when the LCD turns on.
    #[builder(default = ppu_start_offset_from_env())]
    pub ppu_start_offset: u32,
}

impl Default for GameBoyOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

fn ppu_start_offset_from_env() -> u32 {
    std::env::var(PPU_START_OFFSET_ENV)
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(0)
}
