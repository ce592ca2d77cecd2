use anyhow::Result;
use pocketboy_gb::machine::CYCLES_PER_FRAME;
use pocketboy_gb::{GameBoy, GameBoyOptions, TestVerdict};
use typed_builder::TypedBuilder;

/// Headless run of one cartridge.
#[derive(TypedBuilder)]
pub struct RunConfig {
    pub rom: Vec<u8>,
    #[builder(default, setter(strip_option))]
    pub boot_rom: Option<Vec<u8>>,
    /// Frames to run before giving up on a verdict.
    #[builder(default = 3600)]
    pub max_frames: u32,
    /// Log serial lines as they arrive.
    #[builder(default = false)]
    pub serial_echo: bool,
}

#[derive(Debug)]
pub struct RunReport {
    pub frames: u32,
    pub verdict: Option<TestVerdict>,
    pub serial: String,
}

/// Verdict printed by blargg-style test ROMs over the serial port.
pub fn serial_verdict(output: &[u8]) -> Option<TestVerdict> {
    let text = String::from_utf8_lossy(output);
    if text.contains("Passed") {
        Some(TestVerdict::Pass)
    } else if text.contains("Failed") {
        Some(TestVerdict::Fail)
    } else {
        None
    }
}

/// Run frame by frame until the cartridge reports a verdict, either through
/// the `LD B,B` register convention or over serial, or `max_frames` pass.
pub fn run(config: RunConfig) -> Result<RunReport> {
    let RunConfig {
        rom,
        boot_rom,
        max_frames,
        serial_echo,
    } = config;

    let options = match boot_rom {
        Some(boot_rom) => GameBoyOptions::builder()
            .boot_rom(boot_rom)
            .serial_echo(serial_echo)
            .build(),
        None => GameBoyOptions::builder().serial_echo(serial_echo).build(),
    };
    let mut gb = GameBoy::from_rom(rom, options)?;

    let mut frames = 0;
    let mut verdict = None;
    while frames < max_frames {
        let hit = gb.run_until(CYCLES_PER_FRAME as u64, |gb| gb.test_verdict().is_some())?;
        frames += 1;
        verdict = if hit {
            gb.test_verdict()
        } else {
            serial_verdict(gb.serial_output())
        };
        if verdict.is_some() {
            break;
        }
    }

    log::info!("stopped after {frames} frames, verdict {verdict:?}");
    Ok(RunReport {
        frames,
        verdict,
        serial: String::from_utf8_lossy(gb.serial_output()).into_owned(),
    })
}
