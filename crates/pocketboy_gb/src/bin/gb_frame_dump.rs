use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use pocketboy_gb::cpu::Bus;
use pocketboy_gb::{FrameBuffer, GameBoy, GameBoyOptions, SCREEN_HEIGHT, SCREEN_WIDTH};

const USAGE: &str = "Usage: gb_frame_dump <rom_path> <out_rgb24_path> [frames|--until-ldbb]";
/// Instruction budget for `--until-ldbb`, in T-cycles.
const BREAKPOINT_BUDGET: u64 = 200_000_000;

/// DMG shade to 8-bit gray, lightest first.
const GRAY_RAMP: [u8; 4] = [0xFF, 0xAA, 0x55, 0x00];

fn to_rgb24(frame: &FrameBuffer) -> Vec<u8> {
    frame
        .as_slice()
        .iter()
        .flat_map(|&shade| [GRAY_RAMP[shade as usize & 0x03]; 3])
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let (Some(rom_path), Some(out_path)) = (args.next(), args.next()) else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };
    let rom_path = PathBuf::from(rom_path);
    let out_path = PathBuf::from(out_path);
    let mode = args.next().unwrap_or_else(|| "120".to_string());
    let frames: Option<u32> = if mode == "--until-ldbb" {
        None
    } else {
        Some(
            mode.parse()
                .with_context(|| format!("invalid frame count '{mode}'"))?,
        )
    };

    let rom = std::fs::read(&rom_path)
        .with_context(|| format!("failed to read ROM '{}'", rom_path.display()))?;
    let mut gb = GameBoy::from_rom(rom, GameBoyOptions::default())?;

    match frames {
        Some(frames) => {
            for _ in 0..frames {
                gb.step_frame()?;
            }
        }
        None => {
            let hit = gb.run_until(BREAKPOINT_BUDGET, |gb| {
                let pc = gb.cpu.regs.pc;
                !gb.cpu.halted && gb.bus_mut().read8(pc) == 0x40
            })?;
            if !hit {
                bail!("did not hit LD B,B software breakpoint within the cycle budget");
            }
            // Let the PPU finish the frame the breakpoint was waiting on.
            gb.step_frame()?;
        }
    }

    let buffer = to_rgb24(&gb.frame_handle().snapshot());
    std::fs::write(&out_path, &buffer)
        .with_context(|| format!("failed to write '{}'", out_path.display()))?;

    let when = match frames {
        Some(frames) => format!("after {frames} frames"),
        None => "at LD B,B breakpoint".to_string(),
    };
    println!(
        "Wrote {} bytes ({}x{} rgb24) {} to '{}'",
        buffer.len(),
        SCREEN_WIDTH,
        SCREEN_HEIGHT,
        when,
        out_path.display()
    );
    Ok(())
}
