use anyhow::{Context, Result};
use pocketboy::{RunConfig, RunReport};
use pocketboy_gb::TestVerdict;

const USAGE: &str = "Usage: pocketboy <rom_path> [--frames N] [--boot-rom PATH] [--echo]";

fn read_file(path: &str, what: &str) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("failed to read {what} '{path}'"))
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let mut rom_path = None;
    let mut boot_rom_path = None;
    let mut max_frames = None;
    let mut serial_echo = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--frames" => {
                let value = args.next().context("--frames needs a value")?;
                max_frames = Some(
                    value
                        .parse::<u32>()
                        .with_context(|| format!("invalid frame count '{value}'"))?,
                );
            }
            "--boot-rom" => boot_rom_path = Some(args.next().context("--boot-rom needs a path")?),
            "--echo" => serial_echo = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                return Ok(());
            }
            _ if rom_path.is_none() => rom_path = Some(arg),
            other => {
                eprintln!("Unexpected argument '{other}'.\n{USAGE}");
                std::process::exit(2);
            }
        }
    }

    let Some(rom_path) = rom_path else {
        eprintln!("No ROM path provided.\n{USAGE}");
        std::process::exit(2);
    };
    log::info!("Running ROM path: '{}'", rom_path);

    let rom = read_file(&rom_path, "ROM")?;
    let boot_rom = boot_rom_path
        .map(|path| read_file(&path, "boot ROM"))
        .transpose()?;

    let config = RunConfig::builder()
        .rom(rom)
        .max_frames(max_frames.unwrap_or(3600))
        .serial_echo(serial_echo)
        .build();
    let config = RunConfig { boot_rom, ..config };

    let RunReport {
        frames,
        verdict,
        serial,
    } = pocketboy::run(config)?;

    if !serial.is_empty() {
        print!("{serial}");
        if !serial.ends_with('\n') {
            println!();
        }
    }
    match verdict {
        Some(TestVerdict::Pass) => println!("PASS after {frames} frames"),
        Some(TestVerdict::Fail) => {
            println!("FAIL after {frames} frames");
            std::process::exit(1);
        }
        None => println!("no verdict after {frames} frames"),
    }
    Ok(())
}
