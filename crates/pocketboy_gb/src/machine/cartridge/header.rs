use anyhow::{bail, Result};

/// Offset of the first byte after the header; shorter images are rejected.
pub const HEADER_END: usize = 0x150;

/// The fields of the cartridge header the core needs, parsed once at load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartridgeHeader {
    pub title: String,
    pub cartridge_type: u8,
    pub rom_size_code: u8,
    pub ram_size_code: u8,
}

/// Bank controller family selected by the type byte at 0x147.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapperKind {
    RomOnly,
    Mbc1,
    Mbc3,
}

impl CartridgeHeader {
    pub fn parse(rom: &[u8]) -> Result<Self> {
        if rom.len() < HEADER_END {
            bail!(
                "ROM image is {} bytes, too short to contain a cartridge header",
                rom.len()
            );
        }

        let title = rom[0x134..0x144]
            .iter()
            .take_while(|&&b| b != 0)
            .map(|&b| {
                if b.is_ascii_graphic() || b == b' ' {
                    b as char
                } else {
                    '?'
                }
            })
            .collect::<String>()
            .trim_end()
            .to_string();

        let header = Self {
            title,
            cartridge_type: rom[0x147],
            rom_size_code: rom[0x148],
            ram_size_code: rom[0x149],
        };

        header.mapper()?;
        if header.rom_banks().is_none() {
            bail!("unsupported ROM size code {:#04X}", header.rom_size_code);
        }
        if header.ram_size_code > 0x05 {
            bail!("unsupported RAM size code {:#04X}", header.ram_size_code);
        }
        Ok(header)
    }

    pub fn mapper(&self) -> Result<MapperKind> {
        Ok(match self.cartridge_type {
            0x00 | 0x08 | 0x09 => MapperKind::RomOnly,
            0x01..=0x03 => MapperKind::Mbc1,
            0x0F..=0x13 => MapperKind::Mbc3,
            other => bail!("unsupported cartridge type {other:#04X}"),
        })
    }

    /// Number of 16 KiB ROM banks: 32 KiB << code.
    pub fn rom_banks(&self) -> Option<usize> {
        match self.rom_size_code {
            code @ 0x00..=0x08 => Some(2 << code),
            0x52 => Some(72),
            0x53 => Some(80),
            0x54 => Some(96),
            _ => None,
        }
    }

    /// External RAM size in bytes, or 0 when the type has no RAM.
    pub fn ram_size(&self) -> usize {
        if !self.has_ram() {
            return 0;
        }
        const KIB: usize = 1024;
        match self.ram_size_code {
            0x01 => 2 * KIB,
            0x02 => 8 * KIB,
            0x03 => 32 * KIB,
            0x04 => 128 * KIB,
            0x05 => 64 * KIB,
            _ => 0,
        }
    }

    pub fn has_ram(&self) -> bool {
        matches!(
            self.cartridge_type,
            0x02 | 0x03 | 0x08 | 0x09 | 0x10 | 0x12 | 0x13
        )
    }

    pub fn has_rtc(&self) -> bool {
        matches!(self.cartridge_type, 0x0F | 0x10)
    }
}
