use super::*;

fn rom_only() -> Cartridge {
    let mut rom = vec![0u8; 0x8000];
    rom[0x0000] = 0x11;
    rom[0x0100] = 0x22;
    rom[0x4000] = 0x33;
    Cartridge::from_rom(rom).unwrap()
}

fn bus() -> GameBoyBus {
    GameBoyBus::post_boot(rom_only(), Serial::new(false), 0)
}

#[test]
fn boot_rom_overlays_first_page_until_ff50() {
    let mut boot = vec![0u8; BOOT_ROM_SIZE];
    boot[0] = 0x31;
    let mut bus = GameBoyBus::with_boot_rom(rom_only(), boot, Serial::new(false), 0);
    assert!(bus.boot_rom_enabled());
    assert_eq!(bus.read8(0x0000), 0x31);
    assert_eq!(bus.read8(0x0100), 0x22);

    bus.write8(0xFF50, 0x00);
    assert_eq!(bus.read8(0x0000), 0x31);
    bus.write8(0xFF50, 0x01);
    assert!(!bus.boot_rom_enabled());
    assert_eq!(bus.read8(0x0000), 0x11);
}

#[test]
fn cartridge_windows_route_to_cartridge() {
    let mut bus = bus();
    assert_eq!(bus.read8(0x0000), 0x11);
    assert_eq!(bus.read8(0x4000), 0x33);
    bus.write8(0x4000, 0x99);
    assert_eq!(bus.read8(0x4000), 0x33);
    assert_eq!(bus.read8(0xA000), 0xFF);
}

#[test]
fn echo_ram_mirrors_work_ram() {
    let mut bus = bus();
    bus.write8(0xC123, 0x5A);
    assert_eq!(bus.read8(0xE123), 0x5A);
    bus.write8(0xFDFF, 0xA5);
    assert_eq!(bus.read8(0xDDFF), 0xA5);
}

#[test]
fn unusable_region_is_open_bus() {
    let mut bus = bus();
    bus.write8(0xFEA0, 0x12);
    assert_eq!(bus.read8(0xFEA0), 0xFF);
    assert_eq!(bus.read8(0xFEFF), 0xFF);
}

#[test]
fn interrupt_registers() {
    let mut bus = bus();
    bus.write8(0xFF0F, 0x04);
    assert_eq!(bus.read8(0xFF0F), 0xE4);
    bus.write8(0xFFFF, 0xFF);
    assert_eq!(bus.read8(0xFFFF), 0xFF);
}

#[test]
fn word_access_is_little_endian() {
    let mut bus = bus();
    bus.write16(0xC000, 0xBEEF);
    assert_eq!(bus.read8(0xC000), 0xEF);
    assert_eq!(bus.read8(0xC001), 0xBE);
    assert_eq!(bus.read16(0xC000), 0xBEEF);
}

#[test]
fn high_ram_and_io_scratch_hold_values() {
    let mut bus = bus();
    bus.write8(0xFF80, 0x01);
    bus.write8(0xFFFE, 0x02);
    assert_eq!(bus.read8(0xFF80), 0x01);
    assert_eq!(bus.read8(0xFFFE), 0x02);

    assert_eq!(bus.read8(0xFF26), 0xF1);
    bus.write8(0xFF24, 0x00);
    assert_eq!(bus.read8(0xFF24), 0x00);
}

#[test]
fn oam_dma_copies_160_bytes() {
    let mut bus = bus();
    for i in 0..0xA0u16 {
        bus.write8(0xC100 + i, i as u8 ^ 0x5A);
    }
    bus.write8(0xFF46, 0xC1);
    for i in 0..0xA0u16 {
        assert_eq!(bus.read8(0xFE00 + i), i as u8 ^ 0x5A);
    }
    assert_eq!(bus.read8(0xFF46), 0xC1);
}

#[test]
fn serial_start_captures_byte() {
    let mut bus = bus();
    bus.write8(0xFF01, b'A');
    bus.write8(0xFF02, 0x81);
    assert_eq!(bus.serial().output(), b"A");
    let serial = crate::machine::Interrupt::SERIAL;
    assert!(bus.interrupts().is_requested(serial));
}

#[test]
fn lcd_registers_route_to_ppu() {
    let mut bus = bus();
    assert_eq!(bus.read8(0xFF40), 0x91);
    assert_eq!(bus.read8(0xFF47), 0xFC);
    bus.write8(0xFF42, 0x12);
    assert_eq!(bus.read8(0xFF42), 0x12);
    bus.write8(0x8000, 0x77);
    assert_eq!(bus.read8(0x8000), 0x77);
}

#[test]
fn timer_registers_route_to_timer() {
    let mut bus = bus();
    assert_eq!(bus.read8(0xFF04), 0xAB);
    bus.write8(0xFF04, 0x42);
    assert_eq!(bus.read8(0xFF04), 0x00);
    bus.write8(0xFF07, 0x05);
    assert_eq!(bus.read8(0xFF07), 0xFD);
}

#[test]
fn joypad_register_reflects_handle() {
    let mut bus = bus();
    let handle = bus.joypad_handle();
    handle.press(Button::Start);
    bus.write8(0xFF00, 0x10);
    assert_eq!(bus.read8(0xFF00), 0xD7);
}
