use super::*;

fn lcd_on() -> (Ppu, InterruptController) {
    let mut ppu = Ppu::new(0);
    let mut ic = InterruptController::new();
    ppu.write_register(0xFF40, 0x91, &mut ic);
    ppu.write_register(0xFF47, 0xE4, &mut ic);
    ppu.write_register(0xFF48, 0xE4, &mut ic);
    ppu.write_register(0xFF49, 0x1B, &mut ic);
    (ppu, ic)
}

/// Tile `index` at 0x8000 filled with one color.
fn solid_tile(ppu: &mut Ppu, index: u16, color: u8) {
    let lo = if color & 1 != 0 { 0xFF } else { 0x00 };
    let hi = if color & 2 != 0 { 0xFF } else { 0x00 };
    for row in 0..8 {
        ppu.write_vram(0x8000 + index * 16 + row * 2, lo);
        ppu.write_vram(0x8000 + index * 16 + row * 2 + 1, hi);
    }
}

fn run_to_line(ppu: &mut Ppu, ic: &mut InterruptController, line: u8) {
    while ppu.ly() != line {
        ppu.step(4, ic);
    }
}

#[test]
fn visible_line_takes_456_cycles() {
    let (mut ppu, mut ic) = lcd_on();
    assert_eq!(ppu.mode(), Mode::OamScan);
    ppu.step(79, &mut ic);
    assert_eq!(ppu.mode(), Mode::OamScan);
    ppu.step(1, &mut ic);
    assert_eq!(ppu.mode(), Mode::Transfer);
    ppu.step(172, &mut ic);
    assert_eq!(ppu.mode(), Mode::HBlank);
    ppu.step(203, &mut ic);
    assert_eq!(ppu.ly(), 0);
    ppu.step(1, &mut ic);
    assert_eq!(ppu.ly(), 1);
    assert_eq!(ppu.mode(), Mode::OamScan);
}

#[test]
fn frame_takes_70224_cycles_regardless_of_batching() {
    let (mut ppu, mut ic) = lcd_on();
    let mut elapsed = 0;
    while ppu.frame_count() == 0 {
        // Odd batch size forces remainders across mode boundaries.
        ppu.step(12, &mut ic);
        elapsed += 12;
    }
    assert!((CYCLES_PER_FRAME..CYCLES_PER_FRAME + 12).contains(&elapsed));
    assert_eq!(ppu.ly(), 0);
    assert_eq!(ppu.mode(), Mode::OamScan);

    let (mut ppu, mut ic) = lcd_on();
    ppu.step(CYCLES_PER_FRAME - 1, &mut ic);
    assert_eq!(ppu.frame_count(), 0);
    assert_eq!(ppu.ly(), 153);
    ppu.step(1, &mut ic);
    assert_eq!(ppu.frame_count(), 1);
}

#[test]
fn vblank_spans_lines_144_to_153_and_requests_interrupt() {
    let (mut ppu, mut ic) = lcd_on();
    run_to_line(&mut ppu, &mut ic, 143);
    assert!(!ic.is_requested(Interrupt::VBLANK));
    run_to_line(&mut ppu, &mut ic, 144);
    assert_eq!(ppu.mode(), Mode::VBlank);
    assert!(ic.is_requested(Interrupt::VBLANK));
    run_to_line(&mut ppu, &mut ic, 153);
    assert_eq!(ppu.mode(), Mode::VBlank);
}

#[test]
fn lyc_match_requests_stat_when_selected() {
    let (mut ppu, mut ic) = lcd_on();
    ppu.write_register(0xFF45, 3, &mut ic);
    ppu.write_register(0xFF41, 0x40, &mut ic);
    run_to_line(&mut ppu, &mut ic, 2);
    assert!(!ic.is_requested(Interrupt::LCD_STAT));
    assert_eq!(ppu.read_register(0xFF41) & 0x04, 0);

    run_to_line(&mut ppu, &mut ic, 3);
    assert!(ic.is_requested(Interrupt::LCD_STAT));
    assert_eq!(ppu.read_register(0xFF41) & 0x44, 0x44);
}

#[test]
fn lyc_write_matching_current_line_requests_stat() {
    let (mut ppu, mut ic) = lcd_on();
    ppu.write_register(0xFF41, 0x40, &mut ic);
    run_to_line(&mut ppu, &mut ic, 5);
    ic.clear(Interrupt::LCD_STAT);
    ppu.write_register(0xFF45, 5, &mut ic);
    assert!(ic.is_requested(Interrupt::LCD_STAT));
}

#[test]
fn mode_selects_raise_stat_on_entry() {
    let (mut ppu, mut ic) = lcd_on();
    ppu.write_register(0xFF41, 0x08, &mut ic);
    ppu.step(80 + 171, &mut ic);
    assert!(!ic.is_requested(Interrupt::LCD_STAT));
    ppu.step(1, &mut ic);
    assert!(ic.is_requested(Interrupt::LCD_STAT));

    let (mut ppu, mut ic) = lcd_on();
    ppu.write_register(0xFF41, 0x10, &mut ic);
    run_to_line(&mut ppu, &mut ic, 143);
    assert!(!ic.is_requested(Interrupt::LCD_STAT));
    run_to_line(&mut ppu, &mut ic, 144);
    assert!(ic.is_requested(Interrupt::LCD_STAT));
}

#[test]
fn stat_reads_unused_bit_and_ignores_mode_writes() {
    let (mut ppu, mut ic) = lcd_on();
    ppu.write_register(0xFF41, 0xFF, &mut ic);
    // Selects stored, mode 2, LY == LYC == 0.
    assert_eq!(ppu.read_register(0xFF41), 0x80 | 0x78 | 0x04 | 0x02);
}

#[test]
fn ly_writes_are_ignored() {
    let (mut ppu, mut ic) = lcd_on();
    run_to_line(&mut ppu, &mut ic, 10);
    ppu.write_register(0xFF44, 0, &mut ic);
    assert_eq!(ppu.read_register(0xFF44), 10);
}

#[test]
fn lcd_off_resets_line_and_blanks_frame() {
    let (mut ppu, mut ic) = lcd_on();
    solid_tile(&mut ppu, 0, 3);
    run_to_line(&mut ppu, &mut ic, 20);
    assert_eq!(ppu.frame().pixel(0, 0), 3);

    ppu.write_register(0xFF40, 0x11, &mut ic);
    assert_eq!(ppu.ly(), 0);
    assert_eq!(ppu.read_register(0xFF41) & 0x03, 0);
    assert_eq!(ppu.frame().pixel(0, 0), 0);
    assert_eq!(ppu.frame_handle().snapshot().pixel(0, 0), 0);

    ppu.step(CYCLES_PER_FRAME, &mut ic);
    assert_eq!(ppu.ly(), 0);
    assert_eq!(ppu.frame_count(), 0);

    ppu.write_register(0xFF40, 0x91, &mut ic);
    assert_eq!(ppu.mode(), Mode::OamScan);
}

#[test]
fn start_offset_shifts_initial_phase() {
    let mut ppu = Ppu::new(400);
    let mut ic = InterruptController::new();
    ppu.write_register(0xFF40, 0x91, &mut ic);
    ppu.step(56, &mut ic);
    assert_eq!(ppu.ly(), 1);
}

#[test]
fn background_uses_scroll_and_palette() {
    let (mut ppu, mut ic) = lcd_on();
    solid_tile(&mut ppu, 1, 2);
    // Map entry (1, 0) points at tile 1; everything else is tile 0.
    ppu.write_vram(0x9801, 1);
    ppu.write_register(0xFF47, 0b1001_0000, &mut ic);

    run_to_line(&mut ppu, &mut ic, 1);
    let frame = ppu.frame();
    assert_eq!(frame.pixel(7, 0), 0);
    assert_eq!(frame.pixel(8, 0), 1);
    assert_eq!(frame.pixel(15, 0), 1);
    assert_eq!(frame.pixel(16, 0), 0);

    ppu.write_register(0xFF43, 4, &mut ic);
    run_to_line(&mut ppu, &mut ic, 2);
    assert_eq!(ppu.frame().pixel(4, 1), 1);
    assert_eq!(ppu.frame().pixel(3, 1), 0);
}

#[test]
fn signed_tile_addressing_reads_from_9000() {
    let (mut ppu, mut ic) = lcd_on();
    ppu.write_register(0xFF40, 0x81, &mut ic);
    // Tile 0 in signed mode lives at 0x9000.
    for row in 0..8 {
        ppu.write_vram(0x9000 + row * 2, 0xFF);
    }
    run_to_line(&mut ppu, &mut ic, 1);
    assert_eq!(ppu.frame().pixel(0, 0), 1);
}

#[test]
fn bg_disabled_renders_color_zero() {
    let (mut ppu, mut ic) = lcd_on();
    solid_tile(&mut ppu, 0, 3);
    ppu.write_register(0xFF40, 0x90, &mut ic);
    ppu.write_register(0xFF47, 0xE7, &mut ic);
    run_to_line(&mut ppu, &mut ic, 1);
    assert_eq!(ppu.frame().pixel(0, 0), 3);
    assert_eq!(ppu.frame().pixel(100, 0), 3);
}

#[test]
fn window_uses_its_own_line_counter() {
    let (mut ppu, mut ic) = lcd_on();
    solid_tile(&mut ppu, 1, 3);
    // Window map at 0x9C00, first row tile 1, second row tile 0.
    for col in 0..32 {
        ppu.write_vram(0x9C00 + col, 1);
    }
    ppu.write_register(0xFF40, 0x91 | 0x20 | 0x40, &mut ic);
    ppu.write_register(0xFF4A, 10, &mut ic);
    ppu.write_register(0xFF4B, 7 + 80, &mut ic);

    run_to_line(&mut ppu, &mut ic, 11);
    assert_eq!(ppu.frame().pixel(79, 10), 0);
    assert_eq!(ppu.frame().pixel(80, 10), 3);
    assert_eq!(ppu.frame().pixel(80, 9), 0);

    // Hide the window for a few lines; its row must not advance.
    ppu.write_register(0xFF4B, 200, &mut ic);
    run_to_line(&mut ppu, &mut ic, 20);
    ppu.write_register(0xFF4B, 7, &mut ic);
    run_to_line(&mut ppu, &mut ic, 27);
    // Window rows 1..7 are still tile row 0.
    assert_eq!(ppu.frame().pixel(0, 26), 3);
}

fn place_sprite(ppu: &mut Ppu, index: u16, y: u8, x: u8, tile: u8, attrs: u8) {
    let base = 0xFE00 + index * 4;
    ppu.write_oam(base, y);
    ppu.write_oam(base + 1, x);
    ppu.write_oam(base + 2, tile);
    ppu.write_oam(base + 3, attrs);
}

#[test]
fn sprite_draws_with_its_palette_and_transparency() {
    let (mut ppu, mut ic) = lcd_on();
    ppu.write_register(0xFF40, 0x93, &mut ic);
    // Tile 2: left half color 1, right half transparent.
    for row in 0..8 {
        ppu.write_vram(0x8020 + row * 2, 0xF0);
    }
    place_sprite(&mut ppu, 0, 16, 8, 2, 0x00);
    place_sprite(&mut ppu, 1, 16, 40, 2, 0x10);

    run_to_line(&mut ppu, &mut ic, 1);
    let frame = ppu.frame();
    assert_eq!(frame.pixel(0, 0), 1);
    assert_eq!(frame.pixel(3, 0), 1);
    assert_eq!(frame.pixel(4, 0), 0);
    // OBP1 = 0x1B maps color 1 to 2.
    assert_eq!(frame.pixel(32, 0), 2);
}

#[test]
fn sprite_flips() {
    let (mut ppu, mut ic) = lcd_on();
    ppu.write_register(0xFF40, 0x93, &mut ic);
    // Tile 2: only the top row, leftmost pixel.
    ppu.write_vram(0x8020, 0x80);
    place_sprite(&mut ppu, 0, 16, 8, 2, 0x20);
    place_sprite(&mut ppu, 1, 16, 24, 2, 0x40);

    run_to_line(&mut ppu, &mut ic, 8);
    let frame = ppu.frame();
    assert_eq!(frame.pixel(7, 0), 1);
    assert_eq!(frame.pixel(0, 0), 0);
    assert_eq!(frame.pixel(16, 7), 1);
    assert_eq!(frame.pixel(16, 0), 0);
}

#[test]
fn tall_sprites_ignore_tile_low_bit() {
    let (mut ppu, mut ic) = lcd_on();
    ppu.write_register(0xFF40, 0x97, &mut ic);
    solid_tile(&mut ppu, 4, 1);
    solid_tile(&mut ppu, 5, 2);
    place_sprite(&mut ppu, 0, 16, 8, 5, 0x00);

    run_to_line(&mut ppu, &mut ic, 16);
    assert_eq!(ppu.frame().pixel(0, 0), 1);
    assert_eq!(ppu.frame().pixel(0, 15), 2);
}

#[test]
fn behind_bg_sprite_shows_only_over_color_zero() {
    let (mut ppu, mut ic) = lcd_on();
    ppu.write_register(0xFF40, 0x93, &mut ic);
    solid_tile(&mut ppu, 1, 1);
    solid_tile(&mut ppu, 2, 3);
    ppu.write_vram(0x9800, 1);
    place_sprite(&mut ppu, 0, 16, 12, 2, 0x80);

    run_to_line(&mut ppu, &mut ic, 1);
    let frame = ppu.frame();
    assert_eq!(frame.pixel(4, 0), 1);
    assert_eq!(frame.pixel(8, 0), 3);
}

#[test]
fn ten_sprites_per_line_in_oam_order() {
    let (mut ppu, mut ic) = lcd_on();
    ppu.write_register(0xFF40, 0x93, &mut ic);
    solid_tile(&mut ppu, 2, 3);
    for i in 0..11u16 {
        place_sprite(&mut ppu, i, 16, 8 + i as u8 * 8, 2, 0x00);
    }
    run_to_line(&mut ppu, &mut ic, 1);
    assert_eq!(ppu.frame().pixel(9 * 8, 0), 3);
    assert_eq!(ppu.frame().pixel(10 * 8, 0), 0);
}

#[test]
fn lower_x_wins_then_lower_oam_index() {
    let (mut ppu, mut ic) = lcd_on();
    ppu.write_register(0xFF40, 0x93, &mut ic);
    solid_tile(&mut ppu, 2, 1);
    solid_tile(&mut ppu, 3, 2);
    // Higher OAM index but smaller X: wins where they overlap.
    place_sprite(&mut ppu, 0, 16, 12, 2, 0x00);
    place_sprite(&mut ppu, 1, 16, 10, 3, 0x00);
    // Same X: lower OAM index wins.
    place_sprite(&mut ppu, 2, 16, 60, 3, 0x00);
    place_sprite(&mut ppu, 3, 16, 60, 2, 0x00);

    run_to_line(&mut ppu, &mut ic, 1);
    let frame = ppu.frame();
    assert_eq!(frame.pixel(5, 0), 2);
    assert_eq!(frame.pixel(10, 0), 1);
    assert_eq!(frame.pixel(52, 0), 2);
}

#[test]
fn finished_frame_is_published_to_handle() {
    let (mut ppu, mut ic) = lcd_on();
    let handle = ppu.frame_handle();
    solid_tile(&mut ppu, 0, 2);
    ppu.step(CYCLES_PER_FRAME - 1, &mut ic);
    assert_eq!(handle.snapshot().pixel(0, 143), 0);
    ppu.step(1, &mut ic);
    assert_eq!(handle.snapshot().pixel(0, 143), 2);
    assert!(handle.with_frame(|f| f.row(0).iter().all(|&p| p == 2)));
}
