use super::regs::{Lcdc, SpriteAttrs};
use super::Ppu;
use crate::SCREEN_WIDTH;

const MAX_SPRITES_PER_LINE: usize = 10;
const OAM_ENTRIES: usize = 40;
/// Window is hidden for WX above this.
const WX_MAX: u8 = 166;

#[derive(Clone, Copy, Debug)]
struct Sprite {
    /// Screen coordinates of the top-left corner.
    y: i16,
    x: i16,
    tile: u8,
    attrs: SpriteAttrs,
}

/// Map a 2-bit color index through a DMG palette register.
#[inline]
fn shade(palette: u8, color: u8) -> u8 {
    (palette >> (color * 2)) & 0x03
}

/// Color index of pixel `bit` (7 = leftmost) in a tile row.
#[inline]
fn tile_pixel(lo: u8, hi: u8, bit: u8) -> u8 {
    (((hi >> bit) & 0x01) << 1) | ((lo >> bit) & 0x01)
}

impl Ppu {
    pub(super) fn render_scanline(&mut self) {
        let line = self.ly as usize;
        // Raw BG/window color indices, kept for OBJ-to-BG priority.
        let mut bg = [0u8; SCREEN_WIDTH];
        if self.lcdc.contains(Lcdc::BG_WINDOW_ENABLE) {
            self.render_background(&mut bg);
            self.render_window(&mut bg);
        }

        let mut row = bg.map(|color| shade(self.bgp, color));
        if self.lcdc.contains(Lcdc::OBJ_ENABLE) {
            self.render_sprites(&bg, &mut row);
        }
        self.frame.row_mut(line).copy_from_slice(&row);
    }

    /// Two bytes of BG/window tile data for `row` of `tile`, honouring the
    /// LCDC.4 addressing mode.
    fn bg_tile_row(&self, tile: u8, row: u8) -> (u8, u8) {
        let base: u16 = if self.lcdc.contains(Lcdc::TILE_DATA_UNSIGNED) {
            0x8000 + tile as u16 * 16
        } else {
            0x9000u16.wrapping_add((tile as i8 as i16 * 16) as u16)
        };
        let addr = base + row as u16 * 2;
        (self.read_vram(addr), self.read_vram(addr + 1))
    }

    fn map_tile(&self, high_map: bool, col: u8, row: u8) -> u8 {
        let base: u16 = if high_map { 0x9C00 } else { 0x9800 };
        self.read_vram(base + row as u16 * 32 + col as u16)
    }

    fn render_background(&self, out: &mut [u8; SCREEN_WIDTH]) {
        let high_map = self.lcdc.contains(Lcdc::BG_MAP_HIGH);
        let y = self.ly.wrapping_add(self.scy);
        for (screen_x, pixel) in out.iter_mut().enumerate() {
            let x = (screen_x as u8).wrapping_add(self.scx);
            let tile = self.map_tile(high_map, x / 8, y / 8);
            let (lo, hi) = self.bg_tile_row(tile, y % 8);
            *pixel = tile_pixel(lo, hi, 7 - x % 8);
        }
    }

    fn render_window(&mut self, out: &mut [u8; SCREEN_WIDTH]) {
        if !self.lcdc.contains(Lcdc::WINDOW_ENABLE) || self.ly < self.wy || self.wx > WX_MAX {
            return;
        }
        let high_map = self.lcdc.contains(Lcdc::WINDOW_MAP_HIGH);
        let y = self.window_line;
        // WX is offset by 7; WX < 7 scrolls the window's left edge off-screen.
        let origin = self.wx as i16 - 7;
        for screen_x in origin.max(0) as usize..SCREEN_WIDTH {
            let x = (screen_x as i16 - origin) as u8;
            let tile = self.map_tile(high_map, x / 8, y / 8);
            let (lo, hi) = self.bg_tile_row(tile, y % 8);
            out[screen_x] = tile_pixel(lo, hi, 7 - x % 8);
        }
        self.window_line = self.window_line.wrapping_add(1);
    }

    fn sprite_height(&self) -> i16 {
        if self.lcdc.contains(Lcdc::OBJ_TALL) {
            16
        } else {
            8
        }
    }

    /// First ten OAM entries overlapping this line, ordered by drawing
    /// priority: smaller X first, ties to the lower OAM index.
    fn sprites_on_line(&self) -> Vec<Sprite> {
        let height = self.sprite_height();
        let line = self.ly as i16;
        let mut sprites: Vec<Sprite> = (0..OAM_ENTRIES)
            .map(|index| {
                let base = 0xFE00 + index as u16 * 4;
                Sprite {
                    y: self.read_oam(base) as i16 - 16,
                    x: self.read_oam(base + 1) as i16 - 8,
                    tile: self.read_oam(base + 2),
                    attrs: SpriteAttrs::from_bits_truncate(self.read_oam(base + 3)),
                }
            })
            .filter(|s| line >= s.y && line < s.y + height)
            .take(MAX_SPRITES_PER_LINE)
            .collect();
        // Stable sort keeps OAM order among equal X.
        sprites.sort_by_key(|s| s.x);
        sprites
    }

    fn render_sprites(&self, bg: &[u8; SCREEN_WIDTH], row: &mut [u8; SCREEN_WIDTH]) {
        let height = self.sprite_height();
        let mut claimed = [false; SCREEN_WIDTH];

        for sprite in self.sprites_on_line() {
            let mut line = self.ly as i16 - sprite.y;
            if sprite.attrs.contains(SpriteAttrs::FLIP_Y) {
                line = height - 1 - line;
            }
            let mut tile = sprite.tile;
            if height == 16 {
                tile = (tile & 0xFE) + (line / 8) as u8;
            }
            let addr = 0x8000 + tile as u16 * 16 + (line % 8) as u16 * 2;
            let (lo, hi) = (self.read_vram(addr), self.read_vram(addr + 1));
            let palette = if sprite.attrs.contains(SpriteAttrs::PALETTE_OBP1) {
                self.obp1
            } else {
                self.obp0
            };

            for col in 0..8i16 {
                let screen_x = sprite.x + col;
                if !(0..SCREEN_WIDTH as i16).contains(&screen_x) {
                    continue;
                }
                let screen_x = screen_x as usize;
                if claimed[screen_x] {
                    continue;
                }
                let bit = if sprite.attrs.contains(SpriteAttrs::FLIP_X) {
                    col as u8
                } else {
                    7 - col as u8
                };
                let color = tile_pixel(lo, hi, bit);
                if color == 0 {
                    continue;
                }
                // A higher-priority sprite hides lower ones even when it
                // is itself behind the background.
                claimed[screen_x] = true;
                if sprite.attrs.contains(SpriteAttrs::BEHIND_BG) && bg[screen_x] != 0 {
                    continue;
                }
                row[screen_x] = shade(palette, color);
            }
        }
    }
}
