//! Some pre-defined colours.
//!
//! Colours are four bytes packed into a `u32`, `0xAARRGGBB`. An alpha of
//! `0xFF` is fully opaque.

pub const BLACK: u32 = 0xFF000000;
pub const WHITE: u32 = 0xFFFFFFFF;
pub const GREY: u32 = 0xFF404040;
pub const RED: u32 = 0xFFFF0000;
pub const GREEN: u32 = 0xFF008000;
pub const BLUE: u32 = 0xFF0000FF;
pub const CYAN: u32 = 0xFF00FFFF;
pub const YELLOW: u32 = 0xFFFFFF00;
pub const MAGENTA: u32 = 0xFFFF00FF;

pub const GUI_BG: u32 = 0xFFC6C6C6;
pub const SLOT_BG: u32 = 0xFF8B8B8B;
pub const OVERLAY_WHITE: u32 = 0x80FFFFFF;
pub const OVERLAY_BLUE: u32 = 0x800000FF;


/// Combine a `0xRRGGBB` colour with an alpha byte.
pub fn with_alpha(rgb: u32, alpha: u8) -> u32 {
    ((alpha as u32) << 24) | (rgb & 0x00FFFFFF)
}

/// Alpha channel of a packed colour.
pub fn alpha(colour: u32) -> u8 {
    (colour >> 24) as u8
}


#[test]
fn test_with_alpha() {
    assert_eq!(with_alpha(0x145DA0, 0xF0), 0xF0145DA0);
    assert_eq!(with_alpha(WHITE, 0x80), OVERLAY_WHITE);
    assert_eq!(alpha(OVERLAY_BLUE), 0x80);
}
