//! Regions of the slot texture sheet.

use vek::*;


/// A rectangle of the slot texture sheet, in texels.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TextureRegion {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl TextureRegion {
    /// Normal 18x18 item slot.
    pub const SLOT: Self = TextureRegion { x: 0, y: 0, w: 18, h: 18 };
    /// 26x26 slot used for emphasized outputs.
    pub const BIG_SLOT: Self = TextureRegion { x: 18, y: 0, w: 26, h: 26 };
    /// 18x18 button-like slot.
    pub const RAISED_SLOT: Self = TextureRegion { x: 0, y: 18, w: 18, h: 18 };

    pub fn size(&self) -> Extent2<i32> {
        Extent2::new(self.w, self.h)
    }

    /// Top-left corner at which to draw this region so it's centered on `center`.
    pub fn top_left_centered(&self, center: Vec2<i32>) -> Vec2<i32> {
        Vec2::new(center.x - self.w / 2, center.y - self.h / 2)
    }
}


#[test]
fn test_top_left_centered() {
    let c = Vec2::new(11, 11);
    assert_eq!(TextureRegion::SLOT.top_left_centered(c), Vec2::new(2, 2));
    assert_eq!(TextureRegion::BIG_SLOT.top_left_centered(c), Vec2::new(-2, -2));
}
