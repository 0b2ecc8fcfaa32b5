use super::Vec2;

/// Axis-aligned rectangle as origin + size.
///
/// Serves as a world-space box and as a normalized UV region.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    /// Whole texture, `[0, 1]` on both axes.
    pub const UNIT: Rect = Rect::new(0.0, 0.0, 1.0, 1.0);

    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::from_origin_size(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    #[inline]
    pub fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self::from_origin_size(min, max - min)
    }

    /// UV region of the pixel rectangle `(x, y, w, h)` inside a
    /// `width` x `height` texture. Zero-sized textures yield [`Rect::UNIT`].
    pub fn from_texels(x: u32, y: u32, w: u32, h: u32, width: u32, height: u32) -> Self {
        if width == 0 || height == 0 {
            return Self::UNIT;
        }
        let texel = Vec2::new(1.0 / width as f32, 1.0 / height as f32);
        Self::from_origin_size(
            Vec2::new(x as f32, y as f32) * texel,
            Vec2::new(w as f32, h as f32) * texel,
        )
    }

    #[inline]
    pub fn min(self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        self.origin + self.size
    }

    /// Corners starting at the origin, walking +x first.
    pub fn corners(self) -> [Vec2; 4] {
        let (lo, hi) = (self.min(), self.max());
        [lo, Vec2::new(hi.x, lo.y), hi, Vec2::new(lo.x, hi.y)]
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Half-open containment: the max edges are outside.
    pub fn contains(self, point: Vec2) -> bool {
        let (lo, hi) = (self.min(), self.max());
        point.x >= lo.x && point.y >= lo.y && point.x < hi.x && point.y < hi.y
    }
}
