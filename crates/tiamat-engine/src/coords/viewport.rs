/// Render-pass viewport in physical pixels, anchored at the top-left.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Positive and finite on both axes.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// `1.0` when invalid.
    #[inline]
    pub fn aspect(self) -> f32 {
        if self.is_valid() { self.width / self.height } else { 1.0 }
    }

    /// Fits `self` inside a `width` x `height` target. An invalid viewport
    /// covers the whole target.
    pub fn fit_to(self, width: u32, height: u32) -> Viewport {
        let (w, h) = (width as f32, height as f32);
        if self.is_valid() {
            Viewport::new(self.width.min(w), self.height.min(h))
        } else {
            Viewport::new(w, h)
        }
    }
}
