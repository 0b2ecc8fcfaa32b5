/// Number of sampler slots the sprite shader can read in one draw.
pub const MAX_TEXTURE_SLOTS: usize = 8;

/// Slot reserved for the built-in white texture (untextured sprites).
pub const WHITE_SLOT: u32 = 0;

/// Handle to a GPU texture owned by the renderer.
///
/// `Texture2D::NULL` marks a failed load or a deleted texture.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Texture2D {
    id: u32,
    width: u32,
    height: u32,
}

impl Texture2D {
    pub const NULL: Texture2D = Texture2D { id: 0, width: 0, height: 0 };

    #[inline]
    pub(crate) const fn new(id: u32, width: u32, height: u32) -> Self {
        Self { id, width, height }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.id == 0
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Sampling options for a loaded texture.
///
/// The default is nearest filtering with repeat wrapping.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct TextureSpec {
    /// Linear instead of nearest filtering.
    pub linear: bool,
    /// Clamp to edge instead of repeat.
    pub clip: bool,
}

impl TextureSpec {
    pub const LINEAR: TextureSpec = TextureSpec { linear: true, clip: false };
    pub const CLIP: TextureSpec = TextureSpec { linear: false, clip: true };

    pub fn filter_mode(self) -> wgpu::FilterMode {
        if self.linear { wgpu::FilterMode::Linear } else { wgpu::FilterMode::Nearest }
    }

    pub fn address_mode(self) -> wgpu::AddressMode {
        if self.clip { wgpu::AddressMode::ClampToEdge } else { wgpu::AddressMode::Repeat }
    }
}

/// Texture ids bound to the sprite shader's sampler slots.
///
/// Id 0 in a slot means "nothing bound"; it samples white.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct TextureSlots {
    ids: [u32; MAX_TEXTURE_SLOTS],
}

impl TextureSlots {
    /// Binds `texture` to `slot`. Out-of-range slots are ignored.
    pub fn bind(&mut self, texture: Texture2D, slot: u32) -> bool {
        let Some(entry) = self.ids.get_mut(slot as usize) else {
            log::debug!("texture slot {slot} out of range (max {MAX_TEXTURE_SLOTS}); ignored");
            return false;
        };
        *entry = texture.id();
        true
    }

    #[inline]
    pub fn get(&self, slot: u32) -> Option<u32> {
        self.ids.get(slot as usize).copied()
    }

    #[inline]
    pub fn ids(&self) -> [u32; MAX_TEXTURE_SLOTS] {
        self.ids
    }

    /// Unbinds `id` from every slot it occupies.
    pub fn unbind_id(&mut self, id: u32) {
        for slot in self.ids.iter_mut().filter(|s| **s == id) {
            *slot = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_handle() {
        assert!(Texture2D::NULL.is_null());
        assert!(Texture2D::default().is_null());
        assert!(!Texture2D::new(3, 1, 1).is_null());
    }

    #[test]
    fn spec_maps_to_sampler_modes() {
        let d = TextureSpec::default();
        assert_eq!(d.filter_mode(), wgpu::FilterMode::Nearest);
        assert_eq!(d.address_mode(), wgpu::AddressMode::Repeat);
        assert_eq!(TextureSpec::LINEAR.filter_mode(), wgpu::FilterMode::Linear);
        assert_eq!(TextureSpec::CLIP.address_mode(), wgpu::AddressMode::ClampToEdge);
    }

    #[test]
    fn bind_ignores_out_of_range_slot() {
        let mut slots = TextureSlots::default();
        let tex = Texture2D::new(7, 4, 4);

        assert!(slots.bind(tex, 3));
        assert!(!slots.bind(tex, MAX_TEXTURE_SLOTS as u32));
        assert_eq!(slots.get(3), Some(7));
        assert_eq!(slots.get(MAX_TEXTURE_SLOTS as u32), None);
    }

    #[test]
    fn unbind_clears_every_slot_with_id() {
        let mut slots = TextureSlots::default();
        let tex = Texture2D::new(5, 1, 1);
        slots.bind(tex, 1);
        slots.bind(tex, 4);
        slots.bind(Texture2D::new(6, 1, 1), 2);

        slots.unbind_id(5);
        assert_eq!(slots.ids(), [0, 0, 6, 0, 0, 0, 0, 0]);
    }
}
