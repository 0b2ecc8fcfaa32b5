use crate::coords::{Rect, Vec2};
use crate::paint::Color;

/// Line segment payload.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct LineCmd {
    pub a: Vec2,
    pub b: Vec2,
    pub color: Color,
}

impl LineCmd {
    #[inline]
    pub const fn new(a: Vec2, b: Vec2, color: Color) -> Self {
        Self { a, b, color }
    }
}

/// Box outline payload. Expanded into four [`LineCmd`]s at flush time.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct BoxCmd {
    pub origin: Vec2,
    pub size: Vec2,
    pub color: Color,
}

impl BoxCmd {
    #[inline]
    pub const fn new(origin: Vec2, size: Vec2, color: Color) -> Self {
        Self { origin, size, color }
    }

    /// Outline edges in fixed order: top, right, bottom, left.
    ///
    /// Each edge starts where the previous one ended, so the segments form a
    /// closed loop through the four corners.
    pub fn edges(&self) -> [LineCmd; 4] {
        let [c0, c1, c2, c3] = Rect::from_origin_size(self.origin, self.size).corners();
        [
            LineCmd::new(c0, c1, self.color),
            LineCmd::new(c1, c2, self.color),
            LineCmd::new(c2, c3, self.color),
            LineCmd::new(c3, c0, self.color),
        ]
    }
}

/// Textured, tinted quad payload.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct SpriteCmd {
    pub position: Vec2,
    pub size: Vec2,
    pub uv_min: Vec2,
    pub uv_max: Vec2,
    /// Texture slot sampled by the sprite shader. Slot 0 is plain white.
    pub texture: u32,
    pub color: Color,
}

/// Deferred draw request recorded into a command queue.
///
/// Extending the command set:
/// - add a payload struct and a variant here
/// - route the variant to a queue in `DrawDispatcher`
/// - feed it to a batch in the matching flush
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub enum DrawCommand {
    /// Empty slot filler; skipped when drained.
    #[default]
    None,
    Line2D(LineCmd),
    Box2D(BoxCmd),
    Sprite(SpriteCmd),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_edges_form_closed_loop_through_corners() {
        let b = BoxCmd::new(Vec2::new(2.0, 3.0), Vec2::new(4.0, 5.0), Color::WHITE);
        let edges = b.edges();
        let corners = Rect::new(2.0, 3.0, 4.0, 5.0).corners();

        for (i, edge) in edges.iter().enumerate() {
            assert_eq!(edge.a, corners[i]);
            assert_eq!(edge.b, corners[(i + 1) % 4]);
            assert_eq!(edge.color, Color::WHITE);
        }
    }

    #[test]
    fn box_edges_are_axis_aligned() {
        let b = BoxCmd::new(Vec2::ZERO, Vec2::new(10.0, 6.0), Color::BLACK);
        let [top, right, bottom, left] = b.edges();
        assert_eq!(top.a.y, top.b.y);
        assert_eq!(bottom.a.y, bottom.b.y);
        assert_eq!(right.a.x, right.b.x);
        assert_eq!(left.a.x, left.b.x);
        assert_eq!(bottom.a.y, 6.0);
        assert_eq!(right.a.x, 10.0);
    }

    #[test]
    fn default_command_is_none() {
        assert_eq!(DrawCommand::default(), DrawCommand::None);
    }
}
