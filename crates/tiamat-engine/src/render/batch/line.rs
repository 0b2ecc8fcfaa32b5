use crate::render::command::LineCmd;

use super::{BatchSink, LineVertex};

/// Stages line segments for a single line-list draw.
///
/// Usage per batch: `begin`, `add_line` until it returns `false`, `end`,
/// `draw_batch`.
#[derive(Debug)]
pub struct LineBatch {
    vertices: Vec<LineVertex>,
    max_lines: usize,
    open: bool,
}

impl LineBatch {
    /// `max_lines` is clamped to at least 1.
    pub fn new(max_lines: usize) -> Self {
        let max_lines = max_lines.max(1);
        Self {
            vertices: Vec::with_capacity(max_lines * 2),
            max_lines,
            open: false,
        }
    }

    #[inline]
    pub fn max_lines(&self) -> usize {
        self.max_lines
    }

    /// Staged segment count.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len() / 2
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn begin(&mut self) {
        self.vertices.clear();
        self.open = true;
    }

    /// Stages one segment. `false` when closed or full; nothing is staged.
    pub fn add_line(&mut self, line: &LineCmd) -> bool {
        if !self.open || self.len() >= self.max_lines {
            return false;
        }

        let color = line.color.to_array();
        self.vertices.push(LineVertex { position: line.a.to_array(), color });
        self.vertices.push(LineVertex { position: line.b.to_array(), color });
        true
    }

    pub fn end(&mut self) {
        self.open = false;
    }

    /// Hands exactly `2 * len()` vertices to `sink` as one draw.
    pub fn draw_batch(&self, sink: &mut dyn BatchSink) {
        sink.draw_lines(&self.vertices);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;
    use crate::render::batch::testing::RecordingSink;

    fn seg(x: f32) -> LineCmd {
        LineCmd::new(Vec2::new(x, 0.0), Vec2::new(x, 1.0), Color::WHITE)
    }

    #[test]
    fn add_requires_open_batch() {
        let mut batch = LineBatch::new(4);
        assert!(!batch.add_line(&seg(0.0)));

        batch.begin();
        assert!(batch.add_line(&seg(0.0)));
        batch.end();
        assert!(!batch.add_line(&seg(1.0)));
        assert_eq!(batch.len(), 1);
    }

    #[test]
    fn add_fails_at_capacity_without_staging() {
        let mut batch = LineBatch::new(2);
        batch.begin();
        assert!(batch.add_line(&seg(0.0)));
        assert!(batch.add_line(&seg(1.0)));
        assert!(!batch.add_line(&seg(2.0)));
        assert_eq!(batch.len(), 2);
    }

    #[test]
    fn draw_hands_two_vertices_per_segment() {
        let mut batch = LineBatch::new(8);
        batch.begin();
        batch.add_line(&LineCmd::new(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0), Color::BLACK));
        batch.add_line(&seg(5.0));
        batch.end();

        let mut sink = RecordingSink::default();
        batch.draw_batch(&mut sink);

        let draws = sink.line_draws();
        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].len(), 4);
        assert_eq!(draws[0][0].position, [1.0, 2.0]);
        assert_eq!(draws[0][1].position, [3.0, 4.0]);
        assert_eq!(draws[0][1].color, Color::BLACK.to_array());
    }

    #[test]
    fn begin_resets_staged_count() {
        let mut batch = LineBatch::new(0);
        assert_eq!(batch.max_lines(), 1);

        batch.begin();
        batch.add_line(&seg(0.0));
        batch.begin();
        assert!(batch.is_empty());
        assert!(batch.add_line(&seg(1.0)));
    }
}
