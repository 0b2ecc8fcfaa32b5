use crate::coords::Vec2;
use crate::paint::Color;

use super::batch::{BatchSink, LineBatch, SpriteBatch, DEFAULT_BATCH_SIZE};
use super::command::{BoxCmd, DrawCommand, LineCmd, SpriteCmd};
use super::queue::CommandQueue;
use super::Camera;

/// Inline queue capacity before the first heap spill.
pub const QUEUE_INLINE_CAPACITY: usize = 1024;

type DrawQueue = CommandQueue<DrawCommand, QUEUE_INLINE_CAPACITY>;

/// Result of one flush.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FlushStats {
    /// Draw calls handed to the sink.
    pub draws: u32,
    /// Primitives drawn (segments or sprites).
    pub primitives: u32,
}

/// Deferred draw recorder.
///
/// `add_*` only enqueue. Flushing drains a queue into its batch, issuing a
/// draw whenever the batch fills and once more at the end.
#[derive(Debug)]
pub struct DrawDispatcher {
    line_queue: DrawQueue,
    sprite_queue: DrawQueue,
    line_batch: LineBatch,
    sprite_batch: SpriteBatch,
}

impl Default for DrawDispatcher {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_SIZE, DEFAULT_BATCH_SIZE)
    }
}

impl DrawDispatcher {
    pub fn new(line_batch_size: usize, sprite_batch_size: usize) -> Self {
        Self {
            line_queue: DrawQueue::new(),
            sprite_queue: DrawQueue::new(),
            line_batch: LineBatch::new(line_batch_size),
            sprite_batch: SpriteBatch::new(sprite_batch_size),
        }
    }

    // ── recording ─────────────────────────────────────────────────────────

    pub fn add_line(&mut self, a: Vec2, b: Vec2, color: Color) {
        self.line_queue.push(DrawCommand::Line2D(LineCmd::new(a, b, color)));
    }

    /// Outline of the axis-aligned box at `origin` with `size`.
    pub fn add_box(&mut self, origin: Vec2, size: Vec2, color: Color) {
        self.line_queue.push(DrawCommand::Box2D(BoxCmd::new(origin, size, color)));
    }

    pub fn add_sprite(
        &mut self,
        position: Vec2,
        size: Vec2,
        uv_min: Vec2,
        uv_max: Vec2,
        texture: u32,
        color: Color,
    ) {
        self.sprite_queue.push(DrawCommand::Sprite(SpriteCmd {
            position,
            size,
            uv_min,
            uv_max,
            texture,
            color,
        }));
    }

    #[inline]
    pub fn line_batch_size(&self) -> usize {
        self.line_batch.max_lines()
    }

    #[inline]
    pub fn sprite_batch_size(&self) -> usize {
        self.sprite_batch.max_sprites()
    }

    /// Queued line and box records.
    #[inline]
    pub fn pending_lines(&self) -> usize {
        self.line_queue.len()
    }

    #[inline]
    pub fn pending_sprites(&self) -> usize {
        self.sprite_queue.len()
    }

    pub fn clear_lines(&mut self) {
        self.line_queue.clear();
    }

    pub fn clear_sprites(&mut self) {
        self.sprite_queue.clear();
    }

    // ── flushing ──────────────────────────────────────────────────────────

    /// Drains every queued line and box into line-list draws.
    ///
    /// Always ends with one draw, which is empty when nothing was queued.
    pub fn flush_lines(&mut self, camera: &Camera, sink: &mut dyn BatchSink) -> FlushStats {
        let mut stats = FlushStats::default();

        sink.begin_lines(camera);
        self.line_batch.begin();

        while let Some(cmd) = self.line_queue.pop_front() {
            match cmd {
                DrawCommand::Line2D(line) => {
                    Self::stage_line(&mut self.line_batch, sink, &mut stats, &line);
                }
                DrawCommand::Box2D(b) => {
                    for edge in b.edges() {
                        Self::stage_line(&mut self.line_batch, sink, &mut stats, &edge);
                    }
                }
                DrawCommand::None => {}
                DrawCommand::Sprite(_) => log::trace!("sprite record in line queue; skipped"),
            }
        }

        self.line_batch.end();
        Self::draw_lines(&self.line_batch, sink, &mut stats);
        stats
    }

    /// Drains every queued sprite into instanced quad draws.
    pub fn flush_sprites(&mut self, camera: &Camera, sink: &mut dyn BatchSink) -> FlushStats {
        let mut stats = FlushStats::default();

        sink.begin_sprites(camera);
        self.sprite_batch.begin();

        while let Some(cmd) = self.sprite_queue.pop_front() {
            let DrawCommand::Sprite(sprite) = cmd else {
                log::trace!("non-sprite record in sprite queue; skipped");
                continue;
            };

            if !self.sprite_batch.add(&sprite) {
                log::debug!(
                    "sprite batch full at {}; flushing mid-drain",
                    self.sprite_batch.max_sprites()
                );
                Self::draw_sprites(&self.sprite_batch, sink, &mut stats);
                self.sprite_batch.begin();
                // A fresh batch always has room for one.
                let added = self.sprite_batch.add(&sprite);
                debug_assert!(added, "sprite rejected by an empty batch");
            }
        }

        Self::draw_sprites(&self.sprite_batch, sink, &mut stats);
        stats
    }

    fn stage_line(
        batch: &mut LineBatch,
        sink: &mut dyn BatchSink,
        stats: &mut FlushStats,
        line: &LineCmd,
    ) {
        if batch.add_line(line) {
            return;
        }

        log::debug!("line batch full at {}; flushing mid-drain", batch.max_lines());
        batch.end();
        Self::draw_lines(batch, sink, stats);
        batch.begin();
        // A fresh batch always has room for one.
        let added = batch.add_line(line);
        debug_assert!(added, "line rejected by an empty batch");
    }

    fn draw_lines(batch: &LineBatch, sink: &mut dyn BatchSink, stats: &mut FlushStats) {
        batch.draw_batch(sink);
        stats.draws += 1;
        stats.primitives += batch.len() as u32;
    }

    fn draw_sprites(batch: &SpriteBatch, sink: &mut dyn BatchSink, stats: &mut FlushStats) {
        batch.end(sink);
        batch.draw_batch(sink);
        if !batch.is_empty() {
            stats.draws += 1;
            stats.primitives += batch.len() as u32;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::batch::testing::{RecordingSink, SinkCall};

    fn cam() -> Camera {
        Camera::orthographic_2d(640.0, 480.0)
    }

    fn v(x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y)
    }

    fn add_sprites(d: &mut DrawDispatcher, n: usize) {
        for i in 0..n {
            d.add_sprite(v(i as f32, 0.0), v(8.0, 8.0), Vec2::ZERO, Vec2::ONE, 1, Color::WHITE);
        }
    }

    // ── batch saturation ──────────────────────────────────────────────────

    #[test]
    fn lines_over_capacity_split_into_ceil_draws() {
        let mut d = DrawDispatcher::new(4, 4);
        for i in 0..10 {
            d.add_line(v(i as f32, 0.0), v(i as f32, 1.0), Color::WHITE);
        }

        let mut sink = RecordingSink::default();
        let stats = d.flush_lines(&cam(), &mut sink);

        let draws = sink.line_draws();
        assert_eq!(draws.len(), 3);
        assert_eq!(draws.iter().map(|d| d.len()).collect::<Vec<_>>(), vec![8, 8, 4]);
        assert_eq!(stats, FlushStats { draws: 3, primitives: 10 });
        assert_eq!(d.pending_lines(), 0);
    }

    #[test]
    fn sprites_over_capacity_split_into_ceil_draws_in_order() {
        let mut d = DrawDispatcher::new(4, 3);
        add_sprites(&mut d, 7);

        let mut sink = RecordingSink::default();
        let stats = d.flush_sprites(&cam(), &mut sink);

        assert_eq!(sink.sprite_draws(), vec![3, 3, 1]);
        assert_eq!(stats.primitives, 7);

        let xs: Vec<f32> = sink
            .sprite_uploads()
            .iter()
            .flat_map(|u| u.iter().map(|s| s.position[0]))
            .collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn exact_multiple_of_capacity_has_no_trailing_empty_sprite_draw() {
        let mut d = DrawDispatcher::new(4, 4);
        add_sprites(&mut d, 8);

        let mut sink = RecordingSink::default();
        d.flush_sprites(&cam(), &mut sink);
        assert_eq!(sink.sprite_draws(), vec![4, 4]);
    }

    #[test]
    fn each_upload_precedes_its_draw() {
        let mut d = DrawDispatcher::new(4, 2);
        add_sprites(&mut d, 3);

        let mut sink = RecordingSink::default();
        d.flush_sprites(&cam(), &mut sink);

        let kinds: Vec<&str> = sink
            .calls
            .iter()
            .map(|c| match c {
                SinkCall::BeginSprites => "begin",
                SinkCall::UploadSprites(_) => "upload",
                SinkCall::DrawSprites(_) => "draw",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, vec!["begin", "upload", "draw", "upload", "draw"]);
    }

    // ── box expansion ─────────────────────────────────────────────────────

    #[test]
    fn box_expands_into_closed_outline() {
        let mut d = DrawDispatcher::default();
        d.add_box(v(10.0, 20.0), v(30.0, 40.0), Color::BLACK);

        let mut sink = RecordingSink::default();
        let stats = d.flush_lines(&cam(), &mut sink);
        assert_eq!(stats.primitives, 4);

        let verts = sink.line_draws()[0];
        let corners = [v(10.0, 20.0), v(40.0, 20.0), v(40.0, 60.0), v(10.0, 60.0)];
        for (i, pair) in verts.chunks(2).enumerate() {
            assert_eq!(Vec2::from(pair[0].position), corners[i]);
            assert_eq!(Vec2::from(pair[1].position), corners[(i + 1) % 4]);
        }
    }

    #[test]
    fn box_edges_split_across_saturated_batch() {
        let mut d = DrawDispatcher::new(3, 1);
        d.add_box(Vec2::ZERO, v(1.0, 1.0), Color::WHITE);

        let mut sink = RecordingSink::default();
        let stats = d.flush_lines(&cam(), &mut sink);

        let sizes: Vec<usize> = sink.line_draws().iter().map(|d| d.len()).collect();
        assert_eq!(sizes, vec![6, 2]);
        assert_eq!(stats.primitives, 4);
    }

    // ── empty & clear ─────────────────────────────────────────────────────

    #[test]
    fn empty_line_flush_draws_nothing_and_is_repeatable() {
        let mut d = DrawDispatcher::default();
        let mut sink = RecordingSink::default();

        let first = d.flush_lines(&cam(), &mut sink);
        assert_eq!(first, FlushStats { draws: 1, primitives: 0 });
        assert_eq!(sink.calls, vec![SinkCall::BeginLines, SinkCall::DrawLines(Vec::new())]);

        d.add_line(Vec2::ZERO, v(1.0, 1.0), Color::WHITE);
        let second = d.flush_lines(&cam(), &mut sink);
        assert_eq!(second, FlushStats { draws: 1, primitives: 1 });
    }

    #[test]
    fn empty_sprite_flush_issues_no_draw() {
        let mut d = DrawDispatcher::default();
        let mut sink = RecordingSink::default();
        let stats = d.flush_sprites(&cam(), &mut sink);
        assert_eq!(stats, FlushStats::default());
        assert!(sink.sprite_draws().is_empty());
    }

    #[test]
    fn clear_drops_pending_without_drawing() {
        let mut d = DrawDispatcher::default();
        d.add_line(Vec2::ZERO, v(1.0, 0.0), Color::WHITE);
        add_sprites(&mut d, 2);
        assert_eq!((d.pending_lines(), d.pending_sprites()), (1, 2));

        d.clear_lines();
        d.clear_sprites();

        let mut sink = RecordingSink::default();
        assert_eq!(d.flush_lines(&cam(), &mut sink).primitives, 0);
        assert_eq!(d.flush_sprites(&cam(), &mut sink).primitives, 0);
    }

    #[test]
    fn queue_growth_loses_nothing() {
        let mut d = DrawDispatcher::new(DEFAULT_BATCH_SIZE, 256);
        add_sprites(&mut d, QUEUE_INLINE_CAPACITY * 3 + 5);

        let mut sink = RecordingSink::default();
        let stats = d.flush_sprites(&cam(), &mut sink);
        assert_eq!(stats.primitives as usize, QUEUE_INLINE_CAPACITY * 3 + 5);
        assert_eq!(stats.draws as usize, (QUEUE_INLINE_CAPACITY * 3 + 5).div_ceil(256));
    }
}
