//! Ring-buffer command queues.
//!
//! Both variants share one index discipline:
//! - `head` is the next write slot, `tail` the next read slot
//! - both are taken modulo the current capacity
//! - `0 <= count <= capacity`
//!
//! [`FixedCommandQueue`] rejects pushes once full. [`CommandQueue`] starts on an
//! inline buffer and doubles onto the heap whenever a push finds it full.

/// Fixed-capacity ring buffer with inline storage.
#[derive(Debug, Clone)]
pub struct FixedCommandQueue<T, const N: usize> {
    buffer: [T; N],
    head: usize,
    tail: usize,
    count: usize,
}

impl<T: Copy + Default, const N: usize> FixedCommandQueue<T, N> {
    pub fn new() -> Self {
        const { assert!(N > 0, "command queue capacity must be nonzero") };
        Self {
            buffer: [T::default(); N],
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    /// Appends `item` at the back.
    ///
    /// When the queue is full the item is handed back and nothing is modified.
    pub fn push(&mut self, item: T) -> Result<(), T> {
        if self.count == N {
            return Err(item);
        }

        self.buffer[self.head] = item;
        self.head = (self.head + 1) % N;
        self.count += 1;
        Ok(())
    }

    /// Removes the oldest item (FIFO end).
    pub fn pop_front(&mut self) -> Option<T> {
        if self.count == 0 {
            return None;
        }

        let item = self.buffer[self.tail];
        self.tail = (self.tail + 1) % N;
        self.count -= 1;
        Some(item)
    }

    /// Removes the most recently pushed item (LIFO end).
    pub fn pop_back(&mut self) -> Option<T> {
        if self.count == 0 {
            return None;
        }

        self.head = (self.head + N - 1) % N;
        self.count -= 1;
        Some(self.buffer[self.head])
    }

    /// Resets the indices. Storage is kept.
    #[inline]
    pub fn clear(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.count = 0;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.count == N
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<T: Copy + Default, const N: usize> Default for FixedCommandQueue<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Backing store of a [`CommandQueue`]: exactly one buffer is ever owned.
#[derive(Debug, Clone)]
enum Storage<T, const N: usize> {
    Inline([T; N]),
    Heap(Box<[T]>),
}

impl<T, const N: usize> Storage<T, N> {
    #[inline]
    fn as_slice(&self) -> &[T] {
        match self {
            Storage::Inline(buf) => buf,
            Storage::Heap(buf) => buf,
        }
    }

    #[inline]
    fn as_mut_slice(&mut self) -> &mut [T] {
        match self {
            Storage::Inline(buf) => buf,
            Storage::Heap(buf) => buf,
        }
    }
}

/// Growable ring buffer.
///
/// Starts on an inline buffer of `N` slots. A push into a full queue doubles
/// the capacity, moving the live range to the front of a new heap buffer so
/// FIFO and LIFO order survive the move. [`clear`](Self::clear) drops the heap
/// buffer and returns to the inline capacity.
#[derive(Debug, Clone)]
pub struct CommandQueue<T, const N: usize> {
    storage: Storage<T, N>,
    head: usize,
    tail: usize,
    count: usize,
}

impl<T: Copy + Default, const N: usize> CommandQueue<T, N> {
    pub fn new() -> Self {
        const { assert!(N > 0, "command queue capacity must be nonzero") };
        Self {
            storage: Storage::Inline([T::default(); N]),
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    /// Appends `item` at the back, growing the queue first if it is full.
    pub fn push(&mut self, item: T) {
        if self.count == self.capacity() {
            self.grow();
        }

        let capacity = self.capacity();
        self.storage.as_mut_slice()[self.head] = item;
        self.head = (self.head + 1) % capacity;
        self.count += 1;
    }

    /// Removes the oldest item (FIFO end).
    pub fn pop_front(&mut self) -> Option<T> {
        if self.count == 0 {
            return None;
        }

        let capacity = self.capacity();
        let item = self.storage.as_slice()[self.tail];
        self.tail = (self.tail + 1) % capacity;
        self.count -= 1;
        Some(item)
    }

    /// Removes the most recently pushed item (LIFO end).
    pub fn pop_back(&mut self) -> Option<T> {
        if self.count == 0 {
            return None;
        }

        self.head = if self.head == 0 { self.capacity() - 1 } else { self.head - 1 };
        self.count -= 1;
        Some(self.storage.as_slice()[self.head])
    }

    /// Resets the indices and releases any heap buffer, reverting to `N` slots.
    pub fn clear(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.count = 0;

        if matches!(self.storage, Storage::Heap(_)) {
            self.storage = Storage::Inline([T::default(); N]);
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.as_slice().len()
    }

    /// True once the queue has moved off its inline buffer.
    #[inline]
    pub fn is_spilled(&self) -> bool {
        matches!(self.storage, Storage::Heap(_))
    }

    fn grow(&mut self) {
        let capacity = self.capacity();
        let new_capacity = capacity * 2;

        let old = self.storage.as_slice();
        let mut grown = Vec::with_capacity(new_capacity);

        // The live range starts at `tail` and wraps past the end at most once.
        let first = self.count.min(capacity - self.tail);
        grown.extend_from_slice(&old[self.tail..self.tail + first]);
        grown.extend_from_slice(&old[..self.count - first]);
        grown.resize(new_capacity, T::default());

        self.storage = Storage::Heap(grown.into_boxed_slice());
        self.tail = 0;
        self.head = self.count;

        log::trace!("command queue grew {capacity} -> {new_capacity}");
    }
}

impl<T: Copy + Default, const N: usize> Default for CommandQueue<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;
    use crate::render::command::{DrawCommand, SpriteCmd};

    fn drain_front<const N: usize>(q: &mut CommandQueue<u32, N>) -> Vec<u32> {
        std::iter::from_fn(|| q.pop_front()).collect()
    }

    // ── fixed ─────────────────────────────────────────────────────────────

    #[test]
    fn fixed_rejects_push_when_full() {
        let mut q = FixedCommandQueue::<char, 2>::new();
        assert_eq!(q.push('A'), Ok(()));
        assert_eq!(q.push('B'), Ok(()));
        assert_eq!(q.push('C'), Err('C'));

        assert_eq!(q.len(), 2);
        assert!(q.is_full());
        assert_eq!(q.pop_front(), Some('A'));
        assert_eq!(q.pop_front(), Some('B'));
        assert_eq!(q.pop_front(), None);
    }

    #[test]
    fn fixed_pop_back_is_lifo() {
        let mut q = FixedCommandQueue::<u32, 4>::new();
        for v in 1..=3 {
            q.push(v).unwrap();
        }
        assert_eq!(q.pop_back(), Some(3));
        assert_eq!(q.pop_front(), Some(1));
        assert_eq!(q.pop_back(), Some(2));
        assert!(q.is_empty());
        assert_eq!(q.pop_back(), None);
    }

    #[test]
    fn fixed_wraps_around() {
        let mut q = FixedCommandQueue::<u32, 3>::new();
        for round in 0..10u32 {
            q.push(round).unwrap();
            q.push(round + 100).unwrap();
            assert_eq!(q.pop_front(), Some(round));
            assert_eq!(q.pop_front(), Some(round + 100));
        }
        assert!(q.is_empty());
    }

    #[test]
    fn fixed_pop_back_wraps_head_below_zero() {
        let mut q = FixedCommandQueue::<u32, 3>::new();
        q.push(1).unwrap();
        q.push(2).unwrap();
        q.push(3).unwrap();
        // head is back at slot 0 here.
        assert_eq!(q.pop_back(), Some(3));
        q.push(4).unwrap();
        assert_eq!(q.pop_front(), Some(1));
        assert_eq!(q.pop_front(), Some(2));
        assert_eq!(q.pop_front(), Some(4));
    }

    #[test]
    fn fixed_clear_resets() {
        let mut q = FixedCommandQueue::<u32, 2>::new();
        q.push(1).unwrap();
        q.push(2).unwrap();
        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.push(7), Ok(()));
        assert_eq!(q.pop_front(), Some(7));
    }

    // ── growable ──────────────────────────────────────────────────────────

    #[test]
    fn growable_keeps_fifo_order_across_growth() {
        let mut q = CommandQueue::<u32, 4>::new();
        for v in 0..4 {
            q.push(v);
        }
        assert!(!q.is_spilled());
        assert_eq!(q.pop_front(), Some(0));

        for v in 4..11 {
            q.push(v);
        }
        assert!(q.is_spilled());
        assert_eq!(drain_front(&mut q), (1..11).collect::<Vec<_>>());
    }

    #[test]
    fn growable_no_loss_for_every_wrap_position() {
        const N: usize = 4;
        for offset in 0..N {
            let mut q = CommandQueue::<u32, N>::new();

            // Rotate head/tail so the live range wraps at a different slot.
            for v in 0..offset as u32 {
                q.push(v);
                q.pop_front();
            }

            let items: Vec<u32> = (100..100 + 3 * N as u32).collect();
            for &v in &items {
                q.push(v);
            }

            assert_eq!(q.len(), items.len());
            assert_eq!(drain_front(&mut q), items, "wrap offset {offset}");
        }
    }

    #[test]
    fn growable_pop_back_after_growth() {
        let mut q = CommandQueue::<u32, 2>::new();
        q.push(1);
        q.pop_front();
        for v in 10..15 {
            q.push(v);
        }
        assert_eq!(q.pop_back(), Some(14));
        assert_eq!(q.pop_back(), Some(13));
        assert_eq!(q.pop_front(), Some(10));
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn growable_pop_back_wraps_head_below_zero() {
        let mut q: CommandQueue<u32, 4> = CommandQueue::new();
        for v in 1..=4 {
            q.push(v);
        }
        assert_eq!(q.pop_front(), Some(1));
        assert_eq!(q.pop_front(), Some(2));
        q.push(5);

        assert_eq!(q.pop_back(), Some(5));
        assert_eq!(q.pop_back(), Some(4));
        assert_eq!(q.pop_back(), Some(3));
        assert_eq!(q.pop_back(), None);
        assert!(!q.is_spilled());

        // Filled exactly to the grown capacity, head sits at slot 0.
        for v in 1..=8 {
            q.push(v);
        }
        assert_eq!(q.capacity(), 8);
        assert_eq!(q.pop_back(), Some(8));
        assert_eq!(q.pop_front(), Some(1));
        assert_eq!(q.len(), 6);
    }

    #[test]
    fn growable_capacity_doubles() {
        let mut q = CommandQueue::<u32, 3>::new();
        assert_eq!(q.capacity(), 3);
        for v in 0..4 {
            q.push(v);
        }
        assert_eq!(q.capacity(), 6);
        for v in 4..7 {
            q.push(v);
        }
        assert_eq!(q.capacity(), 12);
    }

    #[test]
    fn growable_clear_reverts_to_inline() {
        let mut q = CommandQueue::<u32, 2>::new();
        for v in 0..9 {
            q.push(v);
        }
        assert!(q.is_spilled());

        q.clear();
        assert!(!q.is_spilled());
        assert_eq!(q.capacity(), 2);
        assert!(q.is_empty());
        assert_eq!(q.pop_front(), None);

        // Behaves like a fresh queue afterwards.
        q.push(5);
        q.push(6);
        q.push(7);
        assert_eq!(drain_front(&mut q), vec![5, 6, 7]);
    }

    #[test]
    fn growable_six_sprites_into_four_slots() {
        let mut q = CommandQueue::<DrawCommand, 4>::new();
        let sprites: Vec<DrawCommand> = (0..6)
            .map(|i| {
                DrawCommand::Sprite(SpriteCmd {
                    position: Vec2::new(i as f32, 0.0),
                    size: Vec2::ONE,
                    uv_min: Vec2::ZERO,
                    uv_max: Vec2::ONE,
                    texture: 0,
                    color: Color::WHITE,
                })
            })
            .collect();

        for &s in &sprites {
            q.push(s);
        }

        let popped: Vec<DrawCommand> = std::iter::from_fn(|| q.pop_front()).collect();
        assert_eq!(popped, sprites);
        assert_eq!(q.len(), 0);
        assert!(q.capacity() >= 6);
    }
}
