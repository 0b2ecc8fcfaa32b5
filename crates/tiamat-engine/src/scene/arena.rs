use glam::{Mat4, Quat, Vec3};

use super::Transform;

/// Stable handle to a transform stored in a [`TransformArena`].
///
/// A handle goes stale when its node is removed; the slot may be reused but
/// the generation will differ, so stale handles never alias a new node.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TransformId {
    index: u32,
    generation: u32,
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<Transform>,
}

/// Owning container for a transform hierarchy.
///
/// Parents are referenced by [`TransformId`], never by pointer. Removing a
/// node turns its children into roots.
#[derive(Debug, Default, Clone)]
pub struct TransformArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl TransformArena {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Stores `transform` and returns its handle.
    ///
    /// A parent link pointing at a dead node is dropped.
    pub fn insert(&mut self, mut transform: Transform) -> TransformId {
        if transform.parent.is_some_and(|p| !self.contains(p)) {
            transform.parent = None;
        }

        self.len += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(transform);
            return TransformId { index, generation: slot.generation };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot { generation: 0, node: Some(transform) });
        TransformId { index, generation: 0 }
    }

    /// Removes a node. Its children keep their local values and become roots.
    pub fn remove(&mut self, id: TransformId) -> Option<Transform> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }

        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.len -= 1;

        for child in self.slots.iter_mut().filter_map(|s| s.node.as_mut()) {
            if child.parent == Some(id) {
                child.parent = None;
            }
        }

        Some(node)
    }

    #[inline]
    pub fn contains(&self, id: TransformId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: TransformId) -> Option<&Transform> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_ref()
    }

    pub fn get_mut(&mut self, id: TransformId) -> Option<&mut Transform> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_mut()
    }

    /// Re-parents `child`. `None` detaches it.
    ///
    /// Returns `false` (and changes nothing) if either handle is dead or the
    /// link would create a cycle.
    pub fn set_parent(&mut self, child: TransformId, parent: Option<TransformId>) -> bool {
        if !self.contains(child) {
            return false;
        }

        if let Some(p) = parent {
            if !self.contains(p) || self.is_ancestor_or_self(child, p) {
                return false;
            }
        }

        if let Some(node) = self.get_mut(child) {
            node.parent = parent;
        }
        true
    }

    /// Iterates `(handle, transform)` pairs of live nodes.
    pub fn iter(&self) -> impl Iterator<Item = (TransformId, &Transform)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.node.as_ref().map(|node| {
                (TransformId { index: i as u32, generation: slot.generation }, node)
            })
        })
    }

    // ── global queries ────────────────────────────────────────────────────
    //
    // These take a `&Transform` so they also resolve transforms that live
    // outside the arena (e.g. a camera's) but point at a parent inside it.

    /// Iterates the parent chain of `transform`, nearest first.
    fn ancestors<'a>(&'a self, transform: &Transform) -> impl Iterator<Item = &'a Transform> + 'a {
        let mut next = transform.parent;
        std::iter::from_fn(move || {
            let node = self.get(next?)?;
            next = node.parent;
            Some(node)
        })
    }

    pub fn global_matrix(&self, transform: &Transform) -> Mat4 {
        self.ancestors(transform)
            .fold(transform.local_matrix(), |m, parent| parent.local_matrix() * m)
    }

    pub fn global_rotation(&self, transform: &Transform) -> Quat {
        self.ancestors(transform)
            .fold(transform.rotation, |r, parent| parent.rotation * r)
    }

    pub fn global_scale(&self, transform: &Transform) -> Vec3 {
        self.ancestors(transform)
            .fold(transform.scale, |s, parent| s * parent.scale)
    }

    pub fn global_position(&self, transform: &Transform) -> Vec3 {
        self.ancestors(transform).fold(transform.position, |p, parent| {
            parent.position + parent.rotation * (parent.scale * p)
        })
    }

    /// Global -Z axis.
    pub fn forward(&self, transform: &Transform) -> Vec3 {
        self.global_rotation(transform) * Vec3::NEG_Z
    }

    pub fn up(&self, transform: &Transform) -> Vec3 {
        self.global_rotation(transform) * Vec3::Y
    }

    pub fn right(&self, transform: &Transform) -> Vec3 {
        self.global_rotation(transform) * Vec3::X
    }

    fn is_ancestor_or_self(&self, candidate: TransformId, of: TransformId) -> bool {
        let mut cur = Some(of);
        while let Some(id) = cur {
            if id == candidate {
                return true;
            }
            cur = self.get(id).and_then(|t| t.parent);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    // ── handles ───────────────────────────────────────────────────────────

    #[test]
    fn stale_handle_does_not_alias_reused_slot() {
        let mut arena = TransformArena::new();
        let a = arena.insert(Transform::new());
        arena.remove(a);
        let b = arena.insert(Transform::from_position(Vec3::X));

        assert!(arena.get(a).is_none());
        assert_eq!(arena.get(b).map(|t| t.position), Some(Vec3::X));
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn removing_parent_detaches_children() {
        let mut arena = TransformArena::new();
        let parent = arena.insert(Transform::from_position(Vec3::new(5.0, 0.0, 0.0)));
        let child = arena.insert(Transform::from_position(Vec3::Y));
        assert!(arena.set_parent(child, Some(parent)));

        arena.remove(parent);
        let node = arena.get(child).unwrap();
        assert_eq!(node.parent(), None);
        assert!(approx(arena.global_position(node), Vec3::Y));
    }

    #[test]
    fn set_parent_rejects_cycles_and_dead_handles() {
        let mut arena = TransformArena::new();
        let a = arena.insert(Transform::new());
        let b = arena.insert(Transform::new());
        let c = arena.insert(Transform::new());

        assert!(arena.set_parent(b, Some(a)));
        assert!(arena.set_parent(c, Some(b)));
        assert!(!arena.set_parent(a, Some(c)));
        assert!(!arena.set_parent(a, Some(a)));

        arena.remove(c);
        assert!(!arena.set_parent(a, Some(c)));
        assert!(!arena.set_parent(c, None));
    }

    // ── globals ───────────────────────────────────────────────────────────

    #[test]
    fn global_position_applies_parent_rotation_and_scale() {
        let mut arena = TransformArena::new();
        let mut root = Transform::from_position(Vec3::new(10.0, 0.0, 0.0));
        root.set_rotation(Vec3::Z, FRAC_PI_2);
        root.scale = Vec3::splat(2.0);
        let root = arena.insert(root);

        let child = arena.insert(Transform::from_position(Vec3::X));
        arena.set_parent(child, Some(root));

        let node = arena.get(child).unwrap();
        // (1,0,0) scaled by 2, rotated 90° around Z, then offset by the root.
        assert!(approx(arena.global_position(node), Vec3::new(10.0, 2.0, 0.0)));
        assert!(approx(arena.global_scale(node), Vec3::splat(2.0)));

        let from_matrix = arena.global_matrix(node).transform_point3(Vec3::ZERO);
        assert!(approx(from_matrix, Vec3::new(10.0, 2.0, 0.0)));
    }

    #[test]
    fn direction_vectors_follow_global_rotation() {
        let mut arena = TransformArena::new();
        let mut root = Transform::new();
        root.set_rotation(Vec3::Y, FRAC_PI_2);
        let root = arena.insert(root);

        let mut cam = Transform::new();
        cam.parent = Some(root);

        assert!(approx(arena.forward(&cam), Vec3::NEG_X));
        assert!(approx(arena.up(&cam), Vec3::Y));
        assert!(approx(arena.right(&cam), Vec3::NEG_Z));
    }

    #[test]
    fn euler_yaw_matches_axis_angle() {
        let mut a = Transform::new();
        a.set_rotation_euler(0.0, FRAC_PI_2, 0.0);
        let mut b = Transform::new();
        b.set_rotation(Vec3::Y, FRAC_PI_2);
        assert!(a.rotation.abs_diff_eq(b.rotation, 1e-6));
    }
}
