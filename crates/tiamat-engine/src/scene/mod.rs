//! Transform hierarchy.
//!
//! Transforms live in a [`TransformArena`] and link to their parent through a
//! generational [`TransformId`].

mod arena;
mod transform;

pub use arena::{TransformArena, TransformId};
pub use transform::Transform;
