//! Batched 2D rendering.
//!
//! Pipeline, front to back:
//! - `Renderer2D::add_*` records [`DrawCommand`]s into growable ring queues
//! - a [`RenderFrame`] flush drains each queue into its batch (boxes expand
//!   into four lines), drawing whenever a batch fills
//! - batches hand their data to a [`BatchSink`]; the wgpu sink records one
//!   upload + one pass per draw into the frame encoder
//!
//! World coordinates are whatever the [`Camera`] projects; the default 2D
//! camera maps pixels with a top-left origin and +Y down.

pub mod batch;
mod camera;
pub mod command;
mod ctx;
pub mod dispatch;
mod frame;
mod gpu;
mod image;
pub mod queue;
mod renderer;
mod texture;

pub use batch::{BatchSink, LineBatch, LineVertex, SpriteBatch, SpriteInstance};
pub use camera::{Camera, Projection};
pub use command::DrawCommand;
pub use ctx::{RenderCtx, RenderTarget};
pub use dispatch::{DrawDispatcher, FlushStats};
pub use frame::RenderFrame;
pub use self::image::Image2D;
pub use queue::{CommandQueue, FixedCommandQueue};
pub use renderer::{Renderer2D, RendererConfig};
pub use texture::{Texture2D, TextureSlots, TextureSpec, MAX_TEXTURE_SLOTS, WHITE_SLOT};
