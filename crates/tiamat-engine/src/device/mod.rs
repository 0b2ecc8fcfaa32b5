//! wgpu device and window surface.
//!
//! [`Gpu`] owns the adapter, device, queue and swapchain configuration for
//! the window; the renderer clones its device and queue.

mod context;
mod frame;
mod init;
mod surface;

pub use context::Gpu;
pub use frame::GpuFrame;
pub use init::GpuInit;
pub use surface::SurfaceErrorAction;
