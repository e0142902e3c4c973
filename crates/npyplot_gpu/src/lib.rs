//! GPU plumbing for the npyplot viewer.
//!
//! The figure is composed on the CPU; this crate only uploads it as a texture
//! and draws it as a single quad under a pan/zoom/letterbox transform.

pub mod bindings;
pub mod config;
pub mod context;
pub mod error;
pub mod pipeline;
pub mod texture;
pub mod uniform;
pub mod vertex;

pub use config::{ClearColor, GpuConfig, TextureConfig};
pub use context::GpuContext;
pub use error::{GpuError, Result};
pub use pipeline::FigurePipeline;
pub use texture::Texture;
pub use uniform::TransformUniform;
pub use vertex::Vertex;
