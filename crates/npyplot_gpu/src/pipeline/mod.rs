//! Render pipeline for the figure quad.

pub mod figure;

pub use figure::FigurePipeline;
