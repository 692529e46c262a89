//! Terminal-facing diagnostics.

pub mod render;

pub use render::{RenderSink, Renderer};
