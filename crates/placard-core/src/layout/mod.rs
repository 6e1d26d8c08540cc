pub mod canvas;
pub mod components;
pub mod pdf;
pub mod renderer;
pub mod style;

pub use canvas::{Canvas, CanvasError, Color};
pub use pdf::PdfCanvas;
pub use renderer::LabelRenderer;
pub use style::{LabelStyle, StylePreset};
