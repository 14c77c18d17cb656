pub mod renderer;

pub use renderer::{cell_to_pixel, Renderer};
