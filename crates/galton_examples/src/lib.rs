#![forbid(unsafe_code)]

mod rendering;

pub use rendering::{init_tracing, render_batch_to_png, render_histogram_to_png, RenderConfig};
