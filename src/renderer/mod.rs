//! Canvas 2D rendering module
//!
//! Scene code draws through the `Surface` trait and never touches the DOM.
//! The browser implementation lives in `canvas` (wasm32 only).

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;
pub mod surface;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use scene::{draw_frame, draw_game_over, draw_scene};
pub use surface::{Surface, TextAlign, TextStyle};
